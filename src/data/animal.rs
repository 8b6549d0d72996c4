//! Canonical animal record and the normalisers that produce it
//!
//! Every source has its own record shape; the presentation layer only ever
//! sees [`CanonicalAnimal`]. Normalisers return `None` for records without a
//! usable name so nameless records never leave the pipeline.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::local::LocalAnimal;
use super::random_animal::RandomAnimal;
use super::wikipedia::PageInfo;

/// Placeholder for descriptive fields a source did not provide
pub const UNKNOWN: &str = "Unknown";

/// The normalized animal shape returned to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalAnimal {
    /// Unique within one result batch
    pub id: String,
    /// Display name, never empty
    pub name: String,
    /// Free text fact or description, may be empty
    pub fact: String,
    /// Image URL, empty when no image is available
    pub image: String,
    pub category: String,
    pub habitat: String,
    pub diet: String,
    pub lifespan: String,
    pub danger: String,
    /// Attribution link, only for Wikipedia-derived records
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub source_url: Option<String>,
}

fn or_unknown(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => UNKNOWN.to_string(),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl CanonicalAnimal {
    /// Maps a random-animal API record
    ///
    /// Falls back to the latin name when the common name is missing.
    pub fn from_random(raw: &RandomAnimal) -> Option<Self> {
        let name = non_empty(raw.name.as_deref()).or(non_empty(raw.latin_name.as_deref()))?;
        let fact = match non_empty(raw.geo_range.as_deref()) {
            Some(range) => format!("{} is found in {}.", name, range),
            None => String::new(),
        };

        Some(Self {
            id: format!("zoo-{}", name),
            name: name.to_string(),
            fact,
            image: raw.image_link.clone().unwrap_or_default(),
            category: or_unknown(raw.animal_type.as_deref()),
            habitat: or_unknown(raw.habitat.as_deref()),
            diet: or_unknown(raw.diet.as_deref()),
            lifespan: or_unknown(raw.lifespan.as_deref()),
            danger: UNKNOWN.to_string(),
            source_url: None,
        })
    }

    /// Maps resolved Wikipedia page info with an already chosen image
    pub fn from_page(page: &PageInfo, image: String) -> Option<Self> {
        let name = non_empty(Some(page.title.as_str()))?;
        let fact = if page.extract.trim().is_empty() {
            page.short_description.clone()
        } else {
            page.extract.clone()
        };

        Some(Self {
            id: page.pageid.to_string(),
            name: name.to_string(),
            fact,
            image,
            category: UNKNOWN.to_string(),
            habitat: UNKNOWN.to_string(),
            diet: UNKNOWN.to_string(),
            lifespan: UNKNOWN.to_string(),
            danger: UNKNOWN.to_string(),
            source_url: Some(page.url.clone()),
        })
    }

    /// Maps an entry of the bundled dataset
    pub fn from_local(local: &LocalAnimal) -> Option<Self> {
        let name = non_empty(Some(local.name))?;

        Some(Self {
            id: local_id(name),
            name: name.to_string(),
            fact: local.fact.to_string(),
            image: local.image.to_string(),
            category: or_unknown(Some(local.category)),
            habitat: or_unknown(Some(local.habitat)),
            diet: or_unknown(Some(local.diet)),
            lifespan: or_unknown(Some(local.lifespan)),
            danger: or_unknown(Some(local.danger)),
            source_url: None,
        })
    }

    /// Whether the record still needs an image
    pub fn lacks_image(&self) -> bool {
        self.image.trim().is_empty()
    }
}

/// Stable id for a bundled entry, e.g. `local-red-fox`
fn local_id(name: &str) -> String {
    let slug: String = name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    format!("local-{}", slug)
}

impl fmt::Display for CanonicalAnimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        if !self.fact.is_empty() {
            writeln!(f, "  {}", self.fact)?;
        }
        writeln!(f, "  Category: {}", self.category)?;
        writeln!(f, "  Habitat:  {}", self.habitat)?;
        writeln!(f, "  Diet:     {}", self.diet)?;
        writeln!(f, "  Lifespan: {}", self.lifespan)?;
        writeln!(f, "  Danger:   {}", self.danger)?;
        if !self.image.is_empty() {
            writeln!(f, "  Image:    {}", self.image)?;
        }
        if let Some(url) = &self.source_url {
            writeln!(f, "  Source:   {}", url)?;
        }
        Ok(())
    }
}
