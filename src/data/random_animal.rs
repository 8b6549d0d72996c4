//! Random animal API client
//!
//! Fetches one random animal from the zoo-animal-api. The host is slow to
//! wake up and sometimes unreachable, so the fetcher's fixed timeout bounds
//! every call.

use std::sync::Arc;

use serde::{Deserialize, Deserializer};

use crate::fetcher::{JsonFetcher, SourceError};

/// Endpoint returning one random animal per call
pub const RANDOM_ANIMAL_URL: &str = "https://zoo-animal-api.herokuapp.com/animals/rand";

/// Raw record returned by the random animal API
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RandomAnimal {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub latin_name: Option<String>,
    #[serde(default)]
    pub animal_type: Option<String>,
    #[serde(default)]
    pub habitat: Option<String>,
    #[serde(default)]
    pub diet: Option<String>,
    /// Sent as a string by the live API, as a number by some mirrors
    #[serde(default, deserialize_with = "string_or_number")]
    pub lifespan: Option<String>,
    #[serde(default)]
    pub image_link: Option<String>,
    #[serde(default)]
    pub geo_range: Option<String>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Client for the random animal API
#[derive(Clone)]
pub struct RandomAnimalClient {
    fetcher: Arc<dyn JsonFetcher>,
    url: String,
}

impl RandomAnimalClient {
    pub fn new(fetcher: Arc<dyn JsonFetcher>) -> Self {
        Self {
            fetcher,
            url: RANDOM_ANIMAL_URL.to_string(),
        }
    }

    /// Fetches one random animal
    ///
    /// # Returns
    /// * `Ok(RandomAnimal)` - The raw record
    /// * `Err(SourceError)` - Network error, timeout, non-2xx, malformed body
    ///   or a record with neither a common nor a latin name
    pub async fn fetch_random(&self) -> Result<RandomAnimal, SourceError> {
        let body = self.fetcher.get_json(&self.url, &[]).await?;
        let animal: RandomAnimal = serde_json::from_value(body)?;

        let has_name =
            |field: &Option<String>| field.as_deref().is_some_and(|n| !n.trim().is_empty());
        if !has_name(&animal.name) && !has_name(&animal.latin_name) {
            return Err(SourceError::NotFound("random animal without a name".to_string()));
        }
        Ok(animal)
    }
}
