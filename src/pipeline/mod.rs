//! Multi-source resolution pipeline
//!
//! Combines the source clients, the page-info cache and the bundled dataset
//! into the operations the presentation layer calls. Every operation is total:
//! source failures are absorbed and turned into fallbacks, and the only way to
//! get nothing back from a random lookup is an empty bundled dataset.

mod config;
mod strategy;

pub use config::{CacheMode, PipelineConfig, DEFAULT_SEARCH_LIMIT};
pub use strategy::{random_fact_order, Outcome, Strategy};

use std::sync::Arc;

use futures::future::{join, join_all};
use rand::Rng;
use tracing::{debug, warn};

use crate::cache::{FileCache, MemoryCache, PAGE_CACHE_KEY};
use crate::data::local::{self, LocalAnimal};
use crate::data::{
    CanonicalAnimal, CommonsClient, PageCache, PageInfo, RandomAnimalClient, WikipediaClient,
};
use crate::fetcher::{HttpFetcher, JsonFetcher, SourceError};
use crate::image::resolve_image;

/// Query used to sample a random species from Wikipedia
const SAMPLE_QUERY: &str = "animal";

/// Orchestrates the sources behind the public lookups
pub struct Pipeline {
    config: PipelineConfig,
    random_source: RandomAnimalClient,
    wikipedia: WikipediaClient,
    commons: CommonsClient,
    dataset: &'static [LocalAnimal],
}

impl Pipeline {
    /// Creates a pipeline talking to the live sources
    ///
    /// Uses the bundled dataset and the cache selected by `config.cache`. If
    /// no cache directory can be determined the cache is kept in memory.
    pub fn new(config: PipelineConfig) -> Result<Self, SourceError> {
        let fetcher = Arc::new(HttpFetcher::with_timeout(config.request_timeout)?);
        let cache = build_cache(&config.cache);
        Ok(Self::with_parts(config, fetcher, cache, local::all_animals()))
    }

    /// Creates a pipeline from explicit parts
    pub fn with_parts(
        config: PipelineConfig,
        fetcher: Arc<dyn JsonFetcher>,
        cache: PageCache,
        dataset: &'static [LocalAnimal],
    ) -> Self {
        let wikipedia = WikipediaClient::new(fetcher.clone())
            .with_cache(cache)
            .with_ttl(config.cache_ttl);

        Self {
            random_source: RandomAnimalClient::new(fetcher.clone()),
            commons: CommonsClient::new(fetcher),
            wikipedia,
            dataset,
            config,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// The bundled dataset this pipeline falls back to
    pub fn dataset(&self) -> &'static [LocalAnimal] {
        self.dataset
    }

    /// Searches Wikipedia for species matching `query`
    ///
    /// Every hit is resolved concurrently: page info and a Commons image are
    /// fetched in parallel per title, titles without a page are dropped, and
    /// the survivors keep the search ranking order. A failed lookup only
    /// removes its own title.
    pub async fn search_species(&self, query: &str) -> Vec<CanonicalAnimal> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        let hits = self.wikipedia.search(query, self.config.search_limit).await;
        if hits.is_empty() {
            debug!(query, "no wikipedia hits");
            return Vec::new();
        }

        let lookups = hits.iter().map(|hit| self.resolve_title(&hit.title));
        join_all(lookups).await.into_iter().flatten().collect()
    }

    /// Resolves one exact Wikipedia title into a record
    pub async fn species_by_title(&self, title: &str) -> Option<CanonicalAnimal> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }
        self.resolve_title(title).await
    }

    async fn resolve_title(&self, title: &str) -> Option<CanonicalAnimal> {
        let (page, commons_image): (Option<PageInfo>, String) = join(
            self.wikipedia.page_info(title),
            self.commons.fetch_image(title),
        )
        .await;

        let page = page?;
        let image = resolve_image(&page.thumbnail, &commons_image);
        CanonicalAnimal::from_page(&page, image)
    }

    /// Returns one random animal
    ///
    /// Walks the strategies from [`random_fact_order`] and stops at the first
    /// that finds something. `None` only when the bundled dataset is empty.
    pub async fn random_fact(&self) -> Option<CanonicalAnimal> {
        for strategy in random_fact_order(self.config.skip_random_source) {
            match self.run(strategy).await {
                Outcome::Found(animal) => {
                    debug!(?strategy, name = %animal.name, "random fact resolved");
                    return Some(animal);
                }
                Outcome::Absent => debug!(?strategy, "strategy found nothing"),
                Outcome::Failed(reason) => warn!(?strategy, %reason, "strategy failed"),
            }
        }
        None
    }

    async fn run(&self, strategy: Strategy) -> Outcome<CanonicalAnimal> {
        match strategy {
            Strategy::RandomApi => self.from_random_api().await,
            Strategy::WikipediaSample => {
                pick_random(self.search_species(SAMPLE_QUERY).await).into()
            }
            Strategy::LocalDataset => self.pick_local(self.dataset.iter().collect()).await.into(),
        }
    }

    async fn from_random_api(&self) -> Outcome<CanonicalAnimal> {
        let raw = match self.random_source.fetch_random().await {
            Ok(raw) => raw,
            Err(e) => return Outcome::Failed(e.to_string()),
        };
        match CanonicalAnimal::from_random(&raw) {
            Some(animal) => Outcome::Found(self.ensure_image(animal, &[]).await),
            None => Outcome::Failed("random animal record has no name".to_string()),
        }
    }

    /// Returns a random bundled animal of `category`
    ///
    /// Category matching is exact and case-insensitive. An unknown category
    /// falls back to [`Pipeline::random_fact`].
    pub async fn random_by_category(&self, category: &str) -> Option<CanonicalAnimal> {
        let matches = local::in_category(self.dataset, category);
        if matches.is_empty() {
            debug!(category, "no bundled animals in category");
            return self.random_fact().await;
        }

        match self.pick_local(matches).await {
            Some(animal) => Some(animal),
            None => self.random_fact().await,
        }
    }

    /// Searches by name, preferring live results
    ///
    /// Falls back to a substring match over bundled names and common names,
    /// backfilling missing images for all local matches concurrently.
    pub async fn search_by_name(&self, query: &str) -> Vec<CanonicalAnimal> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        let live = self.search_species(query).await;
        if !live.is_empty() {
            return live;
        }

        debug!(query, "falling back to bundled dataset");
        let backfills = local::find_by_name(self.dataset, query)
            .into_iter()
            .filter_map(|entry| {
                CanonicalAnimal::from_local(entry).map(|animal| (animal, entry.common_names))
            })
            .map(|(animal, alternates)| self.ensure_image(animal, alternates));
        join_all(backfills).await
    }

    /// Picks one usable entry uniformly at random and backfills its image
    async fn pick_local(&self, candidates: Vec<&LocalAnimal>) -> Option<CanonicalAnimal> {
        let usable: Vec<(CanonicalAnimal, &'static [&'static str])> = candidates
            .into_iter()
            .filter_map(|entry| {
                CanonicalAnimal::from_local(entry).map(|animal| (animal, entry.common_names))
            })
            .collect();

        let (animal, alternates) = pick_random(usable)?;
        Some(self.ensure_image(animal, alternates).await)
    }

    /// Fills in a missing image from a species search
    ///
    /// Tries the record's own name, then each alternate name, taking the
    /// image of the first search result. The record is returned unchanged if
    /// nothing turns up.
    async fn ensure_image(
        &self,
        mut animal: CanonicalAnimal,
        alternates: &[&str],
    ) -> CanonicalAnimal {
        if !animal.lacks_image() {
            return animal;
        }

        let mut names = vec![animal.name.clone()];
        names.extend(alternates.iter().map(|n| n.to_string()));

        for name in names {
            let first = self.search_species(&name).await.into_iter().next();
            if let Some(image) = first.map(|a| a.image).filter(|img| !img.is_empty()) {
                debug!(name = %animal.name, via = %name, "image backfilled");
                animal.image = image;
                return animal;
            }
        }
        animal
    }
}

/// Builds the page cache for `mode`
fn build_cache(mode: &CacheMode) -> PageCache {
    match mode {
        CacheMode::Memory => Arc::new(MemoryCache::<Option<PageInfo>>::new()),
        CacheMode::Persistent { dir: Some(dir) } => Arc::new(
            FileCache::<Option<PageInfo>>::with_dir(dir.clone(), PAGE_CACHE_KEY),
        ),
        CacheMode::Persistent { dir: None } => {
            match FileCache::<Option<PageInfo>>::new(PAGE_CACHE_KEY) {
                Some(cache) => Arc::new(cache),
                None => {
                    warn!("no cache directory available, caching in memory");
                    Arc::new(MemoryCache::<Option<PageInfo>>::new())
                }
            }
        }
    }
}

/// Removes and returns a uniformly random element
fn pick_random<T>(mut items: Vec<T>) -> Option<T> {
    if items.is_empty() {
        return None;
    }
    let index = rand::thread_rng().gen_range(0..items.len());
    Some(items.swap_remove(index))
}
