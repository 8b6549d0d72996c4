//! Fallback strategies and their tagged results

/// One way of producing a random animal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Random animal API, image backfilled from Wikipedia
    RandomApi,
    /// Uniform pick from a generic Wikipedia species search
    WikipediaSample,
    /// Uniform pick from the bundled dataset, image backfilled
    LocalDataset,
}

/// Result of running one strategy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The strategy produced a value
    Found(T),
    /// The strategy ran cleanly but had nothing to offer
    Absent,
    /// The strategy's source failed; the reason is only logged
    Failed(String),
}

impl<T> From<Option<T>> for Outcome<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Outcome::Found(v),
            None => Outcome::Absent,
        }
    }
}

/// Strategy order for a random fact
///
/// The random animal API is left out when the caller declared it blocked.
pub fn random_fact_order(skip_random_source: bool) -> Vec<Strategy> {
    let mut order = Vec::with_capacity(3);
    if !skip_random_source {
        order.push(Strategy::RandomApi);
    }
    order.push(Strategy::WikipediaSample);
    order.push(Strategy::LocalDataset);
    order
}
