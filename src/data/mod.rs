//! Source adapters and data models
//!
//! Each external source gets its own client module. Clients share nothing but
//! the HTTP seam and, for Wikipedia page info, the cache store. The `animal`
//! module maps every source record onto the one shape callers see.

pub mod animal;
pub mod commons;
pub mod local;
pub mod random_animal;
pub mod wikipedia;

pub use animal::{CanonicalAnimal, UNKNOWN};
pub use commons::CommonsClient;
pub use local::{all_animals, LocalAnimal};
pub use random_animal::{RandomAnimal, RandomAnimalClient};
pub use wikipedia::{PageCache, PageInfo, SearchHit, WikipediaClient};
