//! MTG Price - card prices, ratings and search
//!
//! Serves market prices and community ratings for Magic cards. Both come from
//! slow upstream websites and are cached in a local store once fetched. Card
//! metadata comes from a static bulk data file and can be searched with a small
//! query language.

pub mod catalog;
pub mod enrichment;
pub mod error;
pub mod query;
pub mod service;
pub mod sources;
pub mod store;
pub mod web;

pub use catalog::{normalize_card_name, CardCatalog, CardRecord};
pub use enrichment::{EnrichmentCache, EnrichmentEntry, WriteOutcome};
pub use error::{Error, FetchError, Result, StoreError};
pub use query::{search, Query};
pub use service::{PriceService, RichInfo};
pub use store::{KeyValueStore, MemoryStore, SharedStore, SqliteStore};
