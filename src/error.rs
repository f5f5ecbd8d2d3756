//! Error types for mtgprice

use mtg_common::PriceFormatError;
use thiserror::Error;

/// Unified error type for catalog, cache and service operations
#[derive(Debug, Error)]
pub enum Error {
    /// Bulk card data file could not be read
    #[error("could not read card data: {0}")]
    Io(#[from] std::io::Error),
    /// Bulk card data is not the expected set -> cards structure
    #[error("could not parse card data: {0}")]
    DataFormat(#[source] serde_json::Error),
    /// A stored cache entry could not be decoded
    #[error("stored entry for {key:?} is corrupt: {source}")]
    StorageCorruption {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    /// A field was never fetched successfully and nothing is cached
    #[error("{field} unavailable for {card:?}")]
    FieldUnavailable { card: String, field: &'static str },
    /// No card with this name in the catalog
    #[error("card not found: {0:?}")]
    CardNotFound(String),
    /// Persistent store backend failed
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl Error {
    /// Whether the error means "nothing to show" rather than a server fault
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::CardNotFound(_) | Error::FieldUnavailable { .. })
    }
}

/// A single upstream fetch failed. Recovered inside the cache, never returned from it.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP error status code
    #[error("HTTP error: {0}")]
    HttpStatus(reqwest::StatusCode),
    /// Response body did not contain what we expected
    #[error("parse error: {0}")]
    Parse(String),
    /// A price string on the page was malformed
    #[error(transparent)]
    PriceFormat(#[from] PriceFormatError),
}

/// Persistent key/value store failures
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("store lock poisoned")]
    LockPoisoned,
}

/// Result alias for mtgprice operations
pub type Result<T> = std::result::Result<T, Error>;
