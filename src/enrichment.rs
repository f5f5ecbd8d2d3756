//! Enrichment cache: price and rating per card, fetched lazily from upstream
//!
//! Entries live in the persistent store keyed by the card's canonical name. A
//! lookup serves a complete entry straight from the store; otherwise it fetches
//! whatever is missing, tolerating either source failing, and writes the result
//! back in the background.
//!
//! Write-backs are not coordinated between requests. Two concurrent lookups of
//! the same partial entry both fetch the missing field and both write; the last
//! write wins, and what each caller saw may differ from what was persisted.

use crate::catalog::CardRecord;
use crate::error::{Error, Result, StoreError};
use crate::sources::{PriceSource, RatingSource};
use crate::store::SharedStore;
use mtg_common::{Price, RatingInfo};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};

/// Completed write-backs kept until someone drains them; extra ones are dropped
const OUTCOME_BUFFER: usize = 256;

/// Price and rating for one card. Either may be missing until fetched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<RatingInfo>,
}

impl EnrichmentEntry {
    /// Both fields present
    pub fn is_complete(&self) -> bool {
        self.price.is_some() && self.rating.is_some()
    }
}

/// Result of one background write-back
#[derive(Debug)]
pub struct WriteOutcome {
    pub key: String,
    pub result: std::result::Result<(), StoreError>,
}

pub struct EnrichmentCache {
    store: Arc<SharedStore>,
    prices: Arc<dyn PriceSource>,
    ratings: Arc<dyn RatingSource>,
    outcomes_tx: mpsc::Sender<WriteOutcome>,
    outcomes_rx: Mutex<mpsc::Receiver<WriteOutcome>>,
}

impl EnrichmentCache {
    pub fn new(
        store: Arc<SharedStore>,
        prices: Arc<dyn PriceSource>,
        ratings: Arc<dyn RatingSource>,
    ) -> Self {
        let (outcomes_tx, outcomes_rx) = mpsc::channel(OUTCOME_BUFFER);
        Self {
            store,
            prices,
            ratings,
            outcomes_tx,
            outcomes_rx: Mutex::new(outcomes_rx),
        }
    }

    /// Price and rating for `card`, fetching whatever the store is missing.
    ///
    /// Upstream failures are logged and leave the field empty; only a store
    /// failure or a corrupt stored entry is returned as an error.
    pub async fn get_entry(&self, card: &CardRecord) -> Result<EnrichmentEntry> {
        let key = card.name.as_str();
        let mut entry = self.load(key)?;

        if entry.is_complete() {
            log::debug!("Cache hit: {}", key);
            return Ok(entry);
        }

        let need_price = entry.price.is_none();
        let need_rating = entry.rating.is_none();

        let (price, rating) = tokio::join!(
            async {
                if need_price {
                    Some(self.prices.fetch_price(card).await)
                } else {
                    None
                }
            },
            async {
                if need_rating {
                    Some(self.ratings.fetch_rating(card).await)
                } else {
                    None
                }
            }
        );

        let mut dirty = false;
        match price {
            Some(Ok(price)) => {
                entry.price = Some(price);
                dirty = true;
            }
            Some(Err(e)) => log::warn!("Failed to fetch price for {}: {}", key, e),
            None => {}
        }
        match rating {
            Some(Ok(rating)) => {
                entry.rating = Some(rating);
                dirty = true;
            }
            Some(Err(e)) => log::warn!("Failed to fetch rating for {}: {}", key, e),
            None => {}
        }

        if dirty {
            self.schedule_write(key, &entry);
        }

        Ok(entry)
    }

    /// Price for `card`, or [`Error::FieldUnavailable`] if it could not be fetched
    pub async fn price_only(&self, card: &CardRecord) -> Result<Price> {
        self.get_entry(card)
            .await?
            .price
            .ok_or_else(|| Error::FieldUnavailable {
                card: card.name.clone(),
                field: "price",
            })
    }

    /// Completed write-backs not yet collected. Never blocks.
    pub fn drain_write_outcomes(&self) -> Vec<WriteOutcome> {
        let mut outcomes = Vec::new();
        if let Ok(mut rx) = self.outcomes_rx.try_lock() {
            while let Ok(outcome) = rx.try_recv() {
                outcomes.push(outcome);
            }
        }
        outcomes
    }

    /// Wait for the next write-back to complete.
    /// Waits indefinitely if no write is pending.
    pub async fn next_write_outcome(&self) -> Option<WriteOutcome> {
        self.outcomes_rx.lock().await.recv().await
    }

    fn load(&self, key: &str) -> Result<EnrichmentEntry> {
        match self.store.get(key)? {
            None => Ok(EnrichmentEntry::default()),
            Some(bytes) => serde_json::from_slice(&bytes).map_err(|source| {
                Error::StorageCorruption {
                    key: key.to_string(),
                    source,
                }
            }),
        }
    }

    /// Persist `entry` without making the caller wait for it
    fn schedule_write(&self, key: &str, entry: &EnrichmentEntry) {
        let bytes = match serde_json::to_vec(entry) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::error!("Failed to encode entry for {}: {}", key, e);
                return;
            }
        };

        let store = Arc::clone(&self.store);
        let outcomes = self.outcomes_tx.clone();
        let key = key.to_string();

        tokio::task::spawn_blocking(move || {
            let result = store.set(&key, &bytes);
            match &result {
                Ok(()) => log::debug!("Stored entry for {}", key),
                Err(e) => log::error!("Error writing {} to cache: {}", key, e),
            }
            if outcomes.try_send(WriteOutcome { key, result }).is_err() {
                log::debug!("Write outcome buffer full, dropping outcome");
            }
        });
    }
}

#[cfg(test)]
#[path = "enrichment_tests.rs"]
mod tests;
