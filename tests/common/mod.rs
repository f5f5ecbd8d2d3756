//! Shared fixtures for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use mtg_common::{Price, RatingInfo};
use mtgprice::sources::{PriceSource, RatingSource};
use mtgprice::{
    CardCatalog, CardRecord, EnrichmentCache, FetchError, MemoryStore, PriceService, SharedStore,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub const ALL_SETS_JSON: &str = r#"{
    "LEA": {
        "cards": [
            {
                "name": "Lightning Bolt",
                "manaCost": "{R}",
                "cmc": 1,
                "rarity": "Common",
                "type": "Instant",
                "types": ["Instant"],
                "colors": ["Red"],
                "text": "Lightning Bolt deals 3 damage to any target."
            },
            {
                "name": "Sol Ring",
                "manaCost": "{1}",
                "cmc": 1,
                "rarity": "Uncommon",
                "type": "Artifact",
                "types": ["Artifact"],
                "text": "{T}: Add {C}{C}."
            }
        ]
    },
    "DST": {
        "cards": [
            {
                "name": "Æther Vial",
                "manaCost": "{1}",
                "cmc": 1,
                "rarity": "Uncommon",
                "type": "Artifact",
                "types": ["Artifact"],
                "text": "At the beginning of your upkeep, you may put a charge counter on Æther Vial."
            }
        ]
    },
    "RTR": {
        "cards": [
            {
                "name": "Azorius Charm",
                "manaCost": "{W}{U}",
                "cmc": 2,
                "rarity": "Uncommon",
                "type": "Instant",
                "types": ["Instant"],
                "colors": ["White", "Blue"],
                "text": "Choose one — Creatures you control gain lifelink until end of turn; or draw a card."
            }
        ]
    }
}"#;

pub const STUB_PRICE: Price = Price {
    low: 25,
    mid: 110,
    high: 400,
};

pub const STUB_RATING: RatingInfo = RatingInfo {
    community_rating: 4.5,
    community_votes: 12,
};

/// Price source answering with [`STUB_PRICE`], or failing when `up` is false
pub struct StubPrices {
    pub up: bool,
    pub calls: AtomicUsize,
}

#[async_trait]
impl PriceSource for StubPrices {
    async fn fetch_price(&self, _card: &CardRecord) -> Result<Price, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.up {
            Ok(STUB_PRICE)
        } else {
            Err(FetchError::Parse("price source down".to_string()))
        }
    }
}

/// Rating source answering with [`STUB_RATING`], or failing when `up` is false
pub struct StubRatings {
    pub up: bool,
    pub calls: AtomicUsize,
}

#[async_trait]
impl RatingSource for StubRatings {
    async fn fetch_rating(&self, _card: &CardRecord) -> Result<RatingInfo, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.up {
            Ok(STUB_RATING)
        } else {
            Err(FetchError::Parse("rating source down".to_string()))
        }
    }
}

pub fn sample_catalog() -> CardCatalog {
    CardCatalog::from_reader(ALL_SETS_JSON.as_bytes()).unwrap()
}

/// Service over the sample catalog with stub upstreams and an in-memory store
pub fn stub_service(prices_up: bool, ratings_up: bool) -> Arc<PriceService> {
    let cache = EnrichmentCache::new(
        Arc::new(SharedStore::new(MemoryStore::new())),
        Arc::new(StubPrices {
            up: prices_up,
            calls: AtomicUsize::new(0),
        }),
        Arc::new(StubRatings {
            up: ratings_up,
            calls: AtomicUsize::new(0),
        }),
    );
    Arc::new(PriceService::new(Arc::new(sample_catalog()), cache))
}
