//! Upstream data sources for card enrichment
//!
//! Each source scrapes one website. They fail independently: a price outage
//! never prevents a rating lookup and vice versa.

mod gatherer;
mod tcgplayer;

pub use gatherer::{GathererClient, DEFAULT_BASE_URL as DEFAULT_RATING_URL};
pub use tcgplayer::{TcgPriceClient, DEFAULT_BASE_URL as DEFAULT_PRICE_URL};

use crate::catalog::CardRecord;
use crate::error::FetchError;
use async_trait::async_trait;
use mtg_common::{Price, RatingInfo};

/// User agent sent with every upstream request
const USER_AGENT: &str = "mtgprice/0.1";

/// Looks up the market price of a card
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn fetch_price(&self, card: &CardRecord) -> Result<Price, FetchError>;
}

/// Looks up the community rating of a card
#[async_trait]
pub trait RatingSource: Send + Sync {
    async fn fetch_rating(&self, card: &CardRecord) -> Result<RatingInfo, FetchError>;
}
