//! TCGplayer prices via the magictcgprices JSON API

use super::{PriceSource, USER_AGENT};
use crate::catalog::CardRecord;
use crate::error::FetchError;
use async_trait::async_trait;
use mtg_common::{parse_prices, Price};

pub const DEFAULT_BASE_URL: &str = "http://magictcgprices.appspot.com";

/// Client for `/api/tcgplayer/price.json`, which answers with `["$low", "$mid", "$high"]`
pub struct TcgPriceClient {
    client: reqwest::Client,
    base_url: String,
}

impl TcgPriceClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Default for TcgPriceClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PriceSource for TcgPriceClient {
    async fn fetch_price(&self, card: &CardRecord) -> Result<Price, FetchError> {
        // Split cards are listed as "Fire // Ice"
        let name = card.joined_name(" // ");
        let url = format!(
            "{}/api/tcgplayer/price.json?cardname={}",
            self.base_url,
            urlencoding::encode(&name)
        );

        log::info!("Fetching TCG price: {}", name);

        let response = self
            .client
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::HttpStatus(response.status()));
        }

        let body = response.text().await?;
        let raw: [String; 3] = serde_json::from_str(&body).map_err(|e| {
            log::warn!("Error parsing prices for {}: {} - {}", name, e, body);
            FetchError::Parse(format!("unexpected price response: {}", e))
        })?;

        Ok(parse_prices(&raw.map(|p| p.trim().to_string()))?)
    }
}
