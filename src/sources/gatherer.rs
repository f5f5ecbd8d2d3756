//! Community ratings scraped from Gatherer card pages

use super::{RatingSource, USER_AGENT};
use crate::catalog::CardRecord;
use crate::error::FetchError;
use async_trait::async_trait;
use mtg_common::RatingInfo;
use regex::Regex;
use std::sync::LazyLock;

pub const DEFAULT_BASE_URL: &str = "http://gatherer.wizards.com";

static RATING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"class="textRatingValue">([\d.]*)</span>"#).expect("rating pattern is valid")
});
static VOTES_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"class="totalVotesValue">(\d*)</span>"#).expect("votes pattern is valid")
});

/// Client for Gatherer's card detail pages
pub struct GathererClient {
    client: reqwest::Client,
    base_url: String,
}

impl GathererClient {
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

impl Default for GathererClient {
    fn default() -> Self {
        Self::new()
    }
}

fn capture(re: &Regex, html: &str, what: &str) -> Result<String, FetchError> {
    re.captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| FetchError::Parse(format!("no {} on card page", what)))
}

/// Pull the rating and vote count out of a card details page
fn parse_rating_page(html: &str) -> Result<RatingInfo, FetchError> {
    let rating = capture(&RATING_RE, html, "rating")?;
    let votes = capture(&VOTES_RE, html, "vote count")?;

    Ok(RatingInfo {
        community_rating: rating
            .parse()
            .map_err(|_| FetchError::Parse(format!("invalid rating {:?}", rating)))?,
        community_votes: votes
            .parse()
            .map_err(|_| FetchError::Parse(format!("invalid vote count {:?}", votes)))?,
    })
}

#[async_trait]
impl RatingSource for GathererClient {
    async fn fetch_rating(&self, card: &CardRecord) -> Result<RatingInfo, FetchError> {
        // Gatherer names multi-face cards "Fire & Ice"
        let name = card.joined_name(" & ");
        let url = format!(
            "{}/Pages/Card/Details.aspx?name={}",
            self.base_url,
            urlencoding::encode(&name)
        );

        log::info!("Fetching Gatherer rating: {}", name);

        let response = self
            .client
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::HttpStatus(response.status()));
        }

        parse_rating_page(&response.text().await?)
    }
}
