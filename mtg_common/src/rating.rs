//! Community rating scraped from Gatherer.

use serde::{Deserialize, Serialize};

/// Community rating and the number of votes behind it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RatingInfo {
    pub community_rating: f64,
    pub community_votes: u32,
}
