//! Market prices expressed in US cents.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Low / mid / high market price for a card, in cents of a US dollar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Price {
    pub low: u64,
    pub mid: u64,
    pub high: u64,
}

/// A price string that is not of the form `$<digits>.<two digits>`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceFormatError {
    #[error("invalid price {0:?}: missing leading '$'")]
    MissingDollar(String),
    #[error("invalid price {0:?}: expected cents at the end")]
    MissingCents(String),
    #[error("invalid price {0:?}: not a number")]
    NotANumber(String),
}

/// Parses a string in the format `"$1.00"` to `100`.
pub fn parse_price(p: &str) -> Result<u64, PriceFormatError> {
    let Some(amount) = p.strip_prefix('$') else {
        return Err(PriceFormatError::MissingDollar(p.to_string()));
    };

    let Some((dollars, cents)) = amount.split_once('.') else {
        return Err(PriceFormatError::MissingCents(p.to_string()));
    };

    if cents.len() != 2 || !cents.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PriceFormatError::MissingCents(p.to_string()));
    }
    if dollars.is_empty() || !dollars.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PriceFormatError::NotANumber(p.to_string()));
    }

    format!("{dollars}{cents}")
        .parse::<u64>()
        .map_err(|_| PriceFormatError::NotANumber(p.to_string()))
}

/// Parses a `[low, mid, high]` triple of price strings.
pub fn parse_prices(raw: &[String; 3]) -> Result<Price, PriceFormatError> {
    Ok(Price {
        low: parse_price(&raw[0])?,
        mid: parse_price(&raw[1])?,
        high: parse_price(&raw[2])?,
    })
}
