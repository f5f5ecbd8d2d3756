//! Shared MTG types used by the price service and its upstream clients.

pub mod color;
pub mod price;
pub mod rating;

pub use color::Color;
pub use price::{parse_price, parse_prices, Price, PriceFormatError};
pub use rating::RatingInfo;
