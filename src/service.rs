//! Card lookups combining the static catalog with cached enrichment data

use crate::catalog::{CardCatalog, CardRecord};
use crate::enrichment::{EnrichmentCache, EnrichmentEntry};
use crate::error::{Error, Result};
use crate::query;
use mtg_common::Price;
use serde::Serialize;
use std::sync::Arc;

/// Catalog fields plus whatever price/rating data is available
#[derive(Debug, Clone, Serialize)]
pub struct RichInfo {
    #[serde(flatten)]
    pub card: CardRecord,
    #[serde(flatten)]
    pub entry: EnrichmentEntry,
}

/// Entry point for request handlers; owns the catalog and the enrichment cache
pub struct PriceService {
    catalog: Arc<CardCatalog>,
    cache: EnrichmentCache,
}

impl PriceService {
    pub fn new(catalog: Arc<CardCatalog>, cache: EnrichmentCache) -> Self {
        Self { catalog, cache }
    }

    pub fn catalog(&self) -> &CardCatalog {
        &self.catalog
    }

    pub fn cache(&self) -> &EnrichmentCache {
        &self.cache
    }

    /// Catalog record for a free-text card name
    pub fn card_info(&self, name: &str) -> Option<CardRecord> {
        self.catalog.lookup(name).cloned()
    }

    /// Current market price, fetching it if not cached
    pub async fn price_for_card(&self, name: &str) -> Result<Price> {
        let card = self.find(name)?;
        self.cache.price_only(card).await
    }

    /// Catalog record combined with the available enrichment fields
    pub async fn rich_info(&self, name: &str) -> Result<RichInfo> {
        let card = self.find(name)?;
        let entry = self.cache.get_entry(card).await?;
        Ok(RichInfo {
            card: card.clone(),
            entry,
        })
    }

    /// Cards matching a query, in catalog order
    pub fn search(&self, query: &str) -> Vec<&CardRecord> {
        query::search(&self.catalog, query)
    }

    fn find(&self, name: &str) -> Result<&CardRecord> {
        self.catalog
            .lookup(name)
            .ok_or_else(|| Error::CardNotFound(name.to_string()))
    }
}
