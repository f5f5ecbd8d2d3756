//! Static card catalog loaded from a bulk AllSets-style JSON file
//!
//! The catalog is built once at startup and never mutated afterwards, so it
//! can be shared across request handlers behind an `Arc` without locking.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::io::{BufReader, Read};
use std::path::Path;

/// Separators used when indexing multi-face cards under their joined names
const FACE_SEPARATORS: [&str; 3] = [" & ", " / ", " // "];

/// A single card from the bulk dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRecord {
    pub name: String,
    /// Names of every face for multi-faced cards (split, flip, double-faced)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub names: Vec<String>,
    #[serde(default)]
    pub mana_cost: String,
    /// Converted mana cost. There is one card with a cost of .5
    #[serde(default)]
    pub cmc: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiverseid: Option<u64>,
    #[serde(default)]
    pub rarity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toughness: Option<String>,
    #[serde(rename = "type", default)]
    pub type_line: String,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    /// Oracle rules text
    #[serde(default)]
    pub text: String,
}

impl CardRecord {
    /// Name to send upstream: faces joined with `sep` for multi-face cards
    pub fn joined_name(&self, sep: &str) -> String {
        if self.names.is_empty() {
            self.name.clone()
        } else {
            self.names.join(sep)
        }
    }
}

#[derive(Debug, Deserialize)]
struct SetData {
    #[serde(default)]
    cards: Vec<CardRecord>,
}

/// Immutable name -> card mapping
#[derive(Debug, Default)]
pub struct CardCatalog {
    /// Distinct cards in first-seen order
    cards: Vec<CardRecord>,
    /// Lower-cased, normalized names and face aliases -> position in `cards`
    index: HashMap<String, usize>,
}

impl CardCatalog {
    /// Load the catalog from a bulk data file on disk
    pub fn load(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let catalog = Self::from_reader(BufReader::new(file))?;
        log::info!(
            "Loaded card data from {}: {} cards, {} lookup keys",
            path.display(),
            catalog.len(),
            catalog.key_count()
        );
        Ok(catalog)
    }

    /// Parse a bulk dataset (set code -> `{ "cards": [...] }`)
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let sets: BTreeMap<String, SetData> =
            serde_json::from_reader(reader).map_err(Error::DataFormat)?;
        Ok(Self::from_cards(
            sets.into_values().flat_map(|set| set.cards),
        ))
    }

    /// Build the catalog from already-parsed cards, normalizing names.
    /// A later card with the same name replaces the earlier one in place.
    pub fn from_cards(cards: impl IntoIterator<Item = CardRecord>) -> Self {
        let mut catalog = Self::default();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for mut card in cards {
            card.name = normalize_card_name(&card.name);
            card.names = card.names.iter().map(|n| normalize_card_name(n)).collect();

            let pos = *positions
                .entry(card.name.clone())
                .or_insert(catalog.cards.len());

            if !card.names.is_empty() {
                for sep in FACE_SEPARATORS {
                    catalog
                        .index
                        .insert(card.names.join(sep).to_lowercase(), pos);
                }
            }
            catalog.index.insert(card.name.to_lowercase(), pos);

            if pos == catalog.cards.len() {
                catalog.cards.push(card);
            } else {
                catalog.cards[pos] = card;
            }
        }

        catalog
    }

    /// Look up a card by free-text name. Case and ligature/apostrophe style are ignored.
    pub fn lookup(&self, name: &str) -> Option<&CardRecord> {
        self.index.get(&lookup_key(name)).map(|&pos| &self.cards[pos])
    }

    /// Every distinct card once, in catalog order
    pub fn all_cards(&self) -> &[CardRecord] {
        &self.cards
    }

    /// Number of distinct cards
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of lookup keys, including multi-face aliases
    pub fn key_count(&self) -> usize {
        self.index.len()
    }
}

/// Canonicalize the "Æ" ligature and the typographic apostrophe to ASCII
pub fn normalize_card_name(name: &str) -> String {
    name.replace('Æ', "Ae")
        .replace('æ', "ae")
        .replace('\u{2019}', "'")
}

fn lookup_key(name: &str) -> String {
    normalize_card_name(name).to_lowercase()
}

#[cfg(test)]
pub use tests::make_test_card;

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
