//! Card search query language
//!
//! A query is a whitespace-separated list of tokens, matched case-insensitively:
//!
//! - `o:<text>`: rules text contains `<text>`
//! - `t:<text>`: type line contains `<text>`
//! - `c:<letters>`: card has each color (`w`, `u`, `b`, `r`, `g`, or `m` for multicolored)
//! - `c!<letters>`: card has none of the colors
//! - anything else: card name contains the word
//!
//! A query starting with `!` matches one card by its exact name.

use crate::catalog::{CardCatalog, CardRecord};
use mtg_common::Color;
use std::fmt;

/// What a color filter tests for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorKind {
    Color(Color),
    /// More than one color
    Multicolor,
}

/// A single color constraint, optionally negated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorFilter {
    pub kind: ColorKind,
    pub negated: bool,
}

impl ColorFilter {
    fn from_letter(letter: char, negated: bool) -> Option<Self> {
        let kind = match letter {
            'm' => ColorKind::Multicolor,
            other => ColorKind::Color(Color::from_letter(other)?),
        };
        Some(Self { kind, negated })
    }

    fn present_in(&self, card: &CardRecord) -> bool {
        match self.kind {
            ColorKind::Multicolor => card.colors.len() > 1,
            ColorKind::Color(color) => card
                .colors
                .iter()
                .any(|c| c.eq_ignore_ascii_case(color.name())),
        }
    }
}

impl fmt::Display for ColorFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            f.write_str("!")?;
        }
        match self.kind {
            ColorKind::Multicolor => f.write_str("m"),
            ColorKind::Color(color) => write!(f, "{}", color.letter()),
        }
    }
}

/// One lexed query token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Oracle(String),
    Type(String),
    Colors(Vec<ColorFilter>),
    Name(String),
}

/// Split an already lower-cased query into tokens. Unknown color letters are dropped.
pub fn tokenize(query: &str) -> Vec<Token> {
    query
        .split_whitespace()
        .map(|word| {
            if let Some(text) = word.strip_prefix("o:") {
                Token::Oracle(text.to_string())
            } else if let Some(text) = word.strip_prefix("t:") {
                Token::Type(text.to_string())
            } else if let Some(letters) = word.strip_prefix("c:") {
                Token::Colors(color_filters(letters, false))
            } else if let Some(letters) = word.strip_prefix("c!") {
                Token::Colors(color_filters(letters, true))
            } else {
                Token::Name(word.to_string())
            }
        })
        .collect()
}

fn color_filters(letters: &str, negated: bool) -> Vec<ColorFilter> {
    letters
        .chars()
        .filter_map(|letter| ColorFilter::from_letter(letter, negated))
        .collect()
}

/// A compiled query. The default (empty) query matches every card.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub name: Vec<String>,
    pub rule: Vec<String>,
    pub types: Vec<String>,
    pub colors: Vec<ColorFilter>,
    /// Set by a leading `!`; all other filters are then ignored
    pub exact_name: Option<String>,
}

impl Query {
    /// Compile query text. Never fails: malformed tokens degrade to no-op filters.
    pub fn compile(text: &str) -> Self {
        let text = text.trim().to_lowercase();

        if let Some(exact) = text.strip_prefix('!') {
            let exact = exact.trim();
            return Self {
                exact_name: (!exact.is_empty()).then(|| exact.to_string()),
                ..Self::default()
            };
        }

        let mut query = Self::default();
        for token in tokenize(&text) {
            match token {
                Token::Oracle(text) => query.rule.push(text),
                Token::Type(text) => query.types.push(text),
                Token::Colors(filters) => query.colors.extend(filters),
                Token::Name(text) => query.name.push(text),
            }
        }
        query
    }

    /// Whether every constraint holds for `card`.
    /// Checked in order name, rules text, type, color; stops at the first failure.
    pub fn matches(&self, card: &CardRecord) -> bool {
        if let Some(exact) = &self.exact_name {
            return card.name.to_lowercase() == *exact;
        }

        if !self.name.is_empty() {
            let name = card.name.to_lowercase();
            let faces: Vec<String> = card.names.iter().map(|n| n.to_lowercase()).collect();
            for needle in &self.name {
                if !contains_with_fallback(&name, &faces, needle) {
                    log::trace!("{}: name {:?}", card.name, needle);
                    return false;
                }
            }
        }

        if !self.rule.is_empty() {
            let text = card.text.to_lowercase();
            for needle in &self.rule {
                if !text.contains(needle.as_str()) {
                    log::trace!("{}: rule {:?}", card.name, needle);
                    return false;
                }
            }
        }

        if !self.types.is_empty() {
            let type_line = card.type_line.to_lowercase();
            let tokens: Vec<String> = card.types.iter().map(|t| t.to_lowercase()).collect();
            for needle in &self.types {
                if !contains_with_fallback(&type_line, &tokens, needle) {
                    log::trace!("{}: type {:?}", card.name, needle);
                    return false;
                }
            }
        }

        for filter in &self.colors {
            if filter.present_in(card) == filter.negated {
                log::trace!("{}: color {}", card.name, filter);
                return false;
            }
        }

        true
    }
}

fn contains_with_fallback(primary: &str, aliases: &[String], needle: &str) -> bool {
    primary.contains(needle) || aliases.iter().any(|alias| alias.contains(needle))
}

/// Compile `text` once and return every matching card, in catalog order
pub fn search<'a>(catalog: &'a CardCatalog, text: &str) -> Vec<&'a CardRecord> {
    let query = Query::compile(text);
    catalog
        .all_cards()
        .iter()
        .filter(|card| query.matches(card))
        .collect()
}

#[cfg(test)]
#[path = "query_tests.rs"]
mod tests;
