//! Tokenizer: turns free text into a normalized `TermSet`.
//!
//! Composes to NFC, lowercases, treats anything that is not a letter (any
//! script), digit or combining mark as a separator, and keeps tokens of at
//! least `MIN_TOKEN_CHARS` characters.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Shortest token kept, counted in chars so accented words are not penalised.
pub const MIN_TOKEN_CHARS: usize = 3;

/// Deduplicated vocabulary extracted from one text.
///
/// Backed by a sorted set: enumeration is deterministic, but callers must not
/// treat the order as meaningful.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TermSet(BTreeSet<String>);

impl TermSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, term: &str) -> bool {
        self.0.contains(term)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().map(String::as_str)
    }

    /// Terms present in both sets, in lexicographic order.
    pub fn intersection(&self, other: &TermSet) -> Vec<String> {
        self.0.intersection(&other.0).cloned().collect()
    }

    /// Keeps only the terms for which `keep` returns true.
    pub fn retain(mut self, mut keep: impl FnMut(&str) -> bool) -> Self {
        self.0.retain(|t| keep(t));
        self
    }

    pub(crate) fn insert(&mut self, term: String) -> bool {
        self.0.insert(term)
    }
}

impl FromIterator<String> for TermSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        TermSet(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<&'a str> for TermSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        TermSet(iter.into_iter().map(str::to_string).collect())
    }
}

impl IntoIterator for TermSet {
    type Item = String;
    type IntoIter = std::collections::btree_set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Splits `text` into normalized terms. Never fails; empty input gives an
/// empty set.
pub fn tokenize(text: &str) -> TermSet {
    // NFC first so "o\u{301}" and "ó" yield the same term
    let normalized: String = text
        .nfc()
        .collect::<String>()
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || is_combining_mark(c) {
                c
            } else {
                ' '
            }
        })
        .collect();

    let mut terms = TermSet::new();
    for token in normalized.split_whitespace() {
        if token.chars().count() >= MIN_TOKEN_CHARS {
            terms.insert(token.to_string());
        }
    }
    terms
}

/// Collapses whitespace runs to single spaces and trims both ends.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
