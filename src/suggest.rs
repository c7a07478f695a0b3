// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Type-ahead suggestions for a settled query.
//!
//! Suggestions are display strings, assembled in this order:
//!
//! 1. names of the first hits
//! 2. distinct subcategories of the hits
//! 3. translated category labels containing the query
//! 4. translated governorate labels containing the query
//!
//! Deduplicated by first occurrence, then truncated to the total cap.

use crate::config::SearchConfig;
use crate::types::{Category, Establishment, Governorate};
use crate::utils::{contains_folded, fold};
use std::collections::HashSet;

/// Looks up the display label for a category or governorate code.
///
/// Implementations should return the key itself when no label exists.
pub trait Translator {
    fn translate(&self, key: &str) -> String;
}

/// Labels are the raw codes.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTranslator;

impl Translator for IdentityTranslator {
    fn translate(&self, key: &str) -> String {
        key.to_string()
    }
}

impl<F> Translator for F
where
    F: Fn(&str) -> String,
{
    fn translate(&self, key: &str) -> String {
        self(key)
    }
}

/// Caps applied while assembling suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestionLimits {
    pub names: usize,
    pub subcategories: usize,
    pub total: usize,
}

impl Default for SuggestionLimits {
    fn default() -> Self {
        Self::from(&SearchConfig::default())
    }
}

impl From<&SearchConfig> for SuggestionLimits {
    fn from(config: &SearchConfig) -> Self {
        Self {
            names: config.suggestion_names,
            subcategories: config.suggestion_subcategories,
            total: config.max_suggestions,
        }
    }
}

/// Insertion-ordered set of suggestion strings.
struct SuggestionSet {
    seen: HashSet<String>,
    items: Vec<String>,
}

impl SuggestionSet {
    fn new() -> Self {
        Self {
            seen: HashSet::new(),
            items: Vec::new(),
        }
    }

    fn add(&mut self, value: &str) -> bool {
        if value.is_empty() || self.seen.contains(value) {
            return false;
        }
        self.seen.insert(value.to_string());
        self.items.push(value.to_string());
        true
    }
}

/// Build the suggestion list for `query` given its hits in display order.
pub fn build_suggestions<'a>(
    query: &str,
    hits: impl IntoIterator<Item = &'a Establishment>,
    translator: &dyn Translator,
    limits: SuggestionLimits,
) -> Vec<String> {
    let needle = fold(query.trim());
    if needle.is_empty() {
        return Vec::new();
    }

    let hits: Vec<&Establishment> = hits.into_iter().collect();
    let mut set = SuggestionSet::new();

    for record in hits.iter().take(limits.names) {
        set.add(&record.name);
    }

    let mut subcategories: Vec<&str> = Vec::new();
    for record in &hits {
        let sub = record.subcategory.as_str();
        if !sub.is_empty() && !subcategories.contains(&sub) {
            subcategories.push(sub);
        }
    }
    for sub in subcategories.into_iter().take(limits.subcategories) {
        set.add(sub);
    }

    for category in &Category::ALL {
        let label = translator.translate(category.code());
        if contains_folded(&label, &needle) {
            set.add(&label);
        }
    }

    for governorate in &Governorate::ALL {
        let label = translator.translate(governorate.code());
        if contains_folded(&label, &needle) {
            set.add(&label);
        }
    }

    let mut items = set.items;
    items.truncate(limits.total);
    items
}
