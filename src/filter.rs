// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Structured filters combined with free-text hits.
//!
//! The query engine answers text only. Category, governorate, rating and flag
//! predicates live here and are ANDed with the text hits by the caller:
//!
//! ```text
//! search(index, q) ──┐
//!                    ├─→ intersect ─→ shown hits
//! filters.apply() ───┘
//! ```
//!
//! Category and governorate use the index's equality maps as the candidate
//! set; the remaining predicates are checked per record.

use crate::inverted::InvertedIndex;
use crate::types::{Category, Establishment, Governorate, RecordId, RecordStore};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Optional predicates over a record. `None` and `false` mean "any".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchFilters {
    pub category: Option<Category>,
    /// Exact subcategory label.
    pub subcategory: Option<String>,
    pub governorate: Option<Governorate>,
    /// Tunis neighbourhood code.
    pub district: Option<String>,
    pub min_rating: Option<f32>,
    /// Only verified records.
    pub verified: bool,
    /// Only premium records.
    pub premium: bool,
}

impl SearchFilters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Change the category. A subcategory belongs to one category, so it is cleared.
    pub fn set_category(&mut self, category: Option<Category>) {
        self.category = category;
        self.subcategory = None;
    }

    /// Change the governorate. Districts only exist inside Tunis.
    pub fn set_governorate(&mut self, governorate: Option<Governorate>) {
        if governorate.as_ref() != Some(&Governorate::Tunis) {
            self.district = None;
        }
        self.governorate = governorate;
    }

    /// Number of active predicates.
    pub fn active_count(&self) -> usize {
        [
            self.category.is_some(),
            self.subcategory.is_some(),
            self.governorate.is_some(),
            self.district.is_some(),
            self.min_rating.is_some(),
            self.verified,
            self.premium,
        ]
        .iter()
        .filter(|active| **active)
        .count()
    }

    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether `record` passes every active predicate.
    pub fn matches(&self, record: &Establishment) -> bool {
        if let Some(category) = &self.category {
            if &record.category != category {
                return false;
            }
        }
        if let Some(subcategory) = &self.subcategory {
            if &record.subcategory != subcategory {
                return false;
            }
        }
        if let Some(governorate) = &self.governorate {
            if &record.governorate != governorate {
                return false;
            }
        }
        if let Some(district) = &self.district {
            if record.district.as_deref() != Some(district.as_str()) {
                return false;
            }
        }
        if let Some(min_rating) = self.min_rating {
            if record.rating < min_rating {
                return false;
            }
        }
        if self.verified && !record.verified {
            return false;
        }
        if self.premium && !record.premium {
            return false;
        }
        true
    }

    /// Every record of `store` passing the filters, in store order.
    ///
    /// `index` must be built from `store`; otherwise nothing is returned.
    pub fn apply(&self, index: &InvertedIndex, store: &RecordStore) -> Vec<RecordId> {
        if index.version() != store.version() {
            return Vec::new();
        }

        // Narrowest equality map available, else every record.
        let candidates: Vec<RecordId> = match (&self.category, &self.governorate) {
            (Some(category), Some(governorate)) => {
                let by_category = index.with_category(category.code());
                let by_governorate = index.with_governorate(governorate.code());
                if by_category.len() <= by_governorate.len() {
                    by_category.to_vec()
                } else {
                    by_governorate.to_vec()
                }
            }
            (Some(category), None) => index.with_category(category.code()).to_vec(),
            (None, Some(governorate)) => index.with_governorate(governorate.code()).to_vec(),
            (None, None) => store.iter_with_ids().map(|(id, _)| id).collect(),
        };

        candidates
            .into_iter()
            .filter(|id| store.get(*id).is_some_and(|record| self.matches(record)))
            .collect()
    }
}

/// Ids present in both lists, in the order of `text_hits`.
pub fn intersect(text_hits: &[RecordId], filter_hits: &[RecordId]) -> Vec<RecordId> {
    let allowed: HashSet<RecordId> = filter_hits.iter().copied().collect();
    text_hits
        .iter()
        .copied()
        .filter(|id| allowed.contains(id))
        .collect()
}
