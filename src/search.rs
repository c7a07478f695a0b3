// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Free-text lookup over an [`InvertedIndex`].
//!
//! For every query token and every field map, two lookups run:
//!
//! 1. **Exact**: the bucket keyed by the token itself.
//! 2. **Prefix**: every bucket whose key starts with the token.
//!
//! Tokens combine with OR. Hits are deduplicated by record id in a local
//! accumulator and returned in store order. No ranking, no scoring.
//!
//! # Known limitation
//!
//! The prefix scan is linear in the number of keys sharing the prefix, and a
//! two-letter query can touch a large part of the vocabulary. This is meant for
//! catalogs of thousands of records, not millions.

use crate::inverted::InvertedIndex;
use crate::types::{Establishment, RecordId, RecordStore};
use crate::utils::tokenize_query;
use std::collections::HashSet;

/// Queries shorter than this (after trimming) return nothing.
pub const MIN_QUERY_CHARS: usize = 2;

/// Search the index with the default minimum query length.
///
/// Never fails: empty, short, or unmatched queries return an empty vector.
pub fn search(index: &InvertedIndex, query: &str) -> Vec<RecordId> {
    search_with_min(index, query, MIN_QUERY_CHARS)
}

/// Search with an explicit minimum query length.
pub fn search_with_min(index: &InvertedIndex, query: &str, min_query_chars: usize) -> Vec<RecordId> {
    let trimmed = query.trim();
    if trimmed.is_empty() || trimmed.chars().count() < min_query_chars {
        return Vec::new();
    }

    let tokens = tokenize_query(trimmed);
    let mut hits: HashSet<RecordId> = HashSet::new();

    for token in &tokens {
        for (_, field) in index.fields() {
            // Exact lookup. Only tokens of 3+ chars can have a bucket.
            if let Some(bucket) = field.get(token) {
                hits.extend(bucket.iter().copied());
            }
            // Prefix scan over keys that extend the token.
            for (key, bucket) in field.prefixed(token) {
                if key != token {
                    hits.extend(bucket.iter().copied());
                }
            }
        }
    }

    let mut ids: Vec<RecordId> = hits.into_iter().collect();
    ids.sort_unstable();
    ids
}

/// Search and resolve hits to records of the snapshot the index was built from.
///
/// Returns nothing if `store` is not that snapshot.
pub fn search_records<'a>(
    index: &InvertedIndex,
    store: &'a RecordStore,
    query: &str,
) -> Vec<&'a Establishment> {
    if index.version() != store.version() {
        return Vec::new();
    }
    let ids = search(index, query);
    ids.iter().filter_map(|id| store.get(*id)).collect()
}

/// Which index keys a query token reaches, for diagnostics.
///
/// Returns `(field, key)` pairs in field order then key order.
pub fn matched_terms<'a>(
    index: &'a InvertedIndex,
    query: &str,
) -> Vec<(crate::types::SearchField, &'a str)> {
    let mut out = Vec::new();
    for token in tokenize_query(query.trim()) {
        for (field_name, field) in index.fields() {
            for (key, _) in field.prefixed(&token) {
                out.push((field_name, key.as_str()));
            }
        }
    }
    out.sort_unstable();
    out.dedup();
    out
}
