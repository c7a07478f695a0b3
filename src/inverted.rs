// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Inverted index construction.
//!
//! One pass over the record store fills five token maps (one per
//! [`SearchField`]) plus two equality maps for category and governorate codes.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **COMPLETE**: every record containing a token of length > 2 in a field
//!    appears in that field's bucket for the token.
//! 2. **NO_DANGLING**: every id in every bucket is `< record_count`. The index
//!    is rebuilt from scratch per store snapshot, never patched.
//! 3. **NON_EMPTY**: every key has at least one entry.
//! 4. **MULTISET**: buckets are not deduplicated. "free free parking" puts the
//!    record in the `free` bucket twice; the query engine deduplicates.
//! 5. **STORE_ORDER**: bucket entries appear in store order. Both build paths
//!    produce identical indexes.

use crate::types::{RecordId, RecordStore, SearchField, StoreVersion};
use crate::utils::tokenize;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;
use std::time::Instant;
use tracing::debug;

/// Record ids for one token. May hold repeats.
pub type Bucket = Vec<RecordId>;

/// Token → bucket map for a single field.
///
/// Keys are kept sorted so the prefix scan can walk a contiguous key range.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldIndex {
    terms: BTreeMap<String, Bucket>,
}

impl FieldIndex {
    /// Exact bucket for a token.
    pub fn get(&self, token: &str) -> Option<&Bucket> {
        self.terms.get(token)
    }

    /// Every (key, bucket) whose key starts with `prefix`, including the exact key.
    pub fn prefixed<'a>(
        &'a self,
        prefix: &str,
    ) -> impl Iterator<Item = (&'a String, &'a Bucket)> + 'a {
        let owned = prefix.to_string();
        self.terms
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(move |(key, _)| key.starts_with(owned.as_str()))
    }

    pub fn terms(&self) -> &BTreeMap<String, Bucket> {
        &self.terms
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Total bucket entries, repeats included.
    pub fn posting_count(&self) -> usize {
        self.terms.values().map(Vec::len).sum()
    }

    fn push(&mut self, token: String, id: RecordId) {
        self.terms.entry(token).or_default().push(id);
    }
}

/// The complete search index for one [`RecordStore`] snapshot.
///
/// Holds record positions, never records. Resolve ids through the store the
/// index was built from (`version()` tells which).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvertedIndex {
    version: StoreVersion,
    record_count: usize,
    fields: [FieldIndex; SearchField::COUNT],
    by_category: HashMap<String, Bucket>,
    by_governorate: HashMap<String, Bucket>,
}

impl InvertedIndex {
    pub fn version(&self) -> StoreVersion {
        self.version
    }

    pub fn record_count(&self) -> usize {
        self.record_count
    }

    pub fn field(&self, field: SearchField) -> &FieldIndex {
        &self.fields[field.slot()]
    }

    /// All five token maps, paired with their field.
    pub fn fields(&self) -> impl Iterator<Item = (SearchField, &FieldIndex)> {
        SearchField::ALL.iter().map(move |f| (*f, &self.fields[f.slot()]))
    }

    /// Records whose category code equals `code`.
    pub fn with_category(&self, code: &str) -> &[RecordId] {
        self.by_category.get(code).map_or(&[], Vec::as_slice)
    }

    /// Records whose governorate code equals `code`.
    pub fn with_governorate(&self, code: &str) -> &[RecordId] {
        self.by_governorate.get(code).map_or(&[], Vec::as_slice)
    }

    /// Distinct tokens across all token maps.
    pub fn term_count(&self) -> usize {
        self.fields.iter().map(FieldIndex::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }
}

/// Tokens one record contributes, grouped by field, in field then text order.
fn record_tokens(record: &crate::types::Establishment) -> Vec<(SearchField, String)> {
    let mut out = Vec::new();
    for token in tokenize(&record.name) {
        out.push((SearchField::Name, token));
    }
    // Each service is tokenized on its own: "free parking" yields both words.
    for service in &record.services {
        for token in tokenize(service) {
            out.push((SearchField::Services, token));
        }
    }
    for token in tokenize(&record.address) {
        out.push((SearchField::Address, token));
    }
    for token in tokenize(&record.subcategory) {
        out.push((SearchField::Subcategory, token));
    }
    if !record.governorate.is_unset() {
        for token in tokenize(record.governorate.code()) {
            out.push((SearchField::Governorate, token));
        }
    }
    out
}

/// Reduce phase shared by both builders: fold per-record tokens in store order.
fn assemble(
    store: &RecordStore,
    per_record: impl IntoIterator<Item = (RecordId, Vec<(SearchField, String)>)>,
) -> InvertedIndex {
    let mut fields: [FieldIndex; SearchField::COUNT] = Default::default();
    for (id, tokens) in per_record {
        for (field, token) in tokens {
            fields[field.slot()].push(token, id);
        }
    }

    let mut by_category: HashMap<String, Bucket> = HashMap::new();
    let mut by_governorate: HashMap<String, Bucket> = HashMap::new();
    for (id, record) in store.iter_with_ids() {
        // Records without a code are reachable only by an empty filter.
        if !record.category.is_unset() {
            by_category
                .entry(record.category.code().to_string())
                .or_default()
                .push(id);
        }
        if !record.governorate.is_unset() {
            by_governorate
                .entry(record.governorate.code().to_string())
                .or_default()
                .push(id);
        }
    }

    InvertedIndex {
        version: store.version(),
        record_count: store.len(),
        fields,
        by_category,
        by_governorate,
    }
}

/// Build an inverted index from a record store.
///
/// O(total tokens). An empty store yields an empty index.
pub fn build_inverted_index(store: &RecordStore) -> InvertedIndex {
    let started = Instant::now();
    let index = assemble(
        store,
        store
            .iter_with_ids()
            .map(|(id, record)| (id, record_tokens(record))),
    );
    log_build(&index, started, false);
    index
}

/// Build an inverted index using parallel map-reduce.
///
/// 1. **Map phase**: tokenize records in parallel (one task per record)
/// 2. **Reduce phase**: merge in store order, so the result equals
///    [`build_inverted_index`] exactly
#[cfg(feature = "parallel")]
pub fn build_inverted_index_parallel(store: &RecordStore) -> InvertedIndex {
    let started = Instant::now();
    let per_record: Vec<(RecordId, Vec<(SearchField, String)>)> = store
        .records()
        .par_iter()
        .enumerate()
        .map(|(pos, record)| (RecordId(pos as u32), record_tokens(record)))
        .collect();
    let index = assemble(store, per_record);
    log_build(&index, started, true);
    index
}

/// Sequential version for builds without rayon.
#[cfg(not(feature = "parallel"))]
pub fn build_inverted_index_parallel(store: &RecordStore) -> InvertedIndex {
    build_inverted_index(store)
}

/// Pick the build path by store size.
pub fn build_for_size(store: &RecordStore, parallel_threshold: usize) -> InvertedIndex {
    if store.len() >= parallel_threshold {
        build_inverted_index_parallel(store)
    } else {
        build_inverted_index(store)
    }
}

fn log_build(index: &InvertedIndex, started: Instant, parallel: bool) {
    debug!(
        version = %index.version(),
        records = index.record_count(),
        names = index.field(SearchField::Name).len(),
        services = index.field(SearchField::Services).len(),
        addresses = index.field(SearchField::Address).len(),
        subcategories = index.field(SearchField::Subcategory).len(),
        governorates = index.field(SearchField::Governorate).len(),
        parallel,
        elapsed_us = started.elapsed().as_micros() as u64,
        "built inverted index"
    );
}

/// Check if an inverted index is well-formed against its store.
pub fn check_inverted_index_well_formed(index: &InvertedIndex, store: &RecordStore) -> bool {
    if index.version() != store.version() || index.record_count() != store.len() {
        return false;
    }

    for (field, map) in index.fields() {
        for (term, bucket) in map.terms() {
            // NON_EMPTY
            if bucket.is_empty() {
                return false;
            }
            // Keys obey the index threshold
            if term.chars().count() < crate::utils::INDEX_MIN_TOKEN_CHARS {
                return false;
            }
            for id in bucket {
                // NO_DANGLING
                let Some(record) = store.get(*id) else {
                    return false;
                };
                // The record really has the token in that field
                let has = match field {
                    SearchField::Name => tokenize(&record.name).contains(term),
                    SearchField::Services => record
                        .services
                        .iter()
                        .any(|s| tokenize(s).contains(term)),
                    SearchField::Address => tokenize(&record.address).contains(term),
                    SearchField::Subcategory => tokenize(&record.subcategory).contains(term),
                    SearchField::Governorate => {
                        tokenize(record.governorate.code()).contains(term)
                    }
                };
                if !has {
                    return false;
                }
            }
            // STORE_ORDER
            if bucket.windows(2).any(|w| w[0] > w[1]) {
                return false;
            }
        }
    }

    // Equality maps: only set codes, and each id under its own record's code.
    for code in index.by_category.keys() {
        if code.is_empty() {
            return false;
        }
    }
    for (code, bucket) in &index.by_governorate {
        if code.is_empty() {
            return false;
        }
        if bucket
            .iter()
            .any(|id| store.get(*id).map(|r| r.governorate.code()) != Some(code.as_str()))
        {
            return false;
        }
    }

    true
}
