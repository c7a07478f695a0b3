//! Shared test utilities and fixtures.

#![allow(dead_code)]

use dalil::{
    build_inverted_index, build_inverted_index_parallel, check_inverted_index_well_formed,
    Establishment, InvertedIndex, RecordId, RecordStore,
};
use std::collections::BTreeSet;

// Re-export canonical test utilities from dalil::testing
#[allow(unused_imports)]
pub use dalil::testing::{
    clinique_pasteur, make_full_record, make_record, sample_records, sample_store,
};

/// Catalog fixture in the wrapped `{"establishments": [...]}` form.
pub const CATALOG_FIXTURE: &str = "tests/fixtures/catalog.json";

/// Keystroke script fixture for the debounce scenario.
pub const KEYSTROKES_FIXTURE: &str = "tests/fixtures/keystrokes.txt";

/// Build a fresh store and its index.
pub fn index_for(records: Vec<Establishment>) -> (RecordStore, InvertedIndex) {
    let store = RecordStore::new(records);
    let index = build_inverted_index(&store);
    (store, index)
}

/// Assert that both builders agree and the index is well-formed.
pub fn assert_index_well_formed(store: &RecordStore) -> InvertedIndex {
    let index = build_inverted_index(store);
    assert!(
        check_inverted_index_well_formed(&index, store),
        "sequential index is not well-formed"
    );
    let parallel = build_inverted_index_parallel(store);
    assert!(
        check_inverted_index_well_formed(&parallel, store),
        "parallel index is not well-formed"
    );
    index
}

/// Record names for ids, in the given order.
pub fn names<'a>(store: &'a RecordStore, ids: &[RecordId]) -> Vec<&'a str> {
    ids.iter()
        .filter_map(|id| store.get(*id))
        .map(|record| record.name.as_str())
        .collect()
}

/// Ids as a set, for order-independent comparisons.
pub fn id_set(ids: &[RecordId]) -> BTreeSet<RecordId> {
    ids.iter().copied().collect()
}
