//! Index builder properties.

use super::{catalog_strategy, text_strategy};
use crate::common::assert_index_well_formed;
use dalil::{build_inverted_index, build_inverted_index_parallel, RecordStore, SearchField};
use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

/// Field maps with buckets reduced to id sets, ignoring version and repeats.
fn shape(index: &dalil::InvertedIndex) -> Vec<BTreeMap<String, BTreeSet<u32>>> {
    index
        .fields()
        .map(|(_, map)| {
            map.terms()
                .iter()
                .map(|(key, bucket)| (key.clone(), bucket.iter().map(|id| id.0).collect::<BTreeSet<u32>>()))
                .collect()
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Rebuilding from an equal catalog yields the same keys and id sets.
    #[test]
    fn prop_rebuild_is_idempotent(records in catalog_strategy()) {
        let a = build_inverted_index(&RecordStore::new(records.clone()));
        let b = build_inverted_index(&RecordStore::new(records));
        prop_assert_ne!(a.version(), b.version());
        prop_assert_eq!(shape(&a), shape(&b));
    }

    /// Both builders produce the same index for the same snapshot.
    #[test]
    fn prop_parallel_equals_sequential(records in catalog_strategy()) {
        let store = RecordStore::new(records);
        prop_assert_eq!(build_inverted_index(&store), build_inverted_index_parallel(&store));
    }

    /// Every index is well-formed against its store.
    #[test]
    fn prop_well_formed(records in catalog_strategy()) {
        let store = RecordStore::new(records);
        assert_index_well_formed(&store);
    }

    /// Tokens are lowercase, whitespace-free and at least three chars.
    #[test]
    fn prop_tokens_respect_threshold(text in text_strategy()) {
        for token in dalil::tokenize(&text) {
            prop_assert!(token.chars().count() >= dalil::INDEX_MIN_TOKEN_CHARS);
            prop_assert!(!token.chars().any(char::is_whitespace));
            prop_assert_eq!(token.to_lowercase(), token.clone());
        }
    }

    /// Postings count equals the number of token occurrences.
    #[test]
    fn prop_postings_count_occurrences(records in catalog_strategy()) {
        let store = RecordStore::new(records);
        let index = build_inverted_index(&store);
        let expected: usize = store
            .records()
            .iter()
            .map(|r| dalil::tokenize(&r.name).len())
            .sum();
        prop_assert_eq!(index.field(SearchField::Name).posting_count(), expected);
    }
}
