//! Query engine laws.

use super::{catalog_strategy, record_tokens, word_strategy};
use dalil::{build_inverted_index, search, RecordId, RecordStore};
use proptest::prelude::*;
use std::collections::BTreeSet;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Blank and one-char queries return nothing.
    #[test]
    fn prop_short_queries_empty(records in catalog_strategy(), c in "[a-z]", pad in " {0,3}") {
        let index = build_inverted_index(&RecordStore::new(records));
        prop_assert!(search(&index, "").is_empty());
        prop_assert!(search(&index, &pad).is_empty());
        let padded = format!("{}{}{}", pad, c, pad);
        prop_assert!(search(&index, &padded).is_empty());
    }

    /// Every indexed token finds the record it came from.
    #[test]
    fn prop_exact_match_complete(records in catalog_strategy()) {
        let store = RecordStore::new(records);
        let index = build_inverted_index(&store);
        for (id, record) in store.iter_with_ids() {
            for token in record_tokens(record) {
                let hits = search(&index, &token);
                prop_assert!(hits.contains(&id), "{:?} missed record {:?}", token, id);
            }
        }
    }

    /// Every prefix of two or more chars finds the record too.
    #[test]
    fn prop_prefix_law(records in catalog_strategy()) {
        let store = RecordStore::new(records);
        let index = build_inverted_index(&store);
        for (id, record) in store.iter_with_ids() {
            for token in record_tokens(record) {
                let chars: Vec<char> = token.chars().collect();
                for len in 2..chars.len() {
                    let prefix: String = chars[..len].iter().collect();
                    prop_assert!(
                        search(&index, &prefix).contains(&id),
                        "prefix {:?} of {:?} missed record {:?}", prefix, token, id
                    );
                }
            }
        }
    }

    /// Two-token queries return the union of the single-token queries.
    #[test]
    fn prop_tokens_or_combined(
        records in catalog_strategy(),
        a in word_strategy(),
        b in word_strategy(),
    ) {
        let index = build_inverted_index(&RecordStore::new(records));
        let combined: BTreeSet<RecordId> = search(&index, &format!("{} {}", a, b)).into_iter().collect();

        let mut union: BTreeSet<RecordId> = BTreeSet::new();
        for word in [&a, &b] {
            if word.chars().count() >= dalil::QUERY_MIN_TOKEN_CHARS {
                union.extend(search(&index, word));
            }
        }
        prop_assert_eq!(combined, union);
    }

    /// Results are unique, sorted and in range.
    #[test]
    fn prop_results_sorted_unique(records in catalog_strategy(), query in "[a-z ]{0,12}") {
        let store = RecordStore::new(records);
        let index = build_inverted_index(&store);
        let hits = search(&index, &query);
        prop_assert!(hits.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(hits.iter().all(|id| id.as_usize() < store.len()));
    }

    /// Tokens only count once however they are repeated.
    #[test]
    fn prop_repeating_query_is_noop(records in catalog_strategy(), word in word_strategy()) {
        let index = build_inverted_index(&RecordStore::new(records));
        prop_assert_eq!(
            search(&index, &word),
            search(&index, &format!("{} {} {}", word, word.to_uppercase(), word))
        );
    }
}
