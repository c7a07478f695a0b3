//! Degenerate stores and queries never fail.

use crate::common::{index_for, make_record, sample_store};
use dalil::{
    build_inverted_index, search, search_records, search_with_min, Category, Establishment,
    Governorate, RecordId, RecordStore, SearchFilters,
};

#[test]
fn test_empty_store() {
    let (_, index) = index_for(Vec::new());
    assert!(index.is_empty());
    assert_eq!(index.term_count(), 0);
    assert!(search(&index, "anything").is_empty());
}

#[test]
fn test_short_and_blank_queries() {
    let store = sample_store();
    let index = build_inverted_index(&store);

    for query in ["", " ", "a", "  b  ", "\t\n"] {
        assert!(search(&index, query).is_empty(), "query {:?}", query);
    }
}

#[test]
fn test_two_chars_reach_through_prefix_only() {
    let (_, index) = index_for(vec![make_record("1", "Le Bardo")]);

    // "le" is too short to be indexed, so it cannot match itself.
    assert!(search(&index, "le").is_empty());
    assert_eq!(search(&index, "ba"), vec![RecordId(0)]);
}

#[test]
fn test_single_char_tokens_dropped_from_longer_query() {
    let (_, index) = index_for(vec![make_record("1", "Bardo")]);
    // "x" is dropped, "bar" matches
    assert_eq!(search(&index, "x bar"), vec![RecordId(0)]);
    // only single-char tokens left
    assert!(search(&index, "x y z").is_empty());
}

#[test]
fn test_record_with_missing_fields_indexes() {
    let record: Establishment = serde_json::from_str(r#"{ "id": "1", "name": "Pharmacie" }"#).unwrap();
    let (_, index) = index_for(vec![record]);
    assert_eq!(search(&index, "pharmacie"), vec![RecordId(0)]);
}

#[test]
fn test_missing_codes_are_not_invented() {
    let store =
        RecordStore::from_json_str(r#"[{ "id": "1", "name": "Garage Ennasr", "address": "Sfax" }]"#)
            .unwrap();
    let index = build_inverted_index(&store);

    assert!(search(&index, "tunis").is_empty());
    assert!(search(&index, "tun").is_empty());
    assert!(search(&index, "divers").is_empty());
    assert_eq!(search(&index, "sfax"), vec![RecordId(0)]);

    let in_tunis = SearchFilters {
        governorate: Some(Governorate::Tunis),
        ..Default::default()
    };
    assert!(in_tunis.apply(&index, &store).is_empty());

    let divers = SearchFilters {
        category: Some(Category::Divers),
        ..Default::default()
    };
    assert!(divers.apply(&index, &store).is_empty());

    assert_eq!(SearchFilters::default().apply(&index, &store), vec![RecordId(0)]);
}

#[test]
fn test_record_with_only_short_words() {
    let (_, index) = index_for(vec![make_record("1", "Au Le La")]);
    assert_eq!(index.field(dalil::SearchField::Name).len(), 0);
    assert!(search(&index, "au").is_empty());
}

#[test]
fn test_unicode_counts_chars_not_bytes() {
    // "été" is three chars but five bytes: it is indexed.
    let (_, index) = index_for(vec![make_record("1", "Glaces été")]);
    assert_eq!(search(&index, "été"), vec![RecordId(0)]);
    // "é" is one char, two bytes: too short as a query.
    assert!(search(&index, "é").is_empty());
}

#[test]
fn test_custom_minimum_query_length() {
    let (_, index) = index_for(vec![make_record("1", "Bardo")]);
    assert!(search_with_min(&index, "bar", 4).is_empty());
    assert_eq!(search_with_min(&index, "bard", 4), vec![RecordId(0)]);
}

#[test]
fn test_index_from_other_snapshot_resolves_nothing() {
    let store = sample_store();
    let index = build_inverted_index(&store);
    let copy = RecordStore::new(store.records().to_vec());
    assert!(search_records(&index, &copy, "bardo").is_empty());
    assert_eq!(search_records(&index, &store, "bardo").len(), 1);
}
