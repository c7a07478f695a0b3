//! Exact and prefix lookups across every field map.

use crate::common::{clinique_pasteur, id_set, index_for, names, sample_store};
use dalil::{build_inverted_index, search, search_records, RecordId};

#[test]
fn test_end_to_end_single_record() {
    let (_, index) = index_for(vec![clinique_pasteur()]);

    assert_eq!(search(&index, "pasteur"), vec![RecordId(0)]);
    assert_eq!(search(&index, "urg"), vec![RecordId(0)]);
    assert!(search(&index, "zzz").is_empty());
}

#[test]
fn test_every_field_is_searchable() {
    let (_, index) = index_for(vec![clinique_pasteur()]);

    // name, services, address, subcategory, governorate
    for query in ["clinique", "consultation", "bourguiba", "généraliste", "tunis"] {
        assert_eq!(search(&index, query), vec![RecordId(0)], "query {:?}", query);
    }
}

#[test]
fn test_multi_word_service_indexes_each_word() {
    let store = sample_store();
    let index = build_inverted_index(&store);

    assert_eq!(names(&store, &search(&index, "parking")), vec!["Hotel Les Oliviers Palace"]);
    assert_eq!(names(&store, &search(&index, "free")), vec!["Hotel Les Oliviers Palace"]);
}

#[test]
fn test_tokens_are_or_combined() {
    let store = sample_store();
    let index = build_inverted_index(&store);

    let both = id_set(&search(&index, "dentiste taxi"));
    let mut union = id_set(&search(&index, "dentiste"));
    union.extend(search(&index, "taxi"));

    assert_eq!(both, union);
    assert_eq!(both.len(), 2);
}

#[test]
fn test_case_is_folded_both_ways() {
    let store = sample_store();
    let index = build_inverted_index(&store);

    assert_eq!(search(&index, "BARDO"), search(&index, "bardo"));
    assert_eq!(names(&store, &search(&index, "BaRdO")), vec!["Musee du Bardo"]);
}

#[test]
fn test_governorate_code_matches_by_prefix() {
    let store = sample_store();
    let index = build_inverted_index(&store);

    // Two records sit in Sfax; "sfaxienne" also starts with "sfax".
    assert_eq!(
        names(&store, &search(&index, "sfa")),
        vec!["Hotel Les Oliviers Palace", "Boulangerie Sfaxienne"]
    );
}

#[test]
fn test_search_records_resolves_in_store_order() {
    let store = sample_store();
    let index = build_inverted_index(&store);

    let records = search_records(&index, &store, "rue");
    let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["2", "4", "5"]);
}
