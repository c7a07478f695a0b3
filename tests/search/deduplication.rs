//! Records reached several ways come back once.

use crate::common::{index_for, make_full_record, make_record};
use dalil::{Category, Governorate, RecordId, SearchField};

#[test]
fn test_repeated_token_in_one_field() {
    let (_, index) = index_for(vec![make_full_record(
        "1",
        "Parking Central",
        Category::Divers,
        "",
        "",
        Governorate::Tunis,
        &["free free parking"],
        0.0,
    )]);

    // The bucket keeps both occurrences; the result does not.
    let bucket = index.field(SearchField::Services).get("free").unwrap();
    assert_eq!(bucket.len(), 2);
    assert_eq!(dalil::search(&index, "free"), vec![RecordId(0)]);
}

#[test]
fn test_same_record_through_several_fields() {
    let (_, index) = index_for(vec![make_full_record(
        "1",
        "Sousse Plage",
        Category::Hotel,
        "Sousse resort",
        "Corniche Sousse",
        Governorate::Sousse,
        &["Navette Sousse"],
        4.0,
    )]);
    assert_eq!(dalil::search(&index, "sousse"), vec![RecordId(0)]);
}

#[test]
fn test_exact_and_prefix_hit_same_record() {
    // "cafe" is an exact key and a prefix of "cafeteria".
    let (_, index) = index_for(vec![make_record("1", "Cafe Cafeteria")]);
    assert_eq!(dalil::search(&index, "cafe"), vec![RecordId(0)]);
}

#[test]
fn test_several_tokens_same_record() {
    let (_, index) = index_for(vec![make_record("1", "Pharmacie de Nuit"), make_record("2", "Boucherie")]);
    assert_eq!(
        dalil::search(&index, "pharmacie nuit pharm"),
        vec![RecordId(0)]
    );
}
