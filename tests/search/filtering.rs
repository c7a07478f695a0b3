//! Structured filters ANDed with free-text hits.

use crate::common::{names, sample_store};
use dalil::{build_inverted_index, intersect, search, Category, Governorate, SearchFilters};

#[test]
fn test_text_and_category() {
    let store = sample_store();
    let index = build_inverted_index(&store);

    let text = search(&index, "urgences");
    assert_eq!(text.len(), 2);

    let filters = SearchFilters {
        category: Some(Category::Sante),
        subcategory: Some("Dentiste".to_string()),
        ..Default::default()
    };
    let hits = intersect(&text, &filters.apply(&index, &store));
    assert_eq!(names(&store, &hits), vec!["Cabinet Dentaire El Menzah"]);
}

#[test]
fn test_filters_alone_use_equality_maps() {
    let store = sample_store();
    let index = build_inverted_index(&store);

    assert_eq!(index.with_governorate("sfax").len(), 2);
    assert_eq!(index.with_category("sante").len(), 2);
    assert!(index.with_category("spa").is_empty());

    let filters = SearchFilters {
        governorate: Some(Governorate::Sfax),
        min_rating: Some(4.0),
        ..Default::default()
    };
    assert_eq!(
        names(&store, &filters.apply(&index, &store)),
        vec!["Hotel Les Oliviers Palace"]
    );
}

#[test]
fn test_disjoint_filters_give_nothing() {
    let store = sample_store();
    let index = build_inverted_index(&store);
    let filters = SearchFilters {
        category: Some(Category::Taxi),
        governorate: Some(Governorate::Sfax),
        ..Default::default()
    };
    assert!(filters.apply(&index, &store).is_empty());
    assert!(intersect(&search(&index, "taxi"), &filters.apply(&index, &store)).is_empty());
}

#[test]
fn test_filters_deserialize_from_camel_case() {
    let filters: SearchFilters =
        serde_json::from_str(r#"{ "category": "hotel", "minRating": 4.5, "premium": true }"#)
            .unwrap();
    assert_eq!(filters.category, Some(Category::Hotel));
    assert_eq!(filters.active_count(), 3);
}
