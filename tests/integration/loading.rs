//! Catalog and label files from disk.

use crate::common::{names, CATALOG_FIXTURE};
use dalil::{
    build_inverted_index, search, Category, DalilError, Governorate, LabelTable, RecordStore,
    SearchConfig, Translator,
};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_fixture_catalog_loads() {
    let store = RecordStore::from_path(CATALOG_FIXTURE).unwrap();
    assert_eq!(store.len(), 5);

    let pasteur = &store.records()[0];
    assert_eq!(pasteur.category, Category::Sante);
    assert_eq!(pasteur.review_count, 87);
    assert_eq!(pasteur.email.as_deref(), Some("contact@pasteur.tn"));

    // Missing optional fields default.
    let school = &store.records()[3];
    assert!(school.services.is_empty());
    assert_eq!(school.pending, Some(true));

    // Unknown category codes survive.
    assert_eq!(store.records()[4].category, Category::Other("spa".to_string()));
}

#[test]
fn test_fixture_catalog_is_searchable() {
    let store = RecordStore::from_path(CATALOG_FIXTURE).unwrap();
    let index = build_inverted_index(&store);

    assert_eq!(names(&store, &search(&index, "sidi")), vec!["Hammam Sidi Bou Said"]);
    assert_eq!(names(&store, &search(&index, "gom")), vec!["Hammam Sidi Bou Said"]);
    assert_eq!(names(&store, &search(&index, "nabeul")), vec!["Ecole Les Jasmins"]);
    assert_eq!(index.with_category("spa").len(), 1);
    assert_eq!(index.with_governorate(Governorate::Tunis.code()).len(), 2);
}

#[test]
fn test_invalid_record_reports_position() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"[{{ "id": "1", "name": "A place" }}, {{ "id": "2", "name": "" }}]"#).unwrap();

    let err = RecordStore::from_path(file.path()).unwrap_err();
    assert!(matches!(err, DalilError::InvalidRecord { index: 1, .. }));
    assert!(err.to_string().contains("record #1"));
}

#[test]
fn test_labels_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{ "hotel": "Hotels", "sfax": "Sfax (Sud)" }}"#).unwrap();

    let labels = LabelTable::from_path(file.path()).unwrap();
    assert_eq!(labels.translate("sfax"), "Sfax (Sud)");
    assert_eq!(labels.translate("taxi"), "taxi");
}

#[test]
fn test_config_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{ "searchDelayMs": 250, "maxResults": 5 }}"#).unwrap();

    let config = SearchConfig::from_path(file.path()).unwrap();
    assert_eq!(config.search_delay_ms, 250);
    assert_eq!(config.max_results, 5);
    assert_eq!(config.filter_delay_ms, 200);
}

#[test]
fn test_config_zero_results_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{ "maxResults": 0 }}"#).unwrap();
    assert!(matches!(
        SearchConfig::from_path(file.path()),
        Err(DalilError::InvalidConfig(_))
    ));
}
