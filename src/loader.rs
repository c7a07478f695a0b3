// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Loading catalogs and label tables from JSON.
//!
//! A catalog file is either a bare array of establishments or an object with
//! an `establishments` array. Records keep their file order, which becomes
//! the store order.

use crate::error::{DalilError, Result};
use crate::suggest::Translator;
use crate::types::{Category, Establishment, Governorate, RecordStore};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

#[derive(Deserialize)]
struct CatalogObject {
    establishments: Vec<Establishment>,
}

/// Parse either catalog shape, keeping serde_json's position in errors.
fn parse_catalog(json: &str) -> serde_json::Result<Vec<Establishment>> {
    if json.trim_start().starts_with('[') {
        serde_json::from_str(json)
    } else {
        serde_json::from_str::<CatalogObject>(json).map(|file| file.establishments)
    }
}

/// Reject records that can never be found or displayed.
fn validate_records(records: &[Establishment]) -> Result<()> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        if record.id.trim().is_empty() {
            return Err(DalilError::InvalidRecord {
                index,
                reason: "empty id".to_string(),
            });
        }
        if record.name.trim().is_empty() {
            return Err(DalilError::InvalidRecord {
                index,
                reason: format!("empty name for id {:?}", record.id),
            });
        }
        if !seen.insert(record.id.as_str()) {
            warn!(index, id = %record.id, "duplicate establishment id");
        }
    }
    Ok(())
}

impl RecordStore {
    /// Parse a catalog from a JSON string.
    ///
    /// JSON errors are reported against the pseudo-path `<inline>`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let records = parse_catalog(json).map_err(|e| DalilError::json("<inline>", e))?;
        validate_records(&records)?;
        Ok(RecordStore::new(records))
    }

    /// Read and parse a catalog file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| DalilError::io(path, e))?;
        let records = parse_catalog(&content).map_err(|e| DalilError::json(path, e))?;
        validate_records(&records)?;

        let store = RecordStore::new(records);
        info!(
            path = %path.display(),
            records = store.len(),
            version = %store.version(),
            "catalog loaded"
        );
        Ok(store)
    }
}

/// Display labels for category and governorate codes.
///
/// Missing keys translate to themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct LabelTable {
    labels: HashMap<String, String>,
}

impl LabelTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a flat `{ "code": "Label" }` object.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| DalilError::json("<inline>", e))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| DalilError::io(path, e))?;
        serde_json::from_str(&content).map_err(|e| DalilError::json(path, e))
    }

    pub fn insert(&mut self, key: impl Into<String>, label: impl Into<String>) {
        self.labels.insert(key.into(), label.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.labels.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// French labels for every known category and governorate.
    pub fn builtin_fr() -> Self {
        let mut table = Self::new();
        for category in &Category::ALL {
            let label = match category {
                Category::Hotel => "Hôtels",
                Category::Cultural => "Culture",
                Category::Administrative => "Administration",
                Category::Sport => "Sport",
                Category::Animal => "Animaux",
                Category::Construction => "Construction",
                Category::Alimentation => "Alimentation",
                Category::Sante => "Santé",
                Category::Justice => "Justice",
                Category::Ecole => "Écoles",
                Category::Taxi => "Taxis",
                Category::Tourism => "Tourisme",
                Category::Divers => "Divers",
                Category::Other(_) => continue,
            };
            table.insert(category.code(), label);
        }
        for governorate in &Governorate::ALL {
            let label = match governorate {
                Governorate::Tunis => "Tunis",
                Governorate::Ariana => "Ariana",
                Governorate::BenArous => "Ben Arous",
                Governorate::Manouba => "Manouba",
                Governorate::Nabeul => "Nabeul",
                Governorate::Zaghouan => "Zaghouan",
                Governorate::Bizerte => "Bizerte",
                Governorate::Beja => "Béja",
                Governorate::Jendouba => "Jendouba",
                Governorate::Kef => "Le Kef",
                Governorate::Siliana => "Siliana",
                Governorate::Sousse => "Sousse",
                Governorate::Monastir => "Monastir",
                Governorate::Mahdia => "Mahdia",
                Governorate::Sfax => "Sfax",
                Governorate::Kairouan => "Kairouan",
                Governorate::Kasserine => "Kasserine",
                Governorate::SidiBouzid => "Sidi Bouzid",
                Governorate::Gabes => "Gabès",
                Governorate::Medenine => "Médenine",
                Governorate::Tataouine => "Tataouine",
                Governorate::Gafsa => "Gafsa",
                Governorate::Tozeur => "Tozeur",
                Governorate::Kebili => "Kébili",
                Governorate::Other(_) => continue,
            };
            table.insert(governorate.code(), label);
        }
        table
    }
}

impl Translator for LabelTable {
    fn translate(&self, key: &str) -> String {
        self.get(key).unwrap_or(key).to_string()
    }
}
