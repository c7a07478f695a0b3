// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of the catalog: records, their classification enums,
//! and the immutable snapshot the index is built from.
//!
//! # Invariants
//!
//! - **RecordId**: `id.as_usize() < store.len()` for the store the id came from.
//!   A `RecordId` is a position in one particular [`RecordStore`] snapshot, not
//!   the establishment's own `id` string.
//!
//! - **RecordStore**: immutable once built. Every new snapshot gets a fresh
//!   [`StoreVersion`]; clones share the snapshot and its version. Index caches
//!   compare versions, never record contents.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

// =============================================================================
// NEWTYPES
// =============================================================================

/// Position of a record inside a [`RecordStore`] snapshot.
///
/// Prevents mixing up store positions with the establishment's own string id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct RecordId(pub u32);

impl RecordId {
    /// Create a new RecordId, validating it's within bounds.
    #[inline]
    pub fn new(id: u32, num_records: usize) -> Option<Self> {
        if (id as usize) < num_records {
            Some(RecordId(id))
        } else {
            None
        }
    }

    /// Convert to usize for slice indexing.
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for RecordId {
    fn from(id: u32) -> Self {
        RecordId(id)
    }
}

impl From<RecordId> for usize {
    fn from(id: RecordId) -> Self {
        id.0 as usize
    }
}

/// Identity token of a [`RecordStore`] snapshot.
///
/// Two stores with equal contents still get different versions; rebuilds are
/// keyed by identity, not by deep equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StoreVersion(u64);

static NEXT_STORE_VERSION: AtomicU64 = AtomicU64::new(1);

impl StoreVersion {
    fn next() -> Self {
        StoreVersion(NEXT_STORE_VERSION.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for StoreVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

// =============================================================================
// CLASSIFICATION ENUMS
// =============================================================================

/// Establishment category. Closed set, matched by equality rather than tokens.
///
/// Unknown codes survive as `Other` so one odd record never fails a load.
/// A missing category is `Other("")`: it never feeds the equality map.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Hotel,
    Cultural,
    Administrative,
    Sport,
    Animal,
    Construction,
    Alimentation,
    Sante,
    Justice,
    Ecole,
    Taxi,
    Tourism,
    Divers,
    Other(String),
}

impl Category {
    /// Every known category, in display order.
    pub const ALL: [Category; 13] = [
        Category::Hotel,
        Category::Cultural,
        Category::Administrative,
        Category::Sport,
        Category::Animal,
        Category::Construction,
        Category::Alimentation,
        Category::Sante,
        Category::Justice,
        Category::Ecole,
        Category::Taxi,
        Category::Tourism,
        Category::Divers,
    ];

    /// Wire code, also used as the translation key.
    pub fn code(&self) -> &str {
        match self {
            Category::Hotel => "hotel",
            Category::Cultural => "cultural",
            Category::Administrative => "administrative",
            Category::Sport => "sport",
            Category::Animal => "animal",
            Category::Construction => "construction",
            Category::Alimentation => "alimentation",
            Category::Sante => "sante",
            Category::Justice => "justice",
            Category::Ecole => "ecole",
            Category::Taxi => "taxi",
            Category::Tourism => "tourism",
            Category::Divers => "divers",
            Category::Other(code) => code,
        }
    }

    /// No category was given.
    pub fn is_unset(&self) -> bool {
        self.code().is_empty()
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Other(String::new())
    }
}

impl From<String> for Category {
    fn from(code: String) -> Self {
        Category::ALL
            .iter()
            .find(|c| c.code() == code)
            .cloned()
            .unwrap_or(Category::Other(code))
    }
}

impl From<&str> for Category {
    fn from(code: &str) -> Self {
        Category::from(code.to_string())
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Other(code) => code,
            known => known.code().to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Tunisian governorate (region) code.
///
/// A missing governorate is `Other("")` and contributes no tokens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Governorate {
    Tunis,
    Ariana,
    BenArous,
    Manouba,
    Nabeul,
    Zaghouan,
    Bizerte,
    Beja,
    Jendouba,
    Kef,
    Siliana,
    Sousse,
    Monastir,
    Mahdia,
    Sfax,
    Kairouan,
    Kasserine,
    SidiBouzid,
    Gabes,
    Medenine,
    Tataouine,
    Gafsa,
    Tozeur,
    Kebili,
    Other(String),
}

impl Governorate {
    /// All 24 governorates, north to south.
    pub const ALL: [Governorate; 24] = [
        Governorate::Tunis,
        Governorate::Ariana,
        Governorate::BenArous,
        Governorate::Manouba,
        Governorate::Nabeul,
        Governorate::Zaghouan,
        Governorate::Bizerte,
        Governorate::Beja,
        Governorate::Jendouba,
        Governorate::Kef,
        Governorate::Siliana,
        Governorate::Sousse,
        Governorate::Monastir,
        Governorate::Mahdia,
        Governorate::Sfax,
        Governorate::Kairouan,
        Governorate::Kasserine,
        Governorate::SidiBouzid,
        Governorate::Gabes,
        Governorate::Medenine,
        Governorate::Tataouine,
        Governorate::Gafsa,
        Governorate::Tozeur,
        Governorate::Kebili,
    ];

    /// Wire code, also used as the translation key.
    pub fn code(&self) -> &str {
        match self {
            Governorate::Tunis => "tunis",
            Governorate::Ariana => "ariana",
            Governorate::BenArous => "ben-arous",
            Governorate::Manouba => "manouba",
            Governorate::Nabeul => "nabeul",
            Governorate::Zaghouan => "zaghouan",
            Governorate::Bizerte => "bizerte",
            Governorate::Beja => "beja",
            Governorate::Jendouba => "jendouba",
            Governorate::Kef => "kef",
            Governorate::Siliana => "siliana",
            Governorate::Sousse => "sousse",
            Governorate::Monastir => "monastir",
            Governorate::Mahdia => "mahdia",
            Governorate::Sfax => "sfax",
            Governorate::Kairouan => "kairouan",
            Governorate::Kasserine => "kasserine",
            Governorate::SidiBouzid => "sidi-bouzid",
            Governorate::Gabes => "gabes",
            Governorate::Medenine => "medenine",
            Governorate::Tataouine => "tataouine",
            Governorate::Gafsa => "gafsa",
            Governorate::Tozeur => "tozeur",
            Governorate::Kebili => "kebili",
            Governorate::Other(code) => code,
        }
    }

    /// No governorate was given.
    pub fn is_unset(&self) -> bool {
        self.code().is_empty()
    }
}

impl Default for Governorate {
    fn default() -> Self {
        Governorate::Other(String::new())
    }
}

impl From<String> for Governorate {
    fn from(code: String) -> Self {
        Governorate::ALL
            .iter()
            .find(|g| g.code() == code)
            .cloned()
            .unwrap_or(Governorate::Other(code))
    }
}

impl From<&str> for Governorate {
    fn from(code: &str) -> Self {
        Governorate::from(code.to_string())
    }
}

impl From<Governorate> for String {
    fn from(governorate: Governorate) -> Self {
        match governorate {
            Governorate::Other(code) => code,
            known => known.code().to_string(),
        }
    }
}

impl fmt::Display for Governorate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// =============================================================================
// RECORD TYPES
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// A business or service listing.
///
/// Only `name`, `subcategory`, `address`, `services` and `governorate` feed the
/// token index; `category` and `governorate` also feed equality maps. The rest
/// is carried for display. Every searchable field defaults to empty, whether
/// it is missing or `null`, so a sparse record still indexes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Establishment {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: Category,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subcategory: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub governorate: Governorate,
    /// Neighbourhood code, only used inside Tunis ("el-menzah", "bardo").
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating: f32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub review_count: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hours: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub services: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub coordinates: Coordinates,
    #[serde(default, deserialize_with = "null_as_default")]
    pub verified: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub premium: bool,
    /// Submitted by a visitor and awaiting review.
    #[serde(default)]
    pub pending: Option<bool>,
}

/// Read `null` as the field's default, the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// The free-text fields that get their own token map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    Name,
    Services,
    Address,
    Subcategory,
    Governorate,
}

impl SearchField {
    pub const COUNT: usize = 5;

    pub const ALL: [SearchField; SearchField::COUNT] = [
        SearchField::Name,
        SearchField::Services,
        SearchField::Address,
        SearchField::Subcategory,
        SearchField::Governorate,
    ];

    /// Slot of this field in per-field arrays.
    #[inline]
    pub fn slot(self) -> usize {
        match self {
            SearchField::Name => 0,
            SearchField::Services => 1,
            SearchField::Address => 2,
            SearchField::Subcategory => 3,
            SearchField::Governorate => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SearchField::Name => "name",
            SearchField::Services => "services",
            SearchField::Address => "address",
            SearchField::Subcategory => "subcategory",
            SearchField::Governorate => "governorate",
        }
    }
}

// =============================================================================
// RECORD STORE
// =============================================================================

/// Immutable snapshot of every record available for search.
///
/// Cloning is cheap and keeps the same version. Any change to the catalog
/// means building a new store, which is what triggers an index rebuild.
#[derive(Debug, Clone)]
pub struct RecordStore {
    records: Arc<[Establishment]>,
    version: StoreVersion,
}

impl RecordStore {
    pub fn new(records: Vec<Establishment>) -> Self {
        Self {
            records: records.into(),
            version: StoreVersion::next(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn version(&self) -> StoreVersion {
        self.version
    }

    pub fn records(&self) -> &[Establishment] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: RecordId) -> Option<&Establishment> {
        self.records.get(id.as_usize())
    }

    /// Iterate records together with their store positions.
    pub fn iter_with_ids(&self) -> impl Iterator<Item = (RecordId, &Establishment)> {
        self.records
            .iter()
            .enumerate()
            .map(|(pos, record)| (RecordId(pos as u32), record))
    }

    /// Resolve ids to records, silently skipping ids from another snapshot.
    pub fn resolve<'a>(&'a self, ids: &'a [RecordId]) -> impl Iterator<Item = &'a Establishment> {
        ids.iter().filter_map(move |id| self.get(*id))
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::empty()
    }
}
