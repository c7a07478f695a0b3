// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! In-memory search over a directory of establishments.
//!
//! A catalog of records is tokenized into per-field inverted maps, queried by
//! exact and prefix lookup, and driven interactively by a debounced
//! controller that only lets the latest settled query through.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │  loader.rs  │────▶│   types.rs   │────▶│  inverted.rs │
//! │ (JSON, tags)│     │ (RecordStore)│     │ (field maps) │
//! └─────────────┘     └──────────────┘     └──────────────┘
//!                                                 │
//!                      ┌──────────────┐           ▼
//!                      │   cache.rs   │◀──── rebuilt per store version
//!                      └──────────────┘
//!                             │
//!        ┌────────────────────┼─────────────────────┐
//!        ▼                    ▼                     ▼
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │  search.rs  │     │  filter.rs   │     │  suggest.rs  │
//! │ (exact+pfx) │     │ (equality)   │     │ (labels)     │
//! └─────────────┘     └──────────────┘     └──────────────┘
//!        └────────────────────┬─────────────────────┘
//!                             ▼
//!                     ┌──────────────┐     ┌──────────────┐
//!                     │ debounce.rs  │◀────│  session.rs  │
//!                     │ (controller) │     │ (tokio task) │
//!                     └──────────────┘     └──────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use dalil::{build_inverted_index, search, RecordStore};
//!
//! let store = RecordStore::from_json_str(
//!     r#"[{ "id": "1", "name": "Clinique Pasteur", "services": ["Urgences"] }]"#,
//! ).unwrap();
//! let index = build_inverted_index(&store);
//!
//! assert_eq!(search(&index, "urg").len(), 1);
//! assert!(search(&index, "u").is_empty());
//! ```
//!
//! # Features
//!
//! - `parallel` (default): rayon map phase for large catalogs
//! - `async` (default): tokio-backed `session` module
//! - `fold-diacritics`: match "medecin" against "Médecin"

pub mod cache;
pub mod config;
pub mod debounce;
pub mod error;
pub mod filter;
pub mod inverted;
mod loader;
pub mod replay;
pub mod search;
pub mod suggest;
pub mod types;
mod utils;

#[cfg(feature = "async")]
pub mod session;

pub mod testing;

pub use cache::{CacheStats, IndexCache};
pub use config::SearchConfig;
pub use debounce::{
    ControllerState, ControllerStats, QueryController, QueryOutcome, QueryTicket, Scheduler,
    TimerHandle, TimerQueue,
};
pub use error::{DalilError, Result};
pub use filter::{intersect, SearchFilters};
pub use inverted::{
    build_for_size, build_inverted_index, build_inverted_index_parallel,
    check_inverted_index_well_formed, Bucket, FieldIndex, InvertedIndex,
};
pub use loader::LabelTable;
pub use replay::{parse_script, replay, Keystroke, ReplayEvent, ReplayLog};
pub use search::{matched_terms, search, search_records, search_with_min, MIN_QUERY_CHARS};
pub use suggest::{build_suggestions, IdentityTranslator, SuggestionLimits, Translator};
pub use types::{
    Category, Coordinates, Establishment, Governorate, RecordId, RecordStore, SearchField,
    StoreVersion,
};
pub use utils::{
    fold, tokenize, tokenize_query, INDEX_MIN_TOKEN_CHARS, QUERY_MIN_TOKEN_CHARS,
};

#[cfg(feature = "async")]
pub use session::{spawn_session, SessionHandle, SessionReport};
