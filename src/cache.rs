// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Index cache keyed by store identity.
//!
//! The caller owns one cache per catalog. Every read goes through
//! [`IndexCache::get_or_build`], which compares the store's [`StoreVersion`]
//! against the cached index and rebuilds synchronously on mismatch. A query
//! can therefore never see an index built from an older snapshot.
//!
//! ```text
//! get_or_build(store)
//!       │
//!       ├─→ cached.version == store.version → hit, share the Arc
//!       │
//!       └─→ miss or superseded → build, replace, return
//! ```

use crate::inverted::{build_for_size, InvertedIndex};
use crate::types::{RecordStore, StoreVersion};
use std::sync::Arc;
use tracing::debug;

/// Stores at or above this size are indexed with the parallel builder.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1000;

/// Cache statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered by the cached index.
    pub hits: u64,
    /// Lookups that had to build (first build included).
    pub builds: u64,
    /// Builds that replaced an index for an older snapshot.
    pub superseded: u64,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.builds;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Holds the index of the most recent store snapshot.
///
/// Only one index is kept: a new snapshot always supersedes the old one,
/// which is then dropped once no reader still holds its `Arc`.
#[derive(Debug)]
pub struct IndexCache {
    current: Option<Arc<InvertedIndex>>,
    parallel_threshold: usize,
    stats: CacheStats,
}

impl Default for IndexCache {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexCache {
    pub fn new() -> Self {
        Self::with_parallel_threshold(DEFAULT_PARALLEL_THRESHOLD)
    }

    pub fn with_parallel_threshold(parallel_threshold: usize) -> Self {
        Self {
            current: None,
            parallel_threshold,
            stats: CacheStats::default(),
        }
    }

    /// Index for `store`, building it first if the cached one is for another snapshot.
    pub fn get_or_build(&mut self, store: &RecordStore) -> Arc<InvertedIndex> {
        if let Some(index) = &self.current {
            if index.version() == store.version() {
                self.stats.hits += 1;
                return Arc::clone(index);
            }
            self.stats.superseded += 1;
            debug!(
                old = %index.version(),
                new = %store.version(),
                "record store replaced, rebuilding index"
            );
        }

        let index = Arc::new(build_for_size(store, self.parallel_threshold));
        self.stats.builds += 1;
        self.current = Some(Arc::clone(&index));
        index
    }

    /// Cached index if it belongs to `version`. Never builds.
    pub fn peek(&self, version: StoreVersion) -> Option<&Arc<InvertedIndex>> {
        self.current
            .as_ref()
            .filter(|index| index.version() == version)
    }

    /// Version of the cached index, if any.
    pub fn version(&self) -> Option<StoreVersion> {
        self.current.as_ref().map(|index| index.version())
    }

    /// Drop the cached index. The next lookup rebuilds.
    pub fn invalidate(&mut self) {
        if let Some(index) = self.current.take() {
            debug!(version = %index.version(), "index cache invalidated");
        }
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}
