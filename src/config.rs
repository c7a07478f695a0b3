// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Tunables for the query pipeline.
//!
//! Read from a JSON file with camelCase keys; any key may be omitted.
//!
//! ```json
//! { "searchDelayMs": 300, "maxSuggestions": 10 }
//! ```

use crate::cache::DEFAULT_PARALLEL_THRESHOLD;
use crate::error::{DalilError, Result};
use crate::search::MIN_QUERY_CHARS;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Debounce delay of the main search box.
    pub search_delay_ms: u64,
    /// Debounce delay of lighter filter boxes.
    pub filter_delay_ms: u64,
    /// Hits shown per settled query.
    pub max_results: usize,
    /// Suggestions shown per settled query.
    pub max_suggestions: usize,
    /// Names taken from the first hits.
    pub suggestion_names: usize,
    /// Distinct subcategories taken from the hits.
    pub suggestion_subcategories: usize,
    /// Shorter trimmed queries return nothing.
    pub min_query_chars: usize,
    /// Stores at least this large use the parallel index builder.
    pub parallel_threshold: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            search_delay_ms: 300,
            filter_delay_ms: 200,
            max_results: 12,
            max_suggestions: 10,
            suggestion_names: 8,
            suggestion_subcategories: 5,
            min_query_chars: MIN_QUERY_CHARS,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl SearchConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SearchConfig = serde_json::from_str(json)
            .map_err(|e| DalilError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| DalilError::io(path, e))?;
        let config: SearchConfig =
            serde_json::from_str(&content).map_err(|e| DalilError::json(path, e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.search_delay_ms == 0 {
            return Err(DalilError::InvalidConfig(
                "searchDelayMs must be greater than zero".to_string(),
            ));
        }
        if self.max_results == 0 {
            return Err(DalilError::InvalidConfig(
                "maxResults must be greater than zero".to_string(),
            ));
        }
        if self.max_suggestions == 0 {
            return Err(DalilError::InvalidConfig(
                "maxSuggestions must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn search_delay(&self) -> Duration {
        Duration::from_millis(self.search_delay_ms)
    }

    pub fn filter_delay(&self) -> Duration {
        Duration::from_millis(self.filter_delay_ms)
    }
}
