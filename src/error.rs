// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Errors from the edges of the crate: reading catalogs, configs and scripts.
//!
//! Indexing and searching never fail. Everything here happens before a
//! [`RecordStore`](crate::RecordStore) exists.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DalilError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("record #{index} is invalid: {reason}")]
    InvalidRecord { index: usize, reason: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("keystroke script line {line}: {reason}")]
    InvalidScript { line: usize, reason: String },
}

pub type Result<T> = std::result::Result<T, DalilError>;

impl DalilError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DalilError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        DalilError::Json {
            path: path.into(),
            source,
        }
    }
}
