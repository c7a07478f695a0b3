// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for catalog and label JSON parsing.
//!
//! Malformed input must come back as an error, never a panic.

#![no_main]

use dalil::{LabelTable, RecordStore};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(store) = RecordStore::from_json_str(text) {
        assert!(store.records().iter().all(|r| !r.name.trim().is_empty()));
    }
    let _ = LabelTable::from_json_str(text);
});
