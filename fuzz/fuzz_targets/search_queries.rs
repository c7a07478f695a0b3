// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for index building and query handling.
//!
//! Arbitrary catalogs and queries must never panic, and every hit must be a
//! valid, unique record position.

#![no_main]

use arbitrary::Arbitrary;
use dalil::{build_inverted_index, check_inverted_index_well_formed, search, Establishment, RecordStore};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    records: Vec<(String, String, Vec<String>)>,
    query: String,
}

fuzz_target!(|input: Input| {
    let records: Vec<Establishment> = input
        .records
        .into_iter()
        .take(64)
        .enumerate()
        .map(|(i, (name, address, services))| Establishment {
            id: i.to_string(),
            name,
            address,
            services,
            ..Default::default()
        })
        .collect();
    let store = RecordStore::new(records);
    let index = build_inverted_index(&store);

    // INVARIANT 1: the index is well-formed for any input
    assert!(check_inverted_index_well_formed(&index, &store));

    // Cap query length on a char boundary to avoid timeouts
    let query: String = input.query.chars().take(200).collect();
    let hits = search(&index, &query);

    // INVARIANT 2: hits are sorted, unique and in range
    assert!(hits.windows(2).all(|w| w[0] < w[1]));
    assert!(hits.iter().all(|id| id.as_usize() < store.len()));
});
