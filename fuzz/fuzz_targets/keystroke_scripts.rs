// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for keystroke scripts and the debounced controller.
//!
//! Any script that parses must replay without panicking, dispatch at most
//! once per keystroke, and never leave a timer behind.

#![no_main]

use dalil::testing::sample_store;
use dalil::{parse_script, replay, IdentityTranslator, SearchConfig};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(keys) = parse_script(text) else {
        return;
    };
    if keys.len() > 500 {
        return;
    }

    let log = replay(&sample_store(), &SearchConfig::default(), &IdentityTranslator, &keys);
    assert!(log.controller.dispatches <= log.controller.keystrokes);
    assert_eq!(log.controller.keystrokes as usize, keys.len());
    assert_eq!(log.controller.stale_suppressed, 0);
});
