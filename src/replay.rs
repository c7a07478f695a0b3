// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Replaying recorded keystrokes through a [`QueryController`].
//!
//! A script has one keystroke per line: a millisecond offset, one space, and
//! the full text of the input box at that moment. An offset with no text is a
//! clear. Blank lines and lines starting with `#` are ignored.
//!
//! ```text
//! # typing "med" quickly, then clearing
//! 0 m
//! 80 me
//! 160 med
//! 900
//! ```
//!
//! The run uses a [`TimerQueue`], so a script covering minutes finishes
//! instantly and always produces the same events.

use crate::cache::{CacheStats, IndexCache};
use crate::config::SearchConfig;
use crate::debounce::{
    ControllerState, ControllerStats, QueryController, QueryOutcome, QueryTicket, TimerQueue,
};
use crate::error::{DalilError, Result};
use crate::suggest::Translator;
use crate::types::RecordStore;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keystroke {
    pub at: Duration,
    pub text: String,
}

/// Parse a keystroke script. Offsets must not decrease.
pub fn parse_script(script: &str) -> Result<Vec<Keystroke>> {
    let mut keys = Vec::new();
    let mut last = Duration::ZERO;

    for (i, line) in script.lines().enumerate() {
        let line_no = i + 1;
        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            continue;
        }
        let (offset, text) = line.split_once(' ').unwrap_or((line, ""));
        let ms: u64 = offset.parse().map_err(|_| DalilError::InvalidScript {
            line: line_no,
            reason: format!("invalid offset {:?}", offset),
        })?;
        let at = Duration::from_millis(ms);
        if at < last {
            return Err(DalilError::InvalidScript {
                line: line_no,
                reason: format!("offset {}ms is before the previous line", ms),
            });
        }
        last = at;
        keys.push(Keystroke {
            at,
            text: text.to_string(),
        });
    }
    Ok(keys)
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReplayEvent {
    /// A keystroke was handled and left the controller in `state`.
    Keystroke {
        at: Duration,
        text: String,
        state: ControllerState,
    },
    /// A debounce timer survived and the query ran.
    Dispatched { at: Duration, outcome: QueryOutcome },
}

#[derive(Debug, Clone, Default)]
pub struct ReplayLog {
    pub events: Vec<ReplayEvent>,
    pub controller: ControllerStats,
    pub cache: CacheStats,
}

impl ReplayLog {
    pub fn dispatches(&self) -> impl Iterator<Item = (Duration, &QueryOutcome)> {
        self.events.iter().filter_map(|event| match event {
            ReplayEvent::Dispatched { at, outcome } => Some((*at, outcome)),
            ReplayEvent::Keystroke { .. } => None,
        })
    }
}

/// Feed `keys` through a fresh search-box controller on virtual time.
///
/// Timers still pending after the last keystroke are allowed to fire.
pub fn replay(
    store: &RecordStore,
    config: &SearchConfig,
    translator: &dyn Translator,
    keys: &[Keystroke],
) -> ReplayLog {
    let mut controller = QueryController::new(config);
    let mut cache = IndexCache::with_parallel_threshold(config.parallel_threshold);
    let mut timers = TimerQueue::new();
    let mut events = Vec::new();

    let mut fire_until = |until: Duration,
                          controller: &mut QueryController,
                          timers: &mut TimerQueue<QueryTicket>,
                          events: &mut Vec<ReplayEvent>| {
        while let Some((at, ticket)) = timers.pop_due(until) {
            if let Some(outcome) = controller.on_timer(ticket, &mut cache, store, translator) {
                events.push(ReplayEvent::Dispatched {
                    at,
                    outcome: outcome.clone(),
                });
            }
        }
    };

    for key in keys {
        fire_until(key.at, &mut controller, &mut timers, &mut events);
        timers.advance_to(key.at);
        let state = controller.input(&key.text, &mut timers);
        events.push(ReplayEvent::Keystroke {
            at: key.at,
            text: key.text.clone(),
            state,
        });
    }
    fire_until(Duration::MAX, &mut controller, &mut timers, &mut events);

    ReplayLog {
        events,
        controller: controller.stats(),
        cache: cache.stats(),
    }
}
