// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Debounced query controller.
//!
//! Keystrokes do not query the index directly. Each one cancels the pending
//! timer and schedules a new one; only when a timer survives its full delay
//! does the query run.
//!
//! ```text
//!            input(non-blank)          timer fires (current ticket)
//!   Idle ───────────────────→ Pending ─────────────────────────────→ Settled
//!    ↑                          │  ↑                                   │
//!    │        input(blank)      │  └──────── input(non-blank) ─────────┘
//!    └──────────────────────────┴──────────── input(blank) ────────────┘
//! ```
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **ONE_TIMER**: at most one outstanding timer handle per controller. The
//!    previous handle is cancelled before a new one is scheduled.
//! 2. **CHECK_BEFORE_APPLY**: a fired ticket is applied only if its generation
//!    and text still match the current input. Anything else is counted as
//!    stale and dropped.
//! 3. **IMMEDIATE_CLEAR**: blank input empties results and suggestions at
//!    once, without waiting for a timer.
//! 4. **FRESH_INDEX**: every dispatch reads the index through
//!    [`IndexCache::get_or_build`], so a replaced store is indexed before it
//!    is queried.
//!
//! Time is abstracted behind [`Scheduler`]. [`TimerQueue`] is a virtual clock
//! used by tests and the `replay` command; the async session drives the same
//! controller from tokio timers.

use crate::cache::IndexCache;
use crate::config::SearchConfig;
use crate::filter::{intersect, SearchFilters};
use crate::search::search_with_min;
use crate::suggest::{build_suggestions, SuggestionLimits, Translator};
use crate::types::{RecordId, RecordStore, StoreVersion};
use crate::utils::tokenize_query;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::time::Duration;
use tracing::{debug, trace};

// =============================================================================
// TIMERS
// =============================================================================

/// Cancellation handle returned by [`Scheduler::schedule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

/// Something that can deliver a payload after a delay.
pub trait Scheduler<T> {
    fn schedule(&mut self, delay: Duration, payload: T) -> TimerHandle;

    /// Returns `false` if the timer already fired or was cancelled.
    fn cancel(&mut self, handle: TimerHandle) -> bool;
}

/// Timers on a virtual clock that only moves when told to.
///
/// Timers with equal deadlines fire in scheduling order.
#[derive(Debug)]
pub struct TimerQueue<T> {
    now: Duration,
    next_seq: u64,
    queue: BTreeMap<(Duration, u64), T>,
    deadlines: HashMap<u64, Duration>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            queue: BTreeMap::new(),
            deadlines: HashMap::new(),
        }
    }

    /// Current virtual time since the queue was created.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Deadline of the earliest pending timer.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue.keys().next().map(|(deadline, _)| *deadline)
    }

    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    /// Pop the earliest timer due at or before `until`, moving the clock to its deadline.
    pub fn pop_due(&mut self, until: Duration) -> Option<(Duration, T)> {
        let (&(deadline, seq), _) = self.queue.iter().next()?;
        if deadline > until {
            return None;
        }
        let payload = self.queue.remove(&(deadline, seq))?;
        self.deadlines.remove(&seq);
        self.now = self.now.max(deadline);
        Some((deadline, payload))
    }

    /// Move the clock to `t`, returning every payload that fell due, in order.
    pub fn advance_to(&mut self, t: Duration) -> Vec<T> {
        let mut fired = Vec::new();
        while let Some((_, payload)) = self.pop_due(t) {
            fired.push(payload);
        }
        self.now = self.now.max(t);
        fired
    }

    /// Move the clock forward by `by`.
    pub fn advance(&mut self, by: Duration) -> Vec<T> {
        self.advance_to(self.now + by)
    }
}

impl<T> Scheduler<T> for TimerQueue<T> {
    fn schedule(&mut self, delay: Duration, payload: T) -> TimerHandle {
        let seq = self.next_seq;
        self.next_seq += 1;
        let deadline = self.now + delay;
        self.queue.insert((deadline, seq), payload);
        self.deadlines.insert(seq, deadline);
        TimerHandle(seq)
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.deadlines.remove(&handle.0) {
            Some(deadline) => self.queue.remove(&(deadline, handle.0)).is_some(),
            None => false,
        }
    }
}

// =============================================================================
// CONTROLLER
// =============================================================================

/// Payload of a debounce timer: which input it was scheduled for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTicket {
    pub generation: u64,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControllerState {
    /// No query text.
    #[default]
    Idle,
    /// Waiting for typing to pause.
    Pending,
    /// The current text has been dispatched and its results are shown.
    Settled,
}

impl fmt::Display for ControllerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ControllerState::Idle => "idle",
            ControllerState::Pending => "pending",
            ControllerState::Settled => "settled",
        })
    }
}

/// What the last dispatch produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOutcome {
    /// Settled query text, untrimmed.
    pub query: String,
    /// Snapshot the hits refer to.
    pub version: Option<StoreVersion>,
    /// Hits shown, capped at the result limit, in store order.
    pub hits: Vec<RecordId>,
    /// Hits before the cap.
    pub total_hits: usize,
    pub suggestions: Vec<String>,
}

impl QueryOutcome {
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty() && self.suggestions.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControllerStats {
    pub keystrokes: u64,
    pub dispatches: u64,
    pub stale_suppressed: u64,
    pub clears: u64,
}

/// Per-session query state machine.
#[derive(Debug)]
pub struct QueryController {
    delay: Duration,
    min_query_chars: usize,
    max_results: usize,
    limits: SuggestionLimits,
    filters: SearchFilters,

    state: ControllerState,
    raw: String,
    settled: Option<String>,
    last_tokens: Vec<String>,
    generation: u64,
    outstanding: Option<TimerHandle>,
    outcome: QueryOutcome,
    stats: ControllerStats,
}

impl QueryController {
    /// Controller for the main search box.
    pub fn new(config: &SearchConfig) -> Self {
        Self::with_delay(config, config.search_delay())
    }

    /// Controller for a lighter filter box, with the shorter filter delay.
    pub fn for_filters(config: &SearchConfig) -> Self {
        Self::with_delay(config, config.filter_delay())
    }

    pub fn with_delay(config: &SearchConfig, delay: Duration) -> Self {
        Self {
            delay,
            min_query_chars: config.min_query_chars,
            max_results: config.max_results,
            limits: SuggestionLimits::from(config),
            filters: SearchFilters::default(),
            state: ControllerState::Idle,
            raw: String::new(),
            settled: None,
            last_tokens: Vec::new(),
            generation: 0,
            outstanding: None,
            outcome: QueryOutcome::default(),
            stats: ControllerStats::default(),
        }
    }

    /// Structured filters ANDed with every later dispatch.
    pub fn set_filters(&mut self, filters: SearchFilters) {
        self.filters = filters;
    }

    pub fn filters(&self) -> &SearchFilters {
        &self.filters
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// Text as last typed.
    pub fn raw_query(&self) -> &str {
        &self.raw
    }

    /// Text of the last dispatch, if results are showing.
    pub fn settled_query(&self) -> Option<&str> {
        self.settled.as_deref()
    }

    /// Query tokens of the last dispatch.
    pub fn last_tokens(&self) -> &[String] {
        &self.last_tokens
    }

    /// Whether a fresher query is waiting on its timer.
    pub fn is_pending(&self) -> bool {
        self.outstanding.is_some()
    }

    pub fn outcome(&self) -> &QueryOutcome {
        &self.outcome
    }

    pub fn stats(&self) -> ControllerStats {
        self.stats
    }

    /// Handle one keystroke: the full new text of the input box.
    pub fn input<S: Scheduler<QueryTicket> + ?Sized>(
        &mut self,
        text: &str,
        scheduler: &mut S,
    ) -> ControllerState {
        self.stats.keystrokes += 1;
        self.raw = text.to_string();
        self.generation += 1;

        if let Some(handle) = self.outstanding.take() {
            let cancelled = scheduler.cancel(handle);
            trace!(generation = self.generation, cancelled, "superseded debounce timer");
        }

        if text.trim().is_empty() {
            self.clear();
            return self.state;
        }

        let ticket = QueryTicket {
            generation: self.generation,
            text: text.to_string(),
        };
        self.outstanding = Some(scheduler.schedule(self.delay, ticket));
        self.state = ControllerState::Pending;
        debug!(
            generation = self.generation,
            delay_ms = self.delay.as_millis() as u64,
            "debounce scheduled"
        );
        self.state
    }

    fn clear(&mut self) {
        self.state = ControllerState::Idle;
        self.settled = None;
        self.last_tokens.clear();
        self.outcome = QueryOutcome::default();
        self.stats.clears += 1;
        debug!(generation = self.generation, "query cleared");
    }

    /// Whether `ticket` is still the one the controller is waiting for.
    pub fn is_current(&self, ticket: &QueryTicket) -> bool {
        ticket.generation == self.generation && ticket.text == self.raw
    }

    /// Handle a fired timer. Returns the new outcome, or `None` if the ticket was stale.
    pub fn on_timer(
        &mut self,
        ticket: QueryTicket,
        cache: &mut IndexCache,
        store: &RecordStore,
        translator: &dyn Translator,
    ) -> Option<&QueryOutcome> {
        if !self.is_current(&ticket) {
            self.stats.stale_suppressed += 1;
            debug!(
                ticket = ticket.generation,
                current = self.generation,
                "stale query ticket dropped"
            );
            return None;
        }
        self.outstanding = None;

        let index = cache.get_or_build(store);
        let mut ids = search_with_min(&index, &ticket.text, self.min_query_chars);
        if !self.filters.is_empty() {
            ids = intersect(&ids, &self.filters.apply(&index, store));
        }

        let suggestions = build_suggestions(
            &ticket.text,
            store.resolve(&ids),
            translator,
            self.limits,
        );
        let total_hits = ids.len();
        ids.truncate(self.max_results);

        self.last_tokens = tokenize_query(ticket.text.trim());
        self.settled = Some(ticket.text.clone());
        self.state = ControllerState::Settled;
        self.stats.dispatches += 1;
        debug!(
            generation = ticket.generation,
            tokens = self.last_tokens.len(),
            total_hits,
            suggestions = suggestions.len(),
            "query dispatched"
        );

        self.outcome = QueryOutcome {
            query: ticket.text,
            version: Some(store.version()),
            hits: ids,
            total_hits,
            suggestions,
        };
        Some(&self.outcome)
    }

    /// Re-run the settled query, e.g. after the store or filters changed.
    ///
    /// Does nothing unless the controller is `Settled`; a pending query will
    /// pick up the change when its timer fires.
    pub fn refresh(
        &mut self,
        cache: &mut IndexCache,
        store: &RecordStore,
        translator: &dyn Translator,
    ) -> Option<&QueryOutcome> {
        if self.state != ControllerState::Settled {
            return None;
        }
        let ticket = QueryTicket {
            generation: self.generation,
            text: self.raw.clone(),
        };
        self.on_timer(ticket, cache, store, translator)
    }
}
