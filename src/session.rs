// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Async search session.
//!
//! One tokio task owns a [`QueryController`], its [`IndexCache`], the current
//! [`RecordStore`] and a [`TimerQueue`] anchored at the task's start instant.
//! Keystrokes arrive on an unbounded channel; settled outcomes are published
//! on a `watch` channel so readers only ever see the latest one.
//!
//! ```text
//! SessionHandle ──mpsc──→ ┌───────────── session task ─────────────┐
//!   input / store /       │ select! { command, sleep_until(next) } │
//!   filters               │   controller ← timers, cache, store    │
//!                         └───────────────────┬────────────────────┘
//! watch::Receiver ←───────── latest outcome ──┘
//! ```
//!
//! The controller itself is synchronous; the task's only suspension points
//! are the channel and the next timer deadline.

use crate::cache::{CacheStats, IndexCache};
use crate::config::SearchConfig;
use crate::debounce::{
    ControllerState, ControllerStats, QueryController, QueryOutcome, QueryTicket, TimerQueue,
};
use crate::filter::SearchFilters;
use crate::suggest::Translator;
use crate::types::RecordStore;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info};

#[derive(Debug)]
enum Command {
    Input(String),
    ReplaceStore(RecordStore),
    SetFilters(SearchFilters),
}

/// Counters returned when a session ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionReport {
    pub controller: ControllerStats,
    pub cache: CacheStats,
}

/// Sending side of a session. Dropping every handle ends the session.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    commands: mpsc::UnboundedSender<Command>,
    outcomes: watch::Receiver<QueryOutcome>,
}

impl SessionHandle {
    /// Report a keystroke. Returns `false` if the session has ended.
    pub fn input(&self, text: impl Into<String>) -> bool {
        self.commands.send(Command::Input(text.into())).is_ok()
    }

    /// Swap in a new catalog snapshot. The settled query is re-run against it.
    pub fn replace_store(&self, store: RecordStore) -> bool {
        self.commands.send(Command::ReplaceStore(store)).is_ok()
    }

    pub fn set_filters(&self, filters: SearchFilters) -> bool {
        self.commands.send(Command::SetFilters(filters)).is_ok()
    }

    /// A receiver notified on every published outcome.
    pub fn subscribe(&self) -> watch::Receiver<QueryOutcome> {
        self.outcomes.clone()
    }

    /// The most recently published outcome.
    pub fn latest(&self) -> QueryOutcome {
        self.outcomes.borrow().clone()
    }
}

/// Spawn a session task on the current tokio runtime.
pub fn spawn_session(
    store: RecordStore,
    config: &SearchConfig,
    translator: Arc<dyn Translator + Send + Sync>,
) -> (SessionHandle, JoinHandle<SessionReport>) {
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (outcome_tx, outcome_rx) = watch::channel(QueryOutcome::default());

    let session = Session {
        controller: QueryController::new(config),
        cache: IndexCache::with_parallel_threshold(config.parallel_threshold),
        timers: TimerQueue::new(),
        store,
        translator,
        outcomes: outcome_tx,
    };
    let task = tokio::spawn(session.run(command_rx));

    (
        SessionHandle {
            commands: command_tx,
            outcomes: outcome_rx,
        },
        task,
    )
}

struct Session {
    controller: QueryController,
    cache: IndexCache,
    timers: TimerQueue<QueryTicket>,
    store: RecordStore,
    translator: Arc<dyn Translator + Send + Sync>,
    outcomes: watch::Sender<QueryOutcome>,
}

impl Session {
    async fn run(mut self, mut commands: mpsc::UnboundedReceiver<Command>) -> SessionReport {
        let origin = Instant::now();
        info!(records = self.store.len(), "search session started");

        loop {
            let next = self.timers.next_deadline().map(|d| origin + d);
            let wake = async move {
                match next {
                    Some(deadline) => tokio::time::sleep_until(deadline).await,
                    None => std::future::pending::<()>().await,
                }
            };

            tokio::select! {
                command = commands.recv() => {
                    let Some(command) = command else { break };
                    self.fire_due(origin.elapsed());
                    self.handle(command);
                }
                _ = wake => {
                    self.fire_due(origin.elapsed());
                }
            }
        }

        let report = SessionReport {
            controller: self.controller.stats(),
            cache: self.cache.stats(),
        };
        info!(
            dispatches = report.controller.dispatches,
            stale = report.controller.stale_suppressed,
            "search session ended"
        );
        report
    }

    /// Deliver every timer due by `now` in deadline order.
    fn fire_due(&mut self, now: std::time::Duration) {
        while let Some((_, ticket)) = self.timers.pop_due(now) {
            let outcome = self.controller.on_timer(
                ticket,
                &mut self.cache,
                &self.store,
                self.translator.as_ref(),
            );
            if let Some(outcome) = outcome {
                self.outcomes.send_replace(outcome.clone());
            }
        }
        self.timers.advance_to(now);
    }

    fn handle(&mut self, command: Command) {
        match command {
            Command::Input(text) => {
                let state = self.controller.input(&text, &mut self.timers);
                if state == ControllerState::Idle {
                    self.outcomes.send_replace(QueryOutcome::default());
                }
            }
            Command::ReplaceStore(store) => {
                debug!(version = %store.version(), records = store.len(), "store replaced");
                self.store = store;
                self.refresh();
            }
            Command::SetFilters(filters) => {
                self.controller.set_filters(filters);
                self.refresh();
            }
        }
    }

    fn refresh(&mut self) {
        let outcome =
            self.controller
                .refresh(&mut self.cache, &self.store, self.translator.as_ref());
        if let Some(outcome) = outcome {
            self.outcomes.send_replace(outcome.clone());
        }
    }
}
