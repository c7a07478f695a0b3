//! The debounced controller on virtual time.

use crate::common::{make_record, sample_store, CATALOG_FIXTURE, KEYSTROKES_FIXTURE};
use dalil::{
    parse_script, replay, ControllerState, IdentityTranslator, IndexCache, LabelTable,
    QueryController, RecordStore, SearchConfig, TimerQueue,
};
use std::time::Duration;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn test_keystrokes_within_delay_dispatch_once() {
    let store = sample_store();
    let config = SearchConfig::default();
    let mut controller = QueryController::new(&config);
    let mut timers = TimerQueue::new();
    let mut cache = IndexCache::new();

    for (t, text) in [(0, "m"), (100, "me"), (200, "med")] {
        assert!(timers.advance_to(ms(t)).is_empty());
        assert_eq!(controller.input(text, &mut timers), ControllerState::Pending);
    }
    assert_eq!(timers.pending_count(), 1);

    let fired = timers.advance_to(ms(1000));
    assert_eq!(fired.len(), 1);
    for ticket in fired {
        controller.on_timer(ticket, &mut cache, &store, &IdentityTranslator);
    }

    assert_eq!(controller.stats().dispatches, 1);
    assert_eq!(controller.outcome().query, "med");
    assert_eq!(controller.settled_query(), Some("med"));
}

#[test]
fn test_clear_while_pending_suppresses_dispatch() {
    let store = sample_store();
    let mut controller = QueryController::new(&SearchConfig::default());
    let mut timers = TimerQueue::new();
    let mut cache = IndexCache::new();

    controller.input("med", &mut timers);
    timers.advance(ms(120));
    assert_eq!(controller.input("", &mut timers), ControllerState::Idle);
    assert!(controller.outcome().hits.is_empty());
    assert!(controller.outcome().suggestions.is_empty());

    for ticket in timers.advance(ms(5000)) {
        controller.on_timer(ticket, &mut cache, &store, &IdentityTranslator);
    }
    assert_eq!(controller.stats().dispatches, 0);
    assert_eq!(cache.stats().builds, 0);
}

#[test]
fn test_suggestions_use_labels() {
    let store = sample_store();
    let mut controller = QueryController::new(&SearchConfig::default());
    let mut timers = TimerQueue::new();
    let mut cache = IndexCache::new();
    let labels = LabelTable::builtin_fr();

    controller.input("sant", &mut timers);
    for ticket in timers.advance(ms(300)) {
        controller.on_timer(ticket, &mut cache, &store, &labels);
    }
    // No record matches "sant", but the category label does.
    assert_eq!(controller.outcome().total_hits, 0);
    assert_eq!(controller.outcome().suggestions, vec!["Santé".to_string()]);
}

#[test]
fn test_store_swap_between_dispatches() {
    let mut controller = QueryController::new(&SearchConfig::default());
    let mut timers = TimerQueue::new();
    let mut cache = IndexCache::new();

    let first = RecordStore::new(vec![make_record("1", "Librairie Al Kitab")]);
    controller.input("libr", &mut timers);
    for ticket in timers.advance(ms(300)) {
        controller.on_timer(ticket, &mut cache, &first, &IdentityTranslator);
    }
    assert_eq!(controller.outcome().total_hits, 1);

    let second = RecordStore::empty();
    controller.input("libra", &mut timers);
    for ticket in timers.advance(ms(300)) {
        controller.on_timer(ticket, &mut cache, &second, &IdentityTranslator);
    }
    assert_eq!(controller.outcome().total_hits, 0);
    assert_eq!(controller.outcome().version, Some(second.version()));
    assert_eq!(cache.stats().superseded, 1);
}

#[test]
fn test_fixture_script_replay() {
    let store = RecordStore::from_path(CATALOG_FIXTURE).unwrap();
    let script = std::fs::read_to_string(KEYSTROKES_FIXTURE).unwrap();
    let keys = parse_script(&script).unwrap();
    assert_eq!(keys.len(), 8);

    let log = replay(&store, &SearchConfig::default(), &LabelTable::builtin_fr(), &keys);
    let dispatches: Vec<_> = log.dispatches().collect();

    // "hotel" settles 300ms after the last keystroke; "tax" is cleared before it settles.
    assert_eq!(dispatches.len(), 1);
    assert_eq!(dispatches[0].0, ms(580));
    assert_eq!(dispatches[0].1.query, "hotel");
    assert_eq!(dispatches[0].1.total_hits, 1);
    assert_eq!(log.controller.keystrokes, 8);
    assert_eq!(log.controller.clears, 1);
}
