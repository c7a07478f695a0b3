//! Async sessions on a paused tokio clock.

use crate::common::sample_store;
use dalil::{spawn_session, IdentityTranslator, LabelTable, SearchConfig};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

#[tokio::test(start_paused = true)]
async fn test_session_settles_latest_text() {
    let (handle, task) = spawn_session(
        sample_store(),
        &SearchConfig::default(),
        Arc::new(LabelTable::builtin_fr()),
    );
    let mut outcomes = handle.subscribe();

    handle.input("m");
    handle.input("mu");
    handle.input("mus");
    outcomes.changed().await.unwrap();
    assert_eq!(outcomes.borrow().query, "mus");
    assert_eq!(outcomes.borrow().total_hits, 1);

    drop(outcomes);
    drop(handle);
    let report = task.await.unwrap();
    assert_eq!(report.controller.dispatches, 1);
    assert_eq!(report.controller.keystrokes, 3);
}

#[tokio::test(start_paused = true)]
async fn test_session_custom_delay() {
    let config = SearchConfig {
        search_delay_ms: 50,
        ..SearchConfig::default()
    };
    let (handle, task) = spawn_session(sample_store(), &config, Arc::new(IdentityTranslator));

    handle.input("hotel");
    sleep(Duration::from_millis(49)).await;
    assert!(handle.latest().query.is_empty());
    sleep(Duration::from_millis(2)).await;
    assert_eq!(handle.latest().query, "hotel");

    drop(handle);
    task.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_session_ends_when_handles_dropped() {
    let (handle, task) = spawn_session(
        sample_store(),
        &SearchConfig::default(),
        Arc::new(IdentityTranslator),
    );
    let second = handle.clone();
    drop(handle);
    assert!(second.input("taxi"));
    drop(second);

    let report = task.await.unwrap();
    // The pending timer dies with the session.
    assert_eq!(report.controller.dispatches, 0);
}
