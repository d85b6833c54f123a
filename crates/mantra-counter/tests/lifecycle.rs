//! End-to-end counter lifecycle: restore, mutate, persist, restart.

use std::sync::Arc;
use std::time::Duration;

use mantra_counter::store::{SqliteStorage, Storage};
use mantra_counter::{AlertKind, Counter, CounterConfig, CounterError, EditMode};
use mantra_counter_testkit::{Notification, RecordingNotifier, TestFixture};

// ─────────────────────────────────────────────────────────────────────────────
// Startup
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_fresh_start_uses_defaults() {
    let fixture = TestFixture::new();
    let counter = fixture.counter().await;

    assert_eq!(counter.count(), 0);
    assert_eq!(counter.target().get(), 108);
    assert_eq!(counter.state().mode(), EditMode::Idle);
}

#[tokio::test]
async fn test_restore_then_reach_target() {
    let fixture = TestFixture::with_items(&[("mantraCount", "107"), ("mantraTarget", "108")]);
    let mut counter = fixture.counter().await;

    assert_eq!(counter.count(), 107);
    assert_eq!(counter.target().get(), 108);
    assert!(fixture.notifier.notifications().is_empty());

    counter.increment();
    assert_eq!(counter.count(), 108);

    let notifications = fixture.notifier.notifications();
    assert_eq!(notifications.len(), 2);
    assert_eq!(notifications[0], Notification::Vibrate(Duration::from_millis(500)));
    match &notifications[1] {
        Notification::Alert(alert) => {
            assert_eq!(alert.kind, AlertKind::TargetReached);
            assert_eq!(alert.title, "Target Reached!");
            assert_eq!(alert.message, "You've completed 108 mantras!");
        }
        other => panic!("expected alert, got {:?}", other),
    }
}

#[tokio::test]
async fn test_read_failure_falls_back_to_defaults() {
    let fixture = TestFixture::with_items(&[("mantraCount", "50"), ("mantraTarget", "60")]);
    fixture.storage.set_fail_reads(true);

    let counter = fixture.counter().await;
    assert_eq!(counter.count(), 0);
    assert_eq!(counter.target().get(), 108);
}

#[tokio::test]
async fn test_unparseable_values_fall_back() {
    let fixture = TestFixture::with_items(&[("mantraCount", "NaN"), ("mantraTarget", "-1")]);
    let counter = fixture.counter().await;

    assert_eq!(counter.count(), 0);
    assert_eq!(counter.target().get(), 108);
}

#[tokio::test]
async fn test_restored_at_target_does_not_fire() {
    let fixture = TestFixture::with_items(&[("mantraCount", "108"), ("mantraTarget", "108")]);
    let mut counter = fixture.counter().await;
    counter.increment();

    assert_eq!(counter.count(), 109);
    assert_eq!(fixture.notifier.alert_count(AlertKind::TargetReached), 0);
}

// ─────────────────────────────────────────────────────────────────────────────
// Target-reached event
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_exactly_one_event_on_cth_increment() {
    for c in 1..=25u64 {
        let fixture = TestFixture::new();
        let mut counter = fixture.counter().await;
        counter.set_target(&c.to_string()).unwrap();

        for i in 1..=c {
            counter.increment();
            let fired = fixture.notifier.alert_count(AlertKind::TargetReached);
            assert_eq!(fired, usize::from(i == c), "c={} i={}", c, i);
        }
        for _ in 0..5 {
            counter.increment();
        }
        assert_eq!(fixture.notifier.alert_count(AlertKind::TargetReached), 1);
    }
}

#[tokio::test]
async fn test_reset_rearms_event() {
    let fixture = TestFixture::new();
    let mut counter = fixture.counter().await;
    counter.set_target("3").unwrap();

    for _ in 0..4 {
        counter.increment();
    }
    counter.reset();
    assert_eq!(fixture.notifier.alert_count(AlertKind::TargetReached), 1);

    for _ in 0..3 {
        counter.increment();
    }
    assert_eq!(fixture.notifier.alert_count(AlertKind::TargetReached), 2);
    assert_eq!(fixture.notifier.vibrations().len(), 2);
}

#[tokio::test]
async fn test_custom_vibration_duration() {
    let mut fixture = TestFixture::with_items(&[("mantraCount", "0"), ("mantraTarget", "1")]);
    fixture.config.vibration_ms = 250;
    let mut counter = fixture.counter().await;
    counter.increment();

    assert_eq!(fixture.notifier.vibrations(), vec![Duration::from_millis(250)]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Target editing
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_set_target_rejects_invalid_input() {
    let fixture = TestFixture::new();
    let mut counter = fixture.counter().await;
    counter.begin_edit();

    for bad in ["0", "-5", "abc"] {
        let err = counter.set_target(bad).unwrap_err();
        assert!(matches!(err, CounterError::InvalidTarget(_)), "{:?}", bad);
        assert_eq!(counter.target().get(), 108);
        assert!(counter.is_editing());
    }

    assert_eq!(fixture.notifier.alert_count(AlertKind::InvalidTarget), 3);
    let alert = &fixture.notifier.alerts()[0];
    assert_eq!(alert.title, "Invalid Target");
    assert_eq!(alert.message, "Please enter a positive number");

    counter.flush().await;
    assert_eq!(fixture.storage.write_attempts(), 0);
}

#[tokio::test]
async fn test_set_target_success_exits_editing() {
    let fixture = TestFixture::new();
    let mut counter = fixture.counter().await;
    counter.begin_edit();

    let state = counter.set_target("42").unwrap();
    assert_eq!(state.target().get(), 42);
    assert_eq!(state.mode(), EditMode::Idle);

    counter.flush().await;
    assert_eq!(fixture.stored("mantraTarget").await.as_deref(), Some("42"));
}

#[tokio::test]
async fn test_set_target_reads_leading_integer() {
    let fixture = TestFixture::new();
    let mut counter = fixture.counter().await;
    counter.begin_edit();

    let state = counter.set_target("12 mantras").unwrap();
    assert_eq!(state.target().get(), 12);
    assert_eq!(counter.set_target("4.5").unwrap().target().get(), 4);
    assert_eq!(fixture.notifier.alert_count(AlertKind::InvalidTarget), 0);

    counter.flush().await;
    assert_eq!(fixture.stored("mantraTarget").await.as_deref(), Some("4"));
}

#[tokio::test]
async fn test_cancel_edit_keeps_target() {
    let fixture = TestFixture::new();
    let mut counter = fixture.counter().await;
    counter.begin_edit();
    counter.cancel_edit();

    assert!(!counter.is_editing());
    assert_eq!(counter.target().get(), 108);
}

// ─────────────────────────────────────────────────────────────────────────────
// Persistence
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_reset_roundtrips_through_storage() {
    let fixture = TestFixture::with_items(&[("mantraCount", "17"), ("mantraTarget", "21")]);
    let mut counter = fixture.counter().await;
    counter.reset();
    counter.persist();
    counter.shutdown().await.unwrap();

    assert_eq!(fixture.stored("mantraCount").await.as_deref(), Some("0"));
    assert_eq!(fixture.stored("mantraTarget").await.as_deref(), Some("21"));

    let counter = fixture.counter().await;
    assert_eq!(counter.count(), 0);
    assert_eq!(counter.target().get(), 21);
}

#[tokio::test]
async fn test_persist_twice_is_idempotent() {
    let fixture = TestFixture::new();
    let mut counter = fixture.counter().await;
    counter.increment();

    counter.persist();
    counter.flush().await;
    let first = (
        fixture.stored("mantraCount").await,
        fixture.stored("mantraTarget").await,
    );

    counter.persist();
    counter.flush().await;
    let second = (
        fixture.stored("mantraCount").await,
        fixture.stored("mantraTarget").await,
    );

    assert_eq!(first, (Some("1".to_string()), Some("108".to_string())));
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_write_failure_keeps_memory_state() {
    let fixture = TestFixture::with_items(&[("mantraCount", "5")]);
    fixture.storage.set_fail_writes(true);

    let mut counter = fixture.counter().await;
    counter.increment();
    counter.increment();
    counter.flush().await;

    assert_eq!(counter.count(), 7);
    assert_eq!(fixture.storage.write_attempts(), 2);
    assert_eq!(fixture.stored("mantraCount").await.as_deref(), Some("5"));

    // A later write carries the latest state once storage recovers.
    fixture.storage.set_fail_writes(false);
    counter.increment();
    counter.flush().await;
    assert_eq!(fixture.stored("mantraCount").await.as_deref(), Some("8"));
}

#[tokio::test]
async fn test_sqlite_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mantra.db");
    let notifier = Arc::new(RecordingNotifier::new());

    {
        let storage = SqliteStorage::open(&path).unwrap();
        let mut counter =
            Counter::initialize(storage, Arc::clone(&notifier), CounterConfig::default()).await;
        counter.set_target("10").unwrap();
        for _ in 0..9 {
            counter.increment();
        }
        counter.shutdown().await.unwrap();
    }

    let storage = SqliteStorage::open(&path).unwrap();
    assert_eq!(
        storage.get_item("mantraCount").await.unwrap().as_deref(),
        Some("9")
    );

    let mut counter =
        Counter::initialize(storage, Arc::clone(&notifier), CounterConfig::default()).await;
    assert_eq!(counter.count(), 9);
    assert_eq!(counter.target().get(), 10);

    counter.increment();
    assert_eq!(notifier.alert_count(AlertKind::TargetReached), 1);
    counter.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_custom_keys() {
    let mut fixture = TestFixture::with_items(&[("japaCount", "3")]);
    fixture.config.keys.count = "japaCount".into();
    fixture.config.keys.target = "japaTarget".into();

    let mut counter = fixture.counter().await;
    assert_eq!(counter.count(), 3);
    counter.increment();
    counter.flush().await;

    assert_eq!(fixture.stored("japaCount").await.as_deref(), Some("4"));
    assert_eq!(fixture.stored("japaTarget").await.as_deref(), Some("108"));
    assert_eq!(fixture.stored("mantraCount").await, None);
}
