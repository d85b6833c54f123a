//! The Counter: owns the counter state and keeps it durable.
//!
//! The Counter brings together the pure transitions, the storage backend,
//! and the notifier. Operations are synchronous and apply the effects each
//! transition requests: persistence is queued to a background writer,
//! vibration and alerts go to the notifier.

use std::sync::Arc;

use mantra_counter_core::{
    Alert, AlertKind, CounterState, Effect, PersistedRecord, Target, Transition,
};
use mantra_counter_store::Storage;

use crate::config::CounterConfig;
use crate::error::{CounterError, Result};
use crate::notify::Notifier;
use crate::persist::Persister;

/// The Counter Store.
///
/// Provides:
/// - Restoring count and target from storage on start
/// - Incrementing, resetting, and setting the target
/// - A one-shot target-reached notification
/// - Best-effort persistence after every mutation
pub struct Counter<S: Storage + 'static, N: Notifier> {
    state: CounterState,
    storage: Arc<S>,
    notifier: N,
    config: CounterConfig,
    persister: Persister,
}

impl<S: Storage + 'static, N: Notifier> Counter<S, N> {
    /// Load persisted state and start the persistence writer.
    ///
    /// Never fails: unreadable or undecodable values are logged and replaced
    /// by their defaults. Must be called from within a tokio runtime.
    pub async fn initialize(storage: S, notifier: N, config: CounterConfig) -> Self {
        let storage = Arc::new(storage);
        let record = load_record(storage.as_ref(), &config).await;

        let (state, issues) = CounterState::restore(&record, config.default_target);
        for issue in &issues {
            tracing::warn!(issue = %issue, "ignoring persisted value");
        }
        tracing::debug!(
            count = state.count(),
            target_count = state.target().get(),
            "counter initialized"
        );

        let persister = Persister::spawn(Arc::clone(&storage), config.keys.clone());
        Self {
            state,
            storage,
            notifier,
            config,
            persister,
        }
    }

    /// Get the current state.
    pub fn state(&self) -> CounterState {
        self.state
    }

    pub fn count(&self) -> u64 {
        self.state.count()
    }

    pub fn target(&self) -> Target {
        self.state.target()
    }

    pub fn is_editing(&self) -> bool {
        self.state.is_editing()
    }

    /// Get the storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Get the notifier.
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Get the configuration.
    pub fn config(&self) -> &CounterConfig {
        &self.config
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Add one to the count.
    pub fn increment(&mut self) -> CounterState {
        let transition = self.state.increment();
        self.apply(transition)
    }

    /// Set the count back to zero.
    pub fn reset(&mut self) -> CounterState {
        let transition = self.state.reset();
        self.apply(transition)
    }

    /// Start editing the target.
    pub fn begin_edit(&mut self) -> CounterState {
        let transition = self.state.begin_edit();
        self.apply(transition)
    }

    /// Stop editing without changing the target.
    pub fn cancel_edit(&mut self) -> CounterState {
        let transition = self.state.cancel_edit();
        self.apply(transition)
    }

    /// Commit a new target from user text.
    ///
    /// Invalid input raises an alert, leaves the state untouched, and is
    /// returned as `InvalidTarget`.
    pub fn set_target(&mut self, candidate: &str) -> Result<CounterState> {
        match self.state.submit_target(candidate) {
            Ok(transition) => Ok(self.apply(transition)),
            Err(reason) => {
                tracing::debug!(candidate, reason = %reason, "rejected target");
                self.notifier.alert(&Alert::invalid_target());
                Err(CounterError::InvalidTarget(reason))
            }
        }
    }

    /// Queue the current count and target for writing.
    pub fn persist(&self) {
        self.persister.enqueue(self.state.snapshot());
    }

    /// Wait until every write queued so far has been attempted.
    pub async fn flush(&self) {
        self.persister.flush().await;
    }

    /// Stop the writer after draining pending writes.
    pub async fn shutdown(self) -> Result<()> {
        self.persister.shutdown().await
    }

    fn apply(&mut self, transition: Transition) -> CounterState {
        self.state = transition.state;

        for effect in transition.effects {
            match effect {
                Effect::Persist(snapshot) => self.persister.enqueue(snapshot),
                Effect::Vibrate => self.notifier.vibrate(self.config.vibration()),
                Effect::Alert(alert) => {
                    if alert.kind == AlertKind::TargetReached {
                        tracing::info!(target_count = self.state.target().get(), "target reached");
                    }
                    self.notifier.alert(&alert);
                }
            }
        }

        self.state
    }
}

/// Read both persisted values, treating read failures as absent.
async fn load_record<S: Storage + ?Sized>(storage: &S, config: &CounterConfig) -> PersistedRecord {
    PersistedRecord {
        count: read_key(storage, &config.keys.count).await,
        target: read_key(storage, &config.keys.target).await,
    }
}

async fn read_key<S: Storage + ?Sized>(storage: &S, key: &str) -> Option<String> {
    match storage.get_item(key).await {
        Ok(value) => value,
        Err(source) => {
            let error = CounterError::StorageRead {
                key: key.to_string(),
                source,
            };
            tracing::error!(error = %error, "failed to load data");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;

    use mantra_counter_core::EditMode;
    use mantra_counter_store::MemoryStorage;

    #[derive(Default)]
    struct Calls {
        vibrations: Mutex<Vec<Duration>>,
        alerts: Mutex<Vec<AlertKind>>,
    }

    impl Notifier for Calls {
        fn vibrate(&self, duration: Duration) {
            self.vibrations.lock().unwrap().push(duration);
        }

        fn alert(&self, alert: &Alert) {
            self.alerts.lock().unwrap().push(alert.kind);
        }
    }

    async fn counter_with(
        items: &[(&str, &str)],
    ) -> (Counter<MemoryStorage, Arc<Calls>>, Arc<Calls>) {
        let calls = Arc::new(Calls::default());
        let storage = MemoryStorage::with_items(items.iter().copied());
        let counter =
            Counter::initialize(storage, Arc::clone(&calls), CounterConfig::default()).await;
        (counter, calls)
    }

    #[tokio::test]
    async fn test_initialize_defaults() {
        let (counter, _) = counter_with(&[]).await;
        assert_eq!(counter.count(), 0);
        assert_eq!(counter.target().get(), 108);
        assert_eq!(counter.state().mode(), EditMode::Idle);
    }

    #[tokio::test]
    async fn test_initialize_does_not_write() {
        let (counter, _) = counter_with(&[]).await;
        counter.flush().await;
        assert!(counter.storage().keys().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reaching_target_notifies_once() {
        let (mut counter, calls) =
            counter_with(&[("mantraCount", "107"), ("mantraTarget", "108")]).await;

        counter.increment();
        counter.increment();
        counter.increment();

        assert_eq!(counter.count(), 110);
        assert_eq!(
            *calls.vibrations.lock().unwrap(),
            vec![Duration::from_millis(500)]
        );
        assert_eq!(*calls.alerts.lock().unwrap(), vec![AlertKind::TargetReached]);
    }

    #[tokio::test]
    async fn test_invalid_target_alerts_and_keeps_state() {
        let (mut counter, calls) = counter_with(&[]).await;
        counter.begin_edit();

        let err = counter.set_target("abc").unwrap_err();
        assert!(matches!(err, CounterError::InvalidTarget(_)));
        assert!(counter.is_editing());
        assert_eq!(counter.target().get(), 108);
        assert_eq!(*calls.alerts.lock().unwrap(), vec![AlertKind::InvalidTarget]);
        assert!(calls.vibrations.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_persist_writes_current_state() {
        let (mut counter, _) = counter_with(&[]).await;
        counter.increment();
        counter.set_target("21").unwrap();
        counter.flush().await;

        let storage = counter.storage();
        assert_eq!(storage.get_item("mantraCount").await.unwrap().as_deref(), Some("1"));
        assert_eq!(storage.get_item("mantraTarget").await.unwrap().as_deref(), Some("21"));
    }
}
