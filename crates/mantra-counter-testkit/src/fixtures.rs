//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use mantra_counter::{Alert, AlertKind, Counter, CounterConfig, Notifier};
use mantra_counter_store::{MemoryStorage, Result, Storage, StoreError};

/// Something the counter asked the notifier to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Vibrate(Duration),
    Alert(Alert),
}

/// Notifier that records every call.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    calls: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// All notifications, in call order.
    pub fn notifications(&self) -> Vec<Notification> {
        self.calls.lock().unwrap().clone()
    }

    /// All alerts, in call order.
    pub fn alerts(&self) -> Vec<Alert> {
        self.notifications()
            .into_iter()
            .filter_map(|n| match n {
                Notification::Alert(alert) => Some(alert),
                Notification::Vibrate(_) => None,
            })
            .collect()
    }

    /// All vibration durations, in call order.
    pub fn vibrations(&self) -> Vec<Duration> {
        self.notifications()
            .into_iter()
            .filter_map(|n| match n {
                Notification::Vibrate(d) => Some(d),
                Notification::Alert(_) => None,
            })
            .collect()
    }

    /// Number of alerts of a given kind.
    pub fn alert_count(&self, kind: AlertKind) -> usize {
        self.alerts().iter().filter(|a| a.kind == kind).count()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }
}

impl Notifier for RecordingNotifier {
    fn vibrate(&self, duration: Duration) {
        self.calls.lock().unwrap().push(Notification::Vibrate(duration));
    }

    fn alert(&self, alert: &Alert) {
        self.calls
            .lock()
            .unwrap()
            .push(Notification::Alert(alert.clone()));
    }
}

/// In-memory storage whose reads and writes can be made to fail.
#[derive(Debug, Default)]
pub struct FlakyStorage {
    inner: MemoryStorage,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl FlakyStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items<K, V>(items: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            inner: MemoryStorage::with_items(items),
            ..Self::default()
        }
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of write calls attempted, failed ones included.
    pub fn write_attempts(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// The backing store, bypassing failure injection.
    pub fn inner(&self) -> &MemoryStorage {
        &self.inner
    }

    fn check_read(&self) -> Result<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("injected read failure".into()));
        }
        Ok(())
    }

    fn check_write(&self) -> Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("injected write failure".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for FlakyStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.check_read()?;
        self.inner.get_item(key).await
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.check_write()?;
        self.inner.set_item(key, value).await
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        self.check_write()?;
        self.inner.remove_item(key).await
    }

    async fn keys(&self) -> Result<Vec<String>> {
        self.check_read()?;
        self.inner.keys().await
    }

    async fn set_items(&self, items: &[(&str, String)]) -> Result<()> {
        self.check_write()?;
        self.inner.set_items(items).await
    }
}

/// Counter type produced by [`TestFixture`].
pub type TestCounter = Counter<Arc<FlakyStorage>, Arc<RecordingNotifier>>;

/// Shared storage and notifier that outlive any one counter, so a test can
/// simulate restarts.
pub struct TestFixture {
    pub storage: Arc<FlakyStorage>,
    pub notifier: Arc<RecordingNotifier>,
    pub config: CounterConfig,
}

impl TestFixture {
    /// Create a fixture with empty storage.
    pub fn new() -> Self {
        Self::with_storage(FlakyStorage::new())
    }

    /// Create a fixture with pre-filled storage.
    pub fn with_items(items: &[(&str, &str)]) -> Self {
        Self::with_storage(FlakyStorage::with_items(items.iter().copied()))
    }

    fn with_storage(storage: FlakyStorage) -> Self {
        Self {
            storage: Arc::new(storage),
            notifier: Arc::new(RecordingNotifier::new()),
            config: CounterConfig::default(),
        }
    }

    /// Start a counter over the fixture's storage.
    pub async fn counter(&self) -> TestCounter {
        Counter::initialize(
            Arc::clone(&self.storage),
            Arc::clone(&self.notifier),
            self.config.clone(),
        )
        .await
    }

    /// Read a raw stored value, bypassing failure injection.
    pub async fn stored(&self, key: &str) -> Option<String> {
        self.storage.inner().get_item(key).await.unwrap()
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
