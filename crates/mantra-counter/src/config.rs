//! Configuration for the Counter.

use std::time::Duration;

use mantra_counter_core::{Target, COUNT_KEY, TARGET_KEY};
use serde::{Deserialize, Serialize};

/// Storage key names for the two persisted values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageKeys {
    pub count: String,
    pub target: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            count: COUNT_KEY.to_string(),
            target: TARGET_KEY.to_string(),
        }
    }
}

/// Configuration for the Counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    /// Target used when none has been persisted.
    pub default_target: Target,
    /// How long to vibrate when the target is reached, in milliseconds.
    pub vibration_ms: u64,
    /// Where the count and target live in storage.
    pub keys: StorageKeys,
}

impl CounterConfig {
    pub fn vibration(&self) -> Duration {
        Duration::from_millis(self.vibration_ms)
    }
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            default_target: Target::default(),
            vibration_ms: 500,
            keys: StorageKeys::default(),
        }
    }
}
