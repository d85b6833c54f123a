//! The durable mirror of the counter: snapshots and their text encoding.

use serde::{Deserialize, Serialize};

use crate::error::DecodeIssue;
use crate::types::Target;

/// Storage key for the current count.
pub const COUNT_KEY: &str = "mantraCount";

/// Storage key for the current target.
pub const TARGET_KEY: &str = "mantraTarget";

/// The durable part of the counter state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub count: u64,
    pub target: Target,
}

impl Snapshot {
    /// Encode as the text values written to storage.
    pub fn to_record(&self) -> PersistedRecord {
        PersistedRecord {
            count: Some(self.count.to_string()),
            target: Some(self.target.to_string()),
        }
    }
}

/// Raw text values as read from storage. `None` means the key was absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistedRecord {
    pub count: Option<String>,
    pub target: Option<String>,
}

impl PersistedRecord {
    /// Decode into a snapshot, falling back per field.
    ///
    /// Absent fields take their default silently. Present fields that do not
    /// decode take their default and are reported.
    pub fn decode(&self, default_target: Target) -> (Snapshot, Vec<DecodeIssue>) {
        let mut issues = Vec::new();

        let count = match self.count.as_deref() {
            None => 0,
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(count) => count,
                Err(_) => {
                    issues.push(DecodeIssue::InvalidCount(raw.to_string()));
                    0
                }
            },
        };

        let target = match self.target.as_deref() {
            None => default_target,
            Some(raw) => match Target::parse(raw) {
                Ok(target) => target,
                Err(reason) => {
                    issues.push(DecodeIssue::InvalidTarget {
                        raw: raw.to_string(),
                        reason,
                    });
                    default_target
                }
            },
        };

        (Snapshot { count, target }, issues)
    }
}
