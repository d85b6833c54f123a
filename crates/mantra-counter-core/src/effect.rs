//! Side-effect requests produced by state transitions.
//!
//! Transitions never perform I/O. They describe what the shell should do
//! (persist, vibrate, alert) and the shell carries it out.

use serde::{Deserialize, Serialize};

use crate::record::Snapshot;

/// A side effect requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Write the snapshot to the durability sink.
    Persist(Snapshot),
    /// Buzz the device for the configured duration.
    Vibrate,
    /// Show an acknowledgment prompt.
    Alert(Alert),
}

/// What an alert is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    TargetReached,
    InvalidTarget,
}

/// A user-facing acknowledgment prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub kind: AlertKind,
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn target_reached(target: u64) -> Self {
        Self {
            kind: AlertKind::TargetReached,
            title: "Target Reached!".to_string(),
            message: format!("You've completed {} mantras!", target),
        }
    }

    pub fn invalid_target() -> Self {
        Self {
            kind: AlertKind::InvalidTarget,
            title: "Invalid Target".to_string(),
            message: "Please enter a positive number".to_string(),
        }
    }
}
