//! Error types for the mantra counter core.

use thiserror::Error;

/// Errors produced when a candidate target is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TargetError {
    #[error("target {0:?} is not a number")]
    NotANumber(String),

    #[error("target must be a positive number, got {0}")]
    NotPositive(i64),
}

/// A persisted field that could not be decoded and fell back to its default.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeIssue {
    #[error("persisted count {0:?} is not a non-negative integer")]
    InvalidCount(String),

    #[error("persisted target {raw:?} is invalid: {reason}")]
    InvalidTarget { raw: String, reason: TargetError },
}
