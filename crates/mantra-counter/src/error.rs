//! Error types for the Counter.

use mantra_counter_core::TargetError;
use mantra_counter_store::StoreError;
use thiserror::Error;

/// Errors that can occur during Counter operations.
///
/// Only `InvalidTarget` ever reaches a caller. The storage variants are
/// built internally so failures are logged with a consistent shape, then
/// recovered from.
#[derive(Debug, Error)]
pub enum CounterError {
    /// Reading a persisted value failed; the default was used instead.
    #[error("failed to load {key}: {source}")]
    StorageRead {
        key: String,
        #[source]
        source: StoreError,
    },

    /// Writing the current state failed; in-memory state is kept.
    #[error("failed to save counter state: {source}")]
    StorageWrite {
        #[source]
        source: StoreError,
    },

    /// The candidate target was not a positive integer.
    #[error("invalid target: {0}")]
    InvalidTarget(#[from] TargetError),

    /// The background writer stopped before draining its queue.
    #[error("persistence writer stopped: {0}")]
    WriterStopped(String),
}

/// Result type for Counter operations.
pub type Result<T> = std::result::Result<T, CounterError>;
