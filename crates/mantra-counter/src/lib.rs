//! # Mantra Counter
//!
//! A tap counter with a target, persisted across restarts.
//!
//! ## Overview
//!
//! The [`Counter`] owns two numbers, the count and the target, and keeps
//! them durable in a key-value [`Storage`](store::Storage):
//!
//! - **Increment**: adds one; landing exactly on the target fires a one-shot
//!   vibration and alert through the [`Notifier`]
//! - **Reset**: sets the count to zero
//! - **Set target**: accepts positive integers only; anything else raises an
//!   `Invalid Target` alert and leaves the state unchanged
//!
//! Every mutation queues a write. Writes are fire-and-forget: failures are
//! logged and never surfaced, and in-memory state is never rolled back.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mantra_counter::{Counter, CounterConfig, LogNotifier};
//! use mantra_counter::store::SqliteStorage;
//!
//! async fn example() {
//!     let storage = SqliteStorage::open("mantra.db").unwrap();
//!     let mut counter = Counter::initialize(storage, LogNotifier, CounterConfig::default()).await;
//!
//!     counter.increment();
//!     counter.set_target("54").unwrap();
//!     counter.reset();
//!
//!     counter.shutdown().await.unwrap();
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `mantra_counter::core` - Pure state transitions
//! - `mantra_counter::store` - Storage abstraction and SQLite

pub mod config;
pub mod counter;
pub mod error;
pub mod notify;
mod persist;

pub use mantra_counter_core as core;
pub use mantra_counter_store as store;

pub use config::{CounterConfig, StorageKeys};
pub use counter::Counter;
pub use error::{CounterError, Result};
pub use notify::{LogNotifier, Notifier};

pub use mantra_counter_core::{
    Alert, AlertKind, CounterState, EditMode, Snapshot, Target, TargetError,
};
