//! # Mantra Counter Core
//!
//! Pure state transitions for the mantra counter: a count, a positive
//! target, and the edit mode for changing the target.
//!
//! This crate contains no I/O, no storage, no timers. Each operation returns
//! the next [`CounterState`] plus a list of [`Effect`]s (persist, vibrate,
//! alert) for the caller to carry out.
//!
//! ## Key Types
//!
//! - [`CounterState`] - Count, target and edit mode
//! - [`Target`] - A count goal that is always `>= 1`
//! - [`Snapshot`] - The durable part of the state
//! - [`PersistedRecord`] - Raw text values as stored under [`COUNT_KEY`] and [`TARGET_KEY`]
//! - [`Transition`] - Next state plus requested effects
//!
//! ## Usage
//!
//! ```rust
//! use mantra_counter_core::{CounterState, Target};
//!
//! let state = CounterState::new(107, Target::new(108).unwrap());
//! let transition = state.increment();
//! assert_eq!(transition.state.count(), 108);
//! assert!(transition.reached_target());
//! ```

pub mod effect;
pub mod error;
pub mod record;
pub mod state;
pub mod types;

pub use effect::{Alert, AlertKind, Effect};
pub use error::{DecodeIssue, TargetError};
pub use record::{PersistedRecord, Snapshot, COUNT_KEY, TARGET_KEY};
pub use state::{CounterState, EditMode, Transition};
pub use types::{Target, DEFAULT_TARGET};
