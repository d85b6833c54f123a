//! # Mantra Counter Testkit
//!
//! Testing utilities for the mantra counter.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: A recording notifier, storage with injectable failures, and
//!   a [`TestFixture`] that lets a test restart the counter over the same storage
//! - **Generators**: Proptest strategies for targets and user action sequences
//!
//! ## Test Fixtures
//!
//! ```rust
//! use mantra_counter_testkit::TestFixture;
//!
//! # async fn example() {
//! let fixture = TestFixture::with_items(&[("mantraCount", "107")]);
//! let mut counter = fixture.counter().await;
//! counter.increment();
//! assert_eq!(fixture.notifier.alerts().len(), 1);
//! # }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use mantra_counter_testkit::generators::{ops, Op};
//!
//! proptest! {
//!     #[test]
//!     fn target_stays_positive(ops in ops(100)) {
//!         // ...
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::{FlakyStorage, Notification, RecordingNotifier, TestCounter, TestFixture};
pub use generators::{invalid_target_text, ops, valid_target_text, Op};
