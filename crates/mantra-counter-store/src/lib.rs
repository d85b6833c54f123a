//! # Mantra Counter Store
//!
//! The durability sink for the mantra counter. Provides a trait-based
//! key-value interface with SQLite and in-memory implementations.
//!
//! ## Overview
//!
//! Values are text. The counter writes its count and target as decimal
//! strings under two fixed keys and reads them back once at startup.
//!
//! ## Key Types
//!
//! - [`Storage`] - The async trait for all storage operations
//! - [`SqliteStorage`] - SQLite-based persistent storage
//! - [`MemoryStorage`] - In-memory storage for tests
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mantra_counter_store::{SqliteStorage, Storage};
//!
//! async fn example() {
//!     let store = SqliteStorage::open("mantra.db").unwrap();
//!     store.set_item("mantraCount", "12").await.unwrap();
//!     let count = store.get_item("mantraCount").await.unwrap();
//!     assert_eq!(count.as_deref(), Some("12"));
//! }
//! ```

pub mod error;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;
pub use traits::Storage;
