//! Storage trait: the abstract interface for the durability sink.
//!
//! The counter only needs a flat string-to-string map. Implementations
//! include SQLite (primary) and in-memory (for tests).

use async_trait::async_trait;

use crate::error::Result;

/// Async key-value storage with text values.
///
/// # Design Notes
///
/// - **Overwrite semantics**: `set_item` replaces any existing value.
/// - **Absent is not an error**: `get_item` returns `Ok(None)` for a missing key.
/// - **Batch writes**: `set_items` writes pairs in order. Backends that support
///   transactions override it to write all pairs atomically.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Get the value stored under `key`.
    async fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`.
    async fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key is a no-op.
    async fn remove_item(&self, key: &str) -> Result<()>;

    /// List all keys, sorted.
    async fn keys(&self) -> Result<Vec<String>>;

    /// Store several pairs.
    async fn set_items(&self, items: &[(&str, String)]) -> Result<()> {
        for (key, value) in items {
            self.set_item(key, value).await?;
        }
        Ok(())
    }

    /// Get several values, in the order of `keys`.
    async fn get_items(&self, keys: &[&str]) -> Result<Vec<Option<String>>> {
        let mut values = Vec::with_capacity(keys.len());
        for key in keys {
            values.push(self.get_item(key).await?);
        }
        Ok(values)
    }
}

#[async_trait]
impl<S: Storage + ?Sized> Storage for std::sync::Arc<S> {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key).await
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value).await
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        (**self).remove_item(key).await
    }

    async fn keys(&self) -> Result<Vec<String>> {
        (**self).keys().await
    }

    async fn set_items(&self, items: &[(&str, String)]) -> Result<()> {
        (**self).set_items(items).await
    }

    async fn get_items(&self, keys: &[&str]) -> Result<Vec<Option<String>>> {
        (**self).get_items(keys).await
    }
}
