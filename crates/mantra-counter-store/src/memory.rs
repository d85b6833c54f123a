//! In-memory implementation of the Storage trait.
//!
//! This is primarily for testing. It has the same semantics as SQLite
//! but keeps everything in memory with no persistence.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::{Result, StoreError};
use crate::traits::Storage;

/// In-memory storage.
///
/// All data is lost when the store is dropped. Thread-safe via RwLock.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RwLock<BTreeMap<String, String>>,
}

impl MemoryStorage {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled with the given pairs.
    pub fn with_items<K, V>(items: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            items: RwLock::new(
                items
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> StoreError {
    StoreError::Poisoned(e.to_string())
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        let items = self.items.read().map_err(poisoned)?;
        Ok(items.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self.items.write().map_err(poisoned)?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        let mut items = self.items.write().map_err(poisoned)?;
        items.remove(key);
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>> {
        let items = self.items.read().map_err(poisoned)?;
        Ok(items.keys().cloned().collect())
    }

    async fn set_items(&self, pairs: &[(&str, String)]) -> Result<()> {
        let mut items = self.items.write().map_err(poisoned)?;
        for (key, value) in pairs {
            items.insert(key.to_string(), value.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_storage_basic() {
        let store = MemoryStorage::new();
        assert_eq!(store.get_item("mantraCount").await.unwrap(), None);

        store.set_item("mantraCount", "3").await.unwrap();
        assert_eq!(
            store.get_item("mantraCount").await.unwrap().as_deref(),
            Some("3")
        );

        store.set_item("mantraCount", "4").await.unwrap();
        assert_eq!(
            store.get_item("mantraCount").await.unwrap().as_deref(),
            Some("4")
        );
    }

    #[tokio::test]
    async fn test_memory_storage_remove_and_keys() {
        let store = MemoryStorage::with_items([("b", "2"), ("a", "1")]);
        assert_eq!(store.keys().await.unwrap(), vec!["a", "b"]);

        store.remove_item("a").await.unwrap();
        store.remove_item("missing").await.unwrap();
        assert_eq!(store.keys().await.unwrap(), vec!["b"]);
    }

    #[tokio::test]
    async fn test_memory_storage_batch() {
        let store = MemoryStorage::new();
        store
            .set_items(&[("mantraCount", "1".into()), ("mantraTarget", "108".into())])
            .await
            .unwrap();

        let values = store
            .get_items(&["mantraCount", "mantraTarget", "other"])
            .await
            .unwrap();
        assert_eq!(
            values,
            vec![Some("1".to_string()), Some("108".to_string()), None]
        );
    }
}
