//! In-memory key-value backend

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::StorageError;
use crate::{KeyValueStore, Result};

/// Process-local storage, optionally bounded by a byte quota.
///
/// The quota counts key and value bytes of every entry, the same way browsers
/// account for local storage usage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Arc<RwLock<HashMap<String, String>>>,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota: usize) -> Self {
        Self {
            items: Arc::new(RwLock::new(HashMap::new())),
            quota: Some(quota),
        }
    }

    /// Total bytes currently held
    pub fn used_bytes(&self) -> usize {
        self.items
            .read()
            .iter()
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }
}

impl Clone for MemoryStore {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
            quota: self.quota,
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.read().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self.items.write();

        if let Some(quota) = self.quota {
            let others: usize = items
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let requested = others + key.len() + value.len();
            if requested > quota {
                tracing::warn!(key = %key, requested, quota, "Local storage quota exceeded");
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    requested,
                    quota,
                });
            }
        }

        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.items.write().remove(key);
        Ok(())
    }
}
