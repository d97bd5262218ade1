//! In-memory fakes for the role store (testing and demos)

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::storage_traits::{RoleStore, StoreResult};

/// In-memory role store backed by a `HashMap<key, value>`.
///
/// Counts reads so callers can assert how often the store was consulted.
#[derive(Debug, Default)]
pub struct MemoryRoleStore {
    entries: Mutex<HashMap<String, String>>,
    reads: AtomicUsize,
}

impl MemoryRoleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`MemoryRoleStore::insert`].
    pub fn with_entry(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Store `value` under `key`, replacing any previous value.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(key.into(), value.into());
    }

    /// Remove the value under `key`, if any.
    pub fn remove(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }

    /// Number of `get` calls served so far.
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RoleStore for MemoryRoleStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let entries = self.entries.lock().unwrap();
        Ok(entries.get(key).cloned())
    }
}
