//! Role storage trait definitions
//!
//! `RoleStore` is deliberately read-only: the navigation core never writes
//! the role. Whoever changes the role (settings page, CLI) writes through the
//! concrete store type instead.

use async_trait::async_trait;

use crate::error::StoreError;

/// Result type for role store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Read-only string key-value store holding the viewer's role.
///
/// Guarantees:
/// - `get(key)` returns `Ok(None)` when nothing is stored under `key`.
/// - `get` never mutates the store.
#[async_trait]
pub trait RoleStore: Send + Sync {
    /// Read the value stored under `key`.
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;
}

/// A store for contexts without persistent storage.
///
/// Every read fails with [`StoreError::Unavailable`].
#[derive(Debug, Clone)]
pub struct UnavailableRoleStore {
    reason: String,
}

impl UnavailableRoleStore {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl Default for UnavailableRoleStore {
    fn default() -> Self {
        Self::new("no persistent context")
    }
}

#[async_trait]
impl RoleStore for UnavailableRoleStore {
    async fn get(&self, _key: &str) -> StoreResult<Option<String>> {
        Err(StoreError::unavailable(self.reason.clone()))
    }
}
