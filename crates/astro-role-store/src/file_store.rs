//! JSON-file role store
//!
//! The file holds a single JSON object mapping keys to string values, the
//! same shape browser local storage exposes. A missing file is an empty
//! store.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::error::StoreError;
use crate::storage_traits::{RoleStore, StoreResult};

/// Key-value store persisted as a JSON object on disk.
#[derive(Debug, Clone)]
pub struct FileRoleStore {
    path: PathBuf,
}

impl FileRoleStore {
    /// Open a store at `path`. The file does not need to exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `value` under `key`, keeping all other entries.
    ///
    /// This is not part of [`RoleStore`]: only role owners write.
    pub async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut entries = self.load().await?;
        entries.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let bytes = serde_json::to_vec_pretty(&entries).map_err(|e| StoreError::Malformed {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        tokio::fs::write(&self.path, bytes).await?;
        debug!(path = %self.path.display(), key = %key, "role store entry written");
        Ok(())
    }

    async fn load(&self) -> StoreResult<BTreeMap<String, String>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(StoreError::Io(e)),
        };

        if bytes.iter().all(|b| b.is_ascii_whitespace()) {
            return Ok(BTreeMap::new());
        }

        serde_json::from_slice(&bytes).map_err(|e| StoreError::Malformed {
            key: self.path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl RoleStore for FileRoleStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let mut entries = self.load().await?;
        Ok(entries.remove(key))
    }
}
