//! Role resolution.
//!
//! [`RoleResolver`] reads the stored role preference through an injected
//! [`RoleStore`]. Every failure (absent value, unavailable store, malformed
//! data, timeout) degrades to the configured fallback role; nothing here
//! returns an error.

use std::sync::Arc;
use std::time::Duration;

use astro_role_store::{RoleStore, DEFAULT_ROLE_KEY};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::obs::emit_role_resolved;

/// Persona used when no role is stored.
pub const FALLBACK_ROLE: &str = "contributor";

/// A viewer persona token. Not validated against a fixed set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(String);

impl Role {
    pub fn new(role: impl Into<String>) -> Self {
        Role(role.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Role {
    fn from(s: &str) -> Self {
        Role::new(s)
    }
}

/// Where a resolved role came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleSource {
    /// A non-empty value was read from the store.
    Stored,
    /// The store had no value, or an empty string.
    Fallback,
    /// The store failed; treated as no value.
    StoreError,
    /// The read did not finish within the configured timeout.
    Timeout,
}

impl std::fmt::Display for RoleSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RoleSource::Stored => "stored",
            RoleSource::Fallback => "fallback",
            RoleSource::StoreError => "store_error",
            RoleSource::Timeout => "timeout",
        };
        f.write_str(s)
    }
}

/// Outcome of one role read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRole {
    pub role: Role,
    pub source: RoleSource,
}

/// Reads the viewer's role from a [`RoleStore`].
#[derive(Clone)]
pub struct RoleResolver {
    store: Arc<dyn RoleStore>,
    key: String,
    fallback: Role,
    timeout: Option<Duration>,
}

impl std::fmt::Debug for RoleResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoleResolver")
            .field("key", &self.key)
            .field("fallback", &self.fallback)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl RoleResolver {
    /// Resolver over `store` using the default key and fallback role, no timeout.
    pub fn new(store: Arc<dyn RoleStore>) -> Self {
        Self {
            store,
            key: DEFAULT_ROLE_KEY.to_string(),
            fallback: Role::new(FALLBACK_ROLE),
            timeout: None,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_fallback(mut self, fallback: Role) -> Self {
        self.fallback = fallback;
        self
    }

    /// Bound the store read; an expired read resolves to the fallback role.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Read the role, degrading to the fallback on any failure.
    pub async fn resolve_role(&self) -> Role {
        self.resolve().await.role
    }

    /// Like [`RoleResolver::resolve_role`], also reporting where the role came from.
    pub async fn resolve(&self) -> ResolvedRole {
        let read = self.store.get(&self.key);
        let outcome = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, read).await {
                Ok(result) => Some(result),
                Err(_) => None,
            },
            None => Some(read.await),
        };

        let resolved = match outcome {
            // Stored values are used verbatim; unrecognized ones read the default table.
            Some(Ok(Some(value))) if !value.is_empty() => ResolvedRole {
                role: Role::new(value),
                source: RoleSource::Stored,
            },
            Some(Ok(_)) => self.fallback_with(RoleSource::Fallback),
            Some(Err(e)) => {
                warn!(key = %self.key, error = %e, "role store read failed; using fallback role");
                self.fallback_with(RoleSource::StoreError)
            }
            None => {
                warn!(key = %self.key, "role store read timed out; using fallback role");
                self.fallback_with(RoleSource::Timeout)
            }
        };

        emit_role_resolved(resolved.role.as_str(), resolved.source);
        resolved
    }

    fn fallback_with(&self, source: RoleSource) -> ResolvedRole {
        ResolvedRole {
            role: self.fallback.clone(),
            source,
        }
    }
}
