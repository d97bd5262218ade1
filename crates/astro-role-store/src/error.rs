//! Error types for astro-role-store

use thiserror::Error;

/// Errors that can occur while reading the role store
#[derive(Error, Debug)]
pub enum StoreError {
    /// No persistent context exists (e.g. server-side render)
    #[error("Role store unavailable: {reason}")]
    Unavailable { reason: String },

    /// Backing file could not be read or written
    #[error("Role store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data exists but cannot be interpreted
    #[error("Malformed role store value for {key}: {reason}")]
    Malformed { key: String, reason: String },
}

impl StoreError {
    /// Shorthand for an `Unavailable` error.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        StoreError::Unavailable {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let err = StoreError::unavailable("no window");
        assert!(err.to_string().contains("unavailable"));
        assert!(err.to_string().contains("no window"));

        let err = StoreError::Malformed {
            key: "astro-role".to_string(),
            reason: "expected string".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("astro-role"));
        assert!(msg.contains("expected string"));
    }
}
