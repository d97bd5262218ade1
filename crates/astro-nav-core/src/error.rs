//! Error taxonomy for the navigation core.
//!
//! Only construction-time failures (bad route tables, unreadable config)
//! are errors. Role lookups and rendering never return these; they degrade
//! to fallbacks instead.

/// Navigation configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum NavError {
    #[error("invalid route table: {0}")]
    InvalidTable(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for navigation core operations.
pub type Result<T> = std::result::Result<T, NavError>;
