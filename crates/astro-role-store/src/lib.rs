//! Astro-Role-Store: the role storage boundary for Astrodome navigation
//!
//! The navigation core reads a single string value (the viewer's role) from
//! an external key-value store. This crate defines that read capability and
//! the stores the application ships with.
//!
//! ## Key Components
//!
//! - `RoleStore`: async, read-only key-value capability
//! - `FileRoleStore`: JSON-object file standing in for browser local storage
//! - `UnavailableRoleStore`: a context with no persistent storage at all
//! - `fakes::MemoryRoleStore`: in-memory store for tests and demos

mod error;
pub mod fakes;
mod file_store;
pub mod storage_traits;

pub use error::StoreError;
pub use fakes::MemoryRoleStore;
pub use file_store::FileRoleStore;
pub use storage_traits::{RoleStore, StoreResult, UnavailableRoleStore};

/// Storage key the application writes the selected role under.
pub const DEFAULT_ROLE_KEY: &str = "astro-role";
