//! Navigation configuration.
//!
//! All fields have defaults, so an empty TOML document is a valid config.
//!
//! ```toml
//! role_key = "astro-role"
//! fallback_role = "contributor"
//! match_strategy = "most-specific"
//! role_read_timeout_ms = 500
//!
//! [[routes.default]]
//! label = "Dashboard"
//! href = "/dashboard"
//! icon = "home"
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use astro_role_store::{RoleStore, DEFAULT_ROLE_KEY};
use serde::{Deserialize, Serialize};

use crate::active::MatchStrategy;
use crate::boundary::DEFAULT_FALLBACK_MESSAGE;
use crate::error::{NavError, Result};
use crate::panel::Collapsible;
use crate::role::{Role, RoleResolver, FALLBACK_ROLE};
use crate::routes::{RouteItem, RouteTable};
use crate::shell::ShellSettings;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavConfig {
    /// Store key the role is read from.
    pub role_key: String,
    /// Role used when nothing usable is stored.
    pub fallback_role: String,
    pub app_title: String,
    /// Shown in the panel footer.
    pub company: String,
    pub match_strategy: MatchStrategy,
    /// Bound on the initial role read. Unset means wait indefinitely.
    pub role_read_timeout_ms: Option<u64>,
    pub collapsible: Collapsible,
    pub fallback_message: String,
    /// Replaces the built-in route table when present.
    pub routes: Option<BTreeMap<String, Vec<RouteItem>>>,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            role_key: DEFAULT_ROLE_KEY.to_string(),
            fallback_role: FALLBACK_ROLE.to_string(),
            app_title: "My App".to_string(),
            company: "My Company".to_string(),
            match_strategy: MatchStrategy::default(),
            role_read_timeout_ms: None,
            collapsible: Collapsible::default(),
            fallback_message: DEFAULT_FALLBACK_MESSAGE.to_string(),
            routes: None,
        }
    }
}

impl NavConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: NavConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.role_key.trim().is_empty() {
            return Err(NavError::Config("role_key must not be empty".to_string()));
        }
        if self.fallback_role.trim().is_empty() {
            return Err(NavError::Config(
                "fallback_role must not be empty".to_string(),
            ));
        }
        if self.role_read_timeout_ms == Some(0) {
            return Err(NavError::Config(
                "role_read_timeout_ms must be positive".to_string(),
            ));
        }
        if let Some(routes) = &self.routes {
            RouteTable::new(routes.clone())?;
        }
        Ok(())
    }

    /// The configured route table, or the built-in one.
    pub fn route_table(&self) -> Result<Arc<RouteTable>> {
        match &self.routes {
            Some(routes) => Ok(Arc::new(RouteTable::new(routes.clone())?)),
            None => Ok(Arc::new(RouteTable::builtin().clone())),
        }
    }

    /// A resolver over `store` honouring key, fallback and timeout.
    pub fn resolver(&self, store: Arc<dyn RoleStore>) -> RoleResolver {
        let resolver = RoleResolver::new(store)
            .with_key(self.role_key.clone())
            .with_fallback(Role::new(self.fallback_role.clone()));
        match self.role_read_timeout_ms {
            Some(ms) => resolver.with_timeout(Duration::from_millis(ms)),
            None => resolver,
        }
    }

    pub fn shell_settings(&self) -> ShellSettings {
        ShellSettings {
            title: self.app_title.clone(),
            company: self.company.clone(),
            strategy: self.match_strategy,
            collapsible: self.collapsible,
            fallback_message: self.fallback_message.clone(),
        }
    }
}
