//! Astro-Nav Core
//!
//! Role-driven navigation chrome for the Astrodome web application: resolve
//! the viewer's role, pick that role's routes, mark the entry matching the
//! current location, and render a side panel that can never take the host
//! page down with it.

pub mod active;
pub mod boundary;
pub mod config;
pub mod error;
pub mod html;
pub mod layout;
pub mod obs;
pub mod panel;
pub mod role;
pub mod routes;
pub mod shell;
pub mod telemetry;

pub use active::{active_index, is_active, MatchStrategy};
pub use boundary::{BoundaryOutcome, Diagnostic, ErrorBoundary, FallbackView};
pub use config::NavConfig;
pub use error::{NavError, Result};
pub use html::{render_page, render_panel};
pub use layout::{BrandLink, PageContent, SectionLayout};
pub use obs::ShellSpan;
pub use panel::{
    Collapsible, NavEntry, NavPanel, PanelContext, PanelFooter, PanelHeader, PanelRenderer,
    RenderError, StandardPanelRenderer,
};
pub use role::{ResolvedRole, Role, RoleResolver, RoleSource, FALLBACK_ROLE};
pub use routes::{Icon, RouteItem, RouteTable, DEFAULT_ROUTES_KEY};
pub use shell::{
    LoadedRenderer, LoadingPlaceholder, NavShell, PanelSlot, ShellSettings, ShellState, ShellView,
};
pub use telemetry::init_tracing;

pub use astro_role_store::{
    FileRoleStore, MemoryRoleStore, RoleStore, StoreError, UnavailableRoleStore,
};

/// Astro-Nav version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
