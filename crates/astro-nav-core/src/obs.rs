//! Structured observability hooks for the navigation shell.
//!
//! This module provides:
//! - A mount-scoped tracing span via the `ShellSpan` RAII guard
//! - Emission functions for shell lifecycle events: role resolution,
//!   loading placeholder, rendered routes, fallback substitution
//!
//! Every event carries a fixed `event` field so log pipelines can filter on it.

use tracing::{debug, info};

use crate::role::RoleSource;

/// RAII guard that enters a shell-scoped span for the duration of a render.
///
/// ```ignore
/// let _span = ShellSpan::enter("5b0c...", "/mentor/feedback");
/// // every event below carries mount_id and location
/// ```
pub struct ShellSpan {
    _span: tracing::span::EnteredSpan,
}

impl ShellSpan {
    pub fn enter(mount_id: &str, location: &str) -> Self {
        let span = tracing::info_span!("nav.shell", mount_id = %mount_id, location = %location);
        Self {
            _span: span.entered(),
        }
    }
}

/// Emit event: the viewer's role was resolved.
pub fn emit_role_resolved(role: &str, source: RoleSource) {
    info!(event = "nav.role_resolved", role = %role, source = %source);
}

/// Emit event: the loading placeholder was rendered instead of the panel.
pub fn emit_loading_shown() {
    debug!(event = "nav.loading_shown");
}

/// Emit event: the panel rendered `count` entries; `active` is the active label.
pub fn emit_routes_rendered(role: &str, count: usize, active: Option<&str>) {
    debug!(
        event = "nav.routes_rendered",
        role = %role,
        count = count,
        active = active.unwrap_or("-"),
    );
}

/// Emit event: a tripped boundary served the fallback view again.
///
/// The fault itself is logged once by the boundary when it trips.
pub fn emit_fallback_served(component: &str) {
    debug!(event = "nav.fallback_served", component = %component);
}
