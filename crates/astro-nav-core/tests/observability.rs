//! Structured tracing events for the shell lifecycle.

use std::sync::Arc;

use astro_nav_core::obs::{
    emit_fallback_served, emit_loading_shown, emit_role_resolved, emit_routes_rendered,
};
use astro_nav_core::{
    MemoryRoleStore, NavShell, PageContent, RoleResolver, RoleSource, RouteTable, ShellSettings,
    ShellSpan,
};
use tracing_test::traced_test;

#[traced_test]
#[test]
fn role_resolved_event_carries_role_and_source() {
    emit_role_resolved("mentor", RoleSource::Stored);
    assert!(logs_contain("nav.role_resolved"));
    assert!(logs_contain("role=mentor"));
    assert!(logs_contain("source=stored"));
}

#[traced_test]
#[test]
fn routes_rendered_event_carries_active_label() {
    emit_routes_rendered("admin", 6, Some("Contributors"));
    assert!(logs_contain("nav.routes_rendered"));
    assert!(logs_contain("count=6"));
}

#[traced_test]
#[test]
fn loading_and_fallback_events_emit() {
    emit_loading_shown();
    emit_fallback_served("MainSidebar");
    assert!(logs_contain("nav.loading_shown"));
    assert!(logs_contain("nav.fallback_served"));
}

#[traced_test]
#[test]
fn shell_span_enter_creates_span() {
    let span = ShellSpan::enter("mount-1", "/dashboard");
    drop(span);
}

#[traced_test]
#[tokio::test]
async fn mount_logs_resolution() {
    let store = Arc::new(MemoryRoleStore::new());
    let mut shell = NavShell::standard(
        RoleResolver::new(store),
        Arc::new(RouteTable::builtin().clone()),
        ShellSettings::default(),
    );

    let _ = shell.render("/contributor", PageContent::default());
    shell.mount().await;
    let _ = shell.render("/contributor", PageContent::default());

    assert!(logs_contain("nav.loading_shown"));
    assert!(logs_contain("source=fallback"));
    assert!(logs_contain("nav.routes_rendered"));
}
