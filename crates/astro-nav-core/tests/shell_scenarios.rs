//! End-to-end shell scenarios: stored role -> routes -> active entry, and
//! fault containment around the panel.

use std::sync::Arc;

use astro_nav_core::{
    render_page, FileRoleStore, MatchStrategy, MemoryRoleStore, NavPanel, NavShell, PageContent,
    PanelContext, PanelRenderer, PanelSlot, RenderError, Role, RoleResolver, RoleSource,
    RouteTable, SectionLayout, ShellSettings, ShellState, ShellView, UnavailableRoleStore,
    DEFAULT_ROUTES_KEY, FALLBACK_ROLE,
};
use astro_role_store::DEFAULT_ROLE_KEY;
use tracing_test::traced_test;

fn table() -> Arc<RouteTable> {
    Arc::new(RouteTable::builtin().clone())
}

fn store_with(role: &str) -> Arc<MemoryRoleStore> {
    Arc::new(MemoryRoleStore::new().with_entry(DEFAULT_ROLE_KEY, role))
}

async fn mounted(resolver: RoleResolver) -> NavShell {
    let mut shell = NavShell::standard(resolver, table(), ShellSettings::default());
    shell.mount().await;
    shell
}

fn panel_of(view: &ShellView) -> &NavPanel {
    view.panel().expect("panel should have rendered")
}

#[tokio::test]
async fn mentor_on_feedback_page() {
    let shell = mounted(RoleResolver::new(store_with("mentor"))).await;
    let view = shell.render("/mentor/feedback", PageContent::default());
    let panel = panel_of(&view);

    assert_eq!(
        panel.labels(),
        vec!["Dashboard", "Feedback", "Filter", "Submissions"]
    );
    assert_eq!(panel.active_entry().unwrap().label, "Feedback");
    assert_eq!(panel.entries.iter().filter(|e| e.active).count(), 1);
}

#[tokio::test]
async fn empty_store_with_default_fallback_uses_default_table() {
    let resolver = RoleResolver::new(Arc::new(MemoryRoleStore::new()))
        .with_fallback(Role::new(DEFAULT_ROUTES_KEY));
    let shell = mounted(resolver).await;
    let view = shell.render("/dashboard", PageContent::default());
    let panel = panel_of(&view);

    assert_eq!(panel.labels(), vec!["Dashboard", "Profile", "Settings"]);
    assert_eq!(panel.active_entry().unwrap().href, "/dashboard");
}

#[tokio::test]
async fn empty_store_defaults_to_contributor_persona() {
    let shell = mounted(RoleResolver::new(Arc::new(MemoryRoleStore::new()))).await;
    let view = shell.render("/contributor/earnings", PageContent::default());
    let panel = panel_of(&view);

    assert_eq!(panel.entries.len(), 7);
    assert_eq!(panel.active_entry().unwrap().label, "Earnings");
}

#[tokio::test]
async fn unavailable_store_degrades_to_fallback() {
    let shell = mounted(RoleResolver::new(Arc::new(UnavailableRoleStore::default()))).await;
    let view = shell.render("/contributor", PageContent::default());
    assert_eq!(panel_of(&view).active_entry().unwrap().label, "Dashboard");
}

#[tokio::test]
async fn padded_role_is_not_a_table_key() {
    let shell = mounted(RoleResolver::new(store_with(" mentor "))).await;
    let view = shell.render("/dashboard", PageContent::default());
    let panel = panel_of(&view);

    assert_eq!(panel.labels(), vec!["Dashboard", "Profile", "Settings"]);
    assert_eq!(
        shell.state(),
        &ShellState::Ready {
            role: Role::new(" mentor "),
            source: RoleSource::Stored,
        }
    );
}

#[tokio::test]
async fn whitespace_role_reads_default_table() {
    let shell = mounted(RoleResolver::new(store_with("   "))).await;
    let view = shell.render("/dashboard", PageContent::default());
    let panel = panel_of(&view);

    assert_eq!(panel.labels(), vec!["Dashboard", "Profile", "Settings"]);
    assert_eq!(panel.active_entry().unwrap().label, "Dashboard");
}

#[tokio::test]
async fn malformed_role_file_degrades_to_fallback() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("role.json");
    std::fs::write(&path, r#"{"astro-role": 42}"#).unwrap();

    let store = Arc::new(FileRoleStore::open(&path));
    let shell = mounted(RoleResolver::new(store)).await;
    assert_eq!(
        shell.state(),
        &ShellState::Ready {
            role: Role::new(FALLBACK_ROLE),
            source: RoleSource::StoreError,
        }
    );

    let view = shell.render("/contributor/earnings", PageContent::default());
    let panel = panel_of(&view);
    assert_eq!(panel.entries.len(), 7);
    assert_eq!(panel.active_entry().unwrap().label, "Earnings");
}

#[tokio::test]
async fn admin_nested_contributor_page() {
    let shell = mounted(RoleResolver::new(store_with("admin"))).await;
    let view = shell.render("/admin/contributors/123", PageContent::default());
    let panel = panel_of(&view);

    assert_eq!(panel.active_entry().unwrap().label, "Contributors");
    assert_eq!(panel.entries.iter().filter(|e| e.active).count(), 1);
}

#[tokio::test]
async fn first_match_strategy_keeps_table_order() {
    let settings = ShellSettings {
        strategy: MatchStrategy::FirstMatch,
        ..ShellSettings::default()
    };
    let mut shell = NavShell::standard(RoleResolver::new(store_with("admin")), table(), settings);
    shell.mount().await;

    let view = shell.render("/admin/contributors/123", PageContent::default());
    assert_eq!(panel_of(&view).active_entry().unwrap().label, "Dashboard");
}

#[tokio::test]
async fn unknown_role_and_unmatched_location() {
    let shell = mounted(RoleResolver::new(store_with("astronaut"))).await;
    let view = shell.render("/somewhere/else", PageContent::new("<p>still here</p>"));
    let panel = panel_of(&view);

    assert_eq!(panel.labels(), vec!["Dashboard", "Profile", "Settings"]);
    assert!(panel.active_entry().is_none());
    assert_eq!(view.content().as_str(), "<p>still here</p>");
}

#[tokio::test]
async fn section_layout_renders_header_inside_inset() {
    let shell = mounted(RoleResolver::new(store_with("contributor"))).await;
    let view = SectionLayout::contributor().render(
        &shell,
        "/contributor/portfolio",
        &PageContent::new("<section>portfolio</section>"),
    );
    let html = render_page(&view);

    assert!(html.contains("<main class=\"sidebar-inset\"><header class=\"section-header\">"));
    assert!(html.contains("<section>portfolio</section></main>"));
    assert!(html.contains(
        "<a href=\"/contributor/portfolio\" data-active=\"true\" aria-current=\"page\">"
    ));
}

// ---------------------------------------------------------------------------
// Fault containment
// ---------------------------------------------------------------------------

struct PanickingRenderer;

impl PanelRenderer for PanickingRenderer {
    fn render_panel(&self, _ctx: &PanelContext<'_>) -> Result<NavPanel, RenderError> {
        panic!("sidebar menu blew up")
    }
}

struct FailingRenderer;

impl PanelRenderer for FailingRenderer {
    fn render_panel(&self, ctx: &PanelContext<'_>) -> Result<NavPanel, RenderError> {
        Err(RenderError::Render {
            component: "SidebarMenu".to_string(),
            reason: format!("cannot render {} entries", ctx.routes.len()),
        })
    }
}

async fn faulty_shell(renderer: Box<dyn PanelRenderer>) -> NavShell {
    let mut shell = NavShell::new(
        RoleResolver::new(store_with("mentor")),
        table(),
        Ok(renderer),
        ShellSettings::default(),
    );
    shell.mount().await;
    shell
}

#[traced_test]
#[tokio::test]
async fn panicking_panel_is_replaced_by_fallback() {
    let shell = faulty_shell(Box::new(PanickingRenderer)).await;
    let view = shell.render("/mentor", PageContent::new("<p>page body</p>"));

    match &view {
        ShellView::Ready {
            panel: PanelSlot::Fallback(fallback),
            content,
            ..
        } => {
            assert_eq!(fallback.message, "Error: Sidebar failed to render");
            assert_eq!(content.as_str(), "<p>page body</p>");
        }
        other => panic!("expected fallback view, got {other:?}"),
    }

    let diagnostic = shell.boundary().diagnostic().unwrap();
    assert_eq!(diagnostic.component, "MainSidebar");
    assert!(diagnostic.error.contains("sidebar menu blew up"));
    assert_eq!(diagnostic.trace[0], "MainSidebar > panel");
    assert!(diagnostic
        .trace
        .iter()
        .any(|frame| frame.starts_with("panicked at ") && frame.contains("shell_scenarios.rs")));

    assert!(logs_contain("render fault contained by error boundary"));
}

#[traced_test]
#[tokio::test]
async fn fault_is_logged_once_and_not_retried() {
    let shell = faulty_shell(Box::new(FailingRenderer)).await;

    for _ in 0..3 {
        let view = shell.render("/mentor/filter", PageContent::new("<p>body</p>"));
        assert!(view.panel().is_none());
        assert_eq!(view.content().as_str(), "<p>body</p>");
    }

    logs_assert(|lines: &[&str]| {
        let faults = lines
            .iter()
            .filter(|line| line.contains("render fault contained by error boundary"))
            .count();
        match faults {
            1 => Ok(()),
            n => Err(format!("expected one fault record, found {n}")),
        }
    });
}

#[tokio::test]
async fn fresh_mount_recovers_from_fault() {
    let broken = faulty_shell(Box::new(FailingRenderer)).await;
    assert!(broken
        .render("/mentor", PageContent::default())
        .panel()
        .is_none());

    let healthy = mounted(RoleResolver::new(store_with("mentor"))).await;
    assert!(!healthy.boundary().is_tripped());
    assert!(healthy
        .render("/mentor", PageContent::default())
        .panel()
        .is_some());
}

#[tokio::test]
async fn independent_mounts_do_not_share_state() {
    let mentor = mounted(RoleResolver::new(store_with("mentor"))).await;
    let sponsor = mounted(RoleResolver::new(store_with("sponsor"))).await;

    assert_ne!(mentor.mount_id(), sponsor.mount_id());
    let a = mentor.render("/mentor", PageContent::default());
    let b = sponsor.render("/sponsor", PageContent::default());
    assert_eq!(panel_of(&a).entries.len(), 4);
    assert_eq!(panel_of(&b).labels()[1], "Analytics");
}
