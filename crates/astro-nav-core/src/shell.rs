//! The navigation shell: role resolution, panel rendering and fault
//! containment for one mount.
//!
//! State machine: `Initializing -> Ready`. While initializing the shell
//! renders a loading placeholder in place of the panel; once the role is
//! read it renders the panel through its [`ErrorBoundary`]. There is no way
//! back to `Initializing` short of building a new shell.

use std::sync::Arc;

use serde::Serialize;
use tracing::instrument;
use uuid::Uuid;

use crate::active::MatchStrategy;
use crate::boundary::{BoundaryOutcome, ErrorBoundary, FallbackView, DEFAULT_FALLBACK_MESSAGE};
use crate::layout::PageContent;
use crate::obs::{emit_fallback_served, emit_loading_shown, emit_routes_rendered, ShellSpan};
use crate::panel::{
    Collapsible, NavPanel, PanelContext, PanelRenderer, RenderError, StandardPanelRenderer,
};
use crate::role::{Role, RoleResolver, RoleSource};
use crate::routes::RouteTable;

/// Component name reported in diagnostics.
pub const SHELL_COMPONENT: &str = "MainSidebar";

/// A panel renderer, or the reason it could not be constructed.
pub type LoadedRenderer = Result<Box<dyn PanelRenderer>, RenderError>;

/// Presentation settings for a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellSettings {
    pub title: String,
    pub company: String,
    pub strategy: MatchStrategy,
    pub collapsible: Collapsible,
    pub fallback_message: String,
}

impl Default for ShellSettings {
    fn default() -> Self {
        Self {
            title: "My App".to_string(),
            company: "My Company".to_string(),
            strategy: MatchStrategy::default(),
            collapsible: Collapsible::default(),
            fallback_message: DEFAULT_FALLBACK_MESSAGE.to_string(),
        }
    }
}

/// Lifecycle of one shell mount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellState {
    Initializing,
    Ready { role: Role, source: RoleSource },
}

/// Placeholder rendered while the role is being read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadingPlaceholder {
    pub message: String,
}

impl Default for LoadingPlaceholder {
    fn default() -> Self {
        Self {
            message: "Loading sidebar...".to_string(),
        }
    }
}

/// What occupies the panel region once the shell is ready.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PanelSlot {
    Panel(NavPanel),
    Fallback(FallbackView),
}

impl PanelSlot {
    pub fn panel(&self) -> Option<&NavPanel> {
        match self {
            PanelSlot::Panel(panel) => Some(panel),
            PanelSlot::Fallback(_) => None,
        }
    }
}

/// One render of the shell plus the host page's content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ShellView {
    Loading {
        placeholder: LoadingPlaceholder,
        content: PageContent,
    },
    Ready {
        role: Role,
        panel: PanelSlot,
        content: PageContent,
    },
}

impl ShellView {
    /// The host page's content; present in every state.
    pub fn content(&self) -> &PageContent {
        match self {
            ShellView::Loading { content, .. } | ShellView::Ready { content, .. } => content,
        }
    }

    pub fn panel(&self) -> Option<&NavPanel> {
        match self {
            ShellView::Ready { panel, .. } => panel.panel(),
            ShellView::Loading { .. } => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ShellView::Loading { .. })
    }
}

/// A mounted navigation shell.
pub struct NavShell {
    mount_id: Uuid,
    resolver: RoleResolver,
    table: Arc<RouteTable>,
    renderer: LoadedRenderer,
    settings: ShellSettings,
    state: ShellState,
    boundary: ErrorBoundary,
}

impl std::fmt::Debug for NavShell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavShell")
            .field("mount_id", &self.mount_id)
            .field("state", &self.state)
            .field("boundary", &self.boundary)
            .finish_non_exhaustive()
    }
}

impl NavShell {
    /// Create an unmounted shell. `renderer` is the result of loading the
    /// panel renderer; a load failure surfaces as the fallback view.
    pub fn new(
        resolver: RoleResolver,
        table: Arc<RouteTable>,
        renderer: LoadedRenderer,
        settings: ShellSettings,
    ) -> Self {
        Self {
            mount_id: Uuid::new_v4(),
            resolver,
            table,
            renderer,
            settings,
            state: ShellState::Initializing,
            boundary: ErrorBoundary::new(SHELL_COMPONENT),
        }
    }

    /// Shell using [`StandardPanelRenderer`].
    pub fn standard(
        resolver: RoleResolver,
        table: Arc<RouteTable>,
        settings: ShellSettings,
    ) -> Self {
        Self::new(
            resolver,
            table,
            Ok(Box::new(StandardPanelRenderer::new())),
            settings,
        )
    }

    pub fn mount_id(&self) -> Uuid {
        self.mount_id
    }

    pub fn state(&self) -> &ShellState {
        &self.state
    }

    pub fn boundary(&self) -> &ErrorBoundary {
        &self.boundary
    }

    /// Resolve the role once. Later calls are no-ops.
    #[instrument(skip(self), fields(mount_id = %self.mount_id))]
    pub async fn mount(&mut self) -> &ShellState {
        if matches!(self.state, ShellState::Initializing) {
            self.read_role().await;
        }
        &self.state
    }

    /// Explicit refresh event: re-read the role and stay `Ready`.
    #[instrument(skip(self), fields(mount_id = %self.mount_id))]
    pub async fn refresh(&mut self) -> &ShellState {
        self.read_role().await;
        &self.state
    }

    async fn read_role(&mut self) {
        let resolved = self.resolver.resolve().await;
        self.state = ShellState::Ready {
            role: resolved.role,
            source: resolved.source,
        };
    }

    /// Render the shell for `location` around the host's `content`.
    pub fn render(&self, location: &str, content: PageContent) -> ShellView {
        let _span = ShellSpan::enter(&self.mount_id.to_string(), location);

        let role = match &self.state {
            ShellState::Initializing => {
                emit_loading_shown();
                return ShellView::Loading {
                    placeholder: LoadingPlaceholder::default(),
                    content,
                };
            }
            ShellState::Ready { role, .. } => role,
        };

        let was_tripped = self.boundary.is_tripped();
        let routes = self.table.routes_for(role);
        let outcome = self.boundary.guard("panel", || {
            let renderer = self.renderer.as_ref().map_err(RenderError::clone)?;
            renderer.render_panel(&PanelContext {
                routes,
                location,
                strategy: self.settings.strategy,
                title: &self.settings.title,
                company: &self.settings.company,
                collapsible: self.settings.collapsible,
            })
        });

        let panel = match outcome {
            BoundaryOutcome::Rendered(panel) => {
                emit_routes_rendered(
                    role.as_str(),
                    panel.entries.len(),
                    panel.active_entry().map(|e| e.label.as_str()),
                );
                PanelSlot::Panel(panel)
            }
            BoundaryOutcome::Failed(_) => {
                if was_tripped {
                    emit_fallback_served(self.boundary.component());
                }
                PanelSlot::Fallback(FallbackView {
                    message: self.settings.fallback_message.clone(),
                })
            }
        };

        ShellView::Ready {
            role: role.clone(),
            panel,
            content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use astro_role_store::{MemoryRoleStore, DEFAULT_ROLE_KEY};

    fn shell_with_role(role: &str) -> (NavShell, Arc<MemoryRoleStore>) {
        let store = Arc::new(MemoryRoleStore::new().with_entry(DEFAULT_ROLE_KEY, role));
        let resolver = RoleResolver::new(store.clone());
        let shell = NavShell::standard(
            resolver,
            Arc::new(RouteTable::builtin().clone()),
            ShellSettings::default(),
        );
        (shell, store)
    }

    #[tokio::test]
    async fn test_initializing_renders_loading_with_content() {
        let (shell, _) = shell_with_role("mentor");
        let view = shell.render("/mentor", PageContent::new("<p>hi</p>"));
        assert!(view.is_loading());
        assert_eq!(view.content().as_str(), "<p>hi</p>");
        assert!(view.panel().is_none());
    }

    #[tokio::test]
    async fn test_mount_reads_store_once() {
        let (mut shell, store) = shell_with_role("sponsor");
        shell.mount().await;
        shell.mount().await;
        let _ = shell.render("/sponsor", PageContent::default());
        let _ = shell.render("/sponsor/payments", PageContent::default());
        assert_eq!(store.read_count(), 1);
        assert_eq!(
            shell.state(),
            &ShellState::Ready {
                role: Role::new("sponsor"),
                source: RoleSource::Stored
            }
        );
    }

    #[tokio::test]
    async fn test_refresh_rereads_role() {
        let (mut shell, store) = shell_with_role("sponsor");
        shell.mount().await;
        store.insert(DEFAULT_ROLE_KEY, "learner");

        // Not observed until an explicit refresh.
        let view = shell.render("/learner", PageContent::default());
        assert_eq!(view.panel().unwrap().entries[1].label, "Analytics");

        shell.refresh().await;
        let view = shell.render("/learner", PageContent::default());
        assert_eq!(view.panel().unwrap().entries[1].label, "Certifications");
        assert_eq!(store.read_count(), 2);
    }

    #[tokio::test]
    async fn test_load_failure_renders_fallback() {
        let store = Arc::new(MemoryRoleStore::new());
        let mut shell = NavShell::new(
            RoleResolver::new(store),
            Arc::new(RouteTable::builtin().clone()),
            Err(RenderError::Load {
                reason: "chunk failed".to_string(),
            }),
            ShellSettings::default(),
        );
        shell.mount().await;

        let view = shell.render("/contributor", PageContent::new("page"));
        match &view {
            ShellView::Ready { panel: PanelSlot::Fallback(f), content, .. } => {
                assert_eq!(f.message, DEFAULT_FALLBACK_MESSAGE);
                assert_eq!(content.as_str(), "page");
            }
            other => panic!("expected fallback, got {other:?}"),
        }
        assert!(shell.boundary().is_tripped());
    }
}
