//! Navigation panel view model and the `PanelRenderer` capability.
//!
//! A renderer turns a [`PanelContext`] (resolved routes plus the current
//! location) into a [`NavPanel`]. Failures are values: construction and
//! rendering both report [`RenderError`], which the shell hands to its
//! [`ErrorBoundary`](crate::boundary::ErrorBoundary).

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::active::{active_index, MatchStrategy};
use crate::routes::{Icon, RouteItem};

/// Errors raised while loading or running a panel renderer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("panel renderer failed to load: {reason}")]
    Load { reason: String },

    #[error("{component} failed to render: {reason}")]
    Render { component: String, reason: String },

    #[error("{component} panicked: {message}")]
    Panicked { component: String, message: String },
}

/// Presentational collapse mode; passed through to the host toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Collapsible {
    /// Collapses to an icon rail.
    #[default]
    Icon,
    /// Slides fully off screen.
    Offcanvas,
    /// Always expanded.
    None,
}

impl Collapsible {
    pub fn as_str(self) -> &'static str {
        match self {
            Collapsible::Icon => "icon",
            Collapsible::Offcanvas => "offcanvas",
            Collapsible::None => "none",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelHeader {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelFooter {
    pub text: String,
}

/// One rendered link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavEntry {
    pub label: String,
    pub href: String,
    pub icon: Icon,
    pub active: bool,
}

/// The rendered side panel: header, scrollable entry list, footer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavPanel {
    pub header: PanelHeader,
    pub entries: Vec<NavEntry>,
    pub footer: PanelFooter,
    pub collapsible: Collapsible,
}

impl NavPanel {
    /// The active entry, if the location matched one.
    pub fn active_entry(&self) -> Option<&NavEntry> {
        self.entries.iter().find(|e| e.active)
    }

    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.label.as_str()).collect()
    }
}

/// Everything a renderer needs for one render pass.
#[derive(Debug, Clone, Copy)]
pub struct PanelContext<'a> {
    pub routes: &'a [RouteItem],
    pub location: &'a str,
    pub strategy: MatchStrategy,
    pub title: &'a str,
    pub company: &'a str,
    pub collapsible: Collapsible,
}

/// Renders a navigation panel from resolved routes.
pub trait PanelRenderer: Send + Sync {
    fn render_panel(&self, ctx: &PanelContext<'_>) -> Result<NavPanel, RenderError>;
}

/// The application's panel renderer.
#[derive(Debug, Clone, Default)]
pub struct StandardPanelRenderer {
    year: Option<i32>,
}

impl StandardPanelRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the footer year instead of reading the clock.
    pub fn with_year(year: i32) -> Self {
        Self { year: Some(year) }
    }
}

impl PanelRenderer for StandardPanelRenderer {
    fn render_panel(&self, ctx: &PanelContext<'_>) -> Result<NavPanel, RenderError> {
        let active = active_index(ctx.routes, ctx.location, ctx.strategy);
        let entries = ctx
            .routes
            .iter()
            .enumerate()
            .map(|(i, item)| NavEntry {
                label: item.label.clone(),
                href: item.href.clone(),
                icon: item.icon,
                active: active == Some(i),
            })
            .collect();

        let year = self.year.unwrap_or_else(|| chrono::Utc::now().year());
        Ok(NavPanel {
            header: PanelHeader {
                title: ctx.title.to_string(),
            },
            entries,
            footer: PanelFooter {
                text: format!("© {year} {}", ctx.company),
            },
            collapsible: ctx.collapsible,
        })
    }
}
