//! Route vocabulary: `Icon`, `RouteItem`, `RouteTable`.
//!
//! The table is static configuration: built once at startup and never
//! mutated. Unknown roles are not an error; they read the `default` entry.

use std::collections::{BTreeMap, HashSet};
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::{NavError, Result};
use crate::role::Role;

/// Key of the mandatory fallback sequence.
pub const DEFAULT_ROUTES_KEY: &str = "default";

/// Symbolic icon reference. The host maps these to its icon set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    Home,
    FileText,
    Calendar,
    DollarSign,
    Briefcase,
    Archive,
    UploadCloud,
    Users,
    User,
    Settings,
    BarChart,
    CreditCard,
    Filter,
    MessageCircle,
    Award,
    BookOpen,
    UserCheck,
    Activity,
    UserPlus,
}

impl Icon {
    /// The kebab-case token used in config files and markup.
    pub fn name(self) -> &'static str {
        match self {
            Icon::Home => "home",
            Icon::FileText => "file-text",
            Icon::Calendar => "calendar",
            Icon::DollarSign => "dollar-sign",
            Icon::Briefcase => "briefcase",
            Icon::Archive => "archive",
            Icon::UploadCloud => "upload-cloud",
            Icon::Users => "users",
            Icon::User => "user",
            Icon::Settings => "settings",
            Icon::BarChart => "bar-chart",
            Icon::CreditCard => "credit-card",
            Icon::Filter => "filter",
            Icon::MessageCircle => "message-circle",
            Icon::Award => "award",
            Icon::BookOpen => "book-open",
            Icon::UserCheck => "user-check",
            Icon::Activity => "activity",
            Icon::UserPlus => "user-plus",
        }
    }
}

impl std::fmt::Display for Icon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One navigable entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteItem {
    pub label: String,
    /// Absolute path, unique within its sequence.
    pub href: String,
    pub icon: Icon,
}

impl RouteItem {
    pub fn new(label: impl Into<String>, href: impl Into<String>, icon: Icon) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
            icon,
        }
    }
}

/// Validated mapping from role key to an ordered, non-empty route sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RouteTable {
    routes: BTreeMap<String, Vec<RouteItem>>,
}

impl RouteTable {
    /// Build a table, checking that:
    /// - a `default` sequence exists,
    /// - no sequence is empty,
    /// - every href is an absolute path,
    /// - hrefs are unique within each sequence.
    pub fn new(routes: BTreeMap<String, Vec<RouteItem>>) -> Result<Self> {
        if !routes.contains_key(DEFAULT_ROUTES_KEY) {
            return Err(NavError::InvalidTable(format!(
                "table must contain a `{DEFAULT_ROUTES_KEY}` entry"
            )));
        }

        for (role, items) in &routes {
            if items.is_empty() {
                return Err(NavError::InvalidTable(format!(
                    "role `{role}` has no routes"
                )));
            }
            let mut seen = HashSet::new();
            for item in items {
                if !item.href.starts_with('/') {
                    return Err(NavError::InvalidTable(format!(
                        "role `{role}`: href `{}` is not an absolute path",
                        item.href
                    )));
                }
                if !seen.insert(item.href.as_str()) {
                    return Err(NavError::InvalidTable(format!(
                        "role `{role}`: duplicate href `{}`",
                        item.href
                    )));
                }
            }
        }

        Ok(Self { routes })
    }

    /// The table the application ships with.
    pub fn builtin() -> &'static RouteTable {
        static BUILTIN: OnceLock<RouteTable> = OnceLock::new();
        BUILTIN.get_or_init(|| RouteTable {
            routes: builtin_routes(),
        })
    }

    /// Routes for `role`, or the `default` sequence when the role is unknown.
    pub fn routes_for(&self, role: &Role) -> &[RouteItem] {
        self.routes
            .get(role.as_str())
            .or_else(|| self.routes.get(DEFAULT_ROUTES_KEY))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether `role` has its own sequence (not counting the fallback).
    pub fn contains(&self, role: &Role) -> bool {
        role.as_str() != DEFAULT_ROUTES_KEY && self.routes.contains_key(role.as_str())
    }

    /// Configured role keys in sorted order, `default` included.
    pub fn roles(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(String::as_str)
    }
}

fn section(prefix: &str, entries: &[(&str, &str, Icon)]) -> Vec<RouteItem> {
    entries
        .iter()
        .map(|(label, slug, icon)| {
            let href = if slug.is_empty() {
                prefix.to_string()
            } else {
                format!("{prefix}/{slug}")
            };
            RouteItem::new(*label, href, *icon)
        })
        .collect()
}

fn builtin_routes() -> BTreeMap<String, Vec<RouteItem>> {
    let mut routes = BTreeMap::new();

    routes.insert(
        "contributor".to_string(),
        section(
            "/contributor",
            &[
                ("Dashboard", "", Icon::Home),
                ("Applications", "applications", Icon::FileText),
                ("Deadlines", "deadlines", Icon::Calendar),
                ("Earnings", "earnings", Icon::DollarSign),
                ("Opportunities", "opportunities", Icon::Briefcase),
                ("Portfolio", "portfolio", Icon::Archive),
                ("Submissions", "submissions", Icon::UploadCloud),
            ],
        ),
    );
    routes.insert(
        "sponsor".to_string(),
        section(
            "/sponsor",
            &[
                ("Dashboard", "", Icon::Home),
                ("Analytics", "analytics", Icon::BarChart),
                ("Opportunities", "opportunities", Icon::Briefcase),
                ("Payments", "payments", Icon::CreditCard),
            ],
        ),
    );
    routes.insert(
        "mentor".to_string(),
        section(
            "/mentor",
            &[
                ("Dashboard", "", Icon::Home),
                ("Feedback", "feedback", Icon::MessageCircle),
                ("Filter", "filter", Icon::Filter),
                ("Submissions", "submissions", Icon::UploadCloud),
            ],
        ),
    );
    routes.insert(
        "learner".to_string(),
        section(
            "/learner",
            &[
                ("Dashboard", "", Icon::Home),
                ("Certifications", "certifications", Icon::Award),
                ("Learn", "learn", Icon::BookOpen),
                ("Mentorship", "mentorship", Icon::UserCheck),
                ("Opportunities", "opportunities", Icon::Briefcase),
                ("Progress", "progress", Icon::Activity),
            ],
        ),
    );
    routes.insert(
        "admin".to_string(),
        section(
            "/admin",
            &[
                ("Dashboard", "", Icon::Home),
                ("Contributors", "contributors", Icon::UserPlus),
                ("Opportunities", "opportunities", Icon::Briefcase),
                ("Referral", "referral", Icon::UserCheck),
                ("Submissions", "submissions", Icon::UploadCloud),
                ("Users", "users", Icon::Users),
            ],
        ),
    );
    routes.insert(
        DEFAULT_ROUTES_KEY.to_string(),
        vec![
            RouteItem::new("Dashboard", "/dashboard", Icon::Home),
            RouteItem::new("Profile", "/profile", Icon::User),
            RouteItem::new("Settings", "/settings", Icon::Settings),
        ],
    );

    routes
}
