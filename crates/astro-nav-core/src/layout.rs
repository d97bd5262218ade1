//! Page layouts that mount the navigation shell around page content.
//!
//! Section layouts (admin, contributor) prepend a header bar with the brand
//! link and a wallet slot the host fills in. The bare layout passes page
//! content through untouched.

use serde::{Deserialize, Serialize};

use crate::html::escape;
use crate::shell::{NavShell, ShellView};

/// Opaque page markup rendered inside the inset region unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageContent(String);

impl PageContent {
    pub fn new(markup: impl Into<String>) -> Self {
        PageContent(markup.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for PageContent {
    fn from(markup: String) -> Self {
        PageContent(markup)
    }
}

/// Brand link shown at the start of a section header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandLink {
    pub label: String,
    pub href: String,
}

impl Default for BrandLink {
    fn default() -> Self {
        Self {
            label: "Astrodome".to_string(),
            href: "/contributor".to_string(),
        }
    }
}

/// A layout wrapping pages of one application section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionLayout {
    name: &'static str,
    brand: Option<BrandLink>,
}

impl SectionLayout {
    pub fn admin() -> Self {
        Self {
            name: "admin",
            brand: Some(BrandLink::default()),
        }
    }

    pub fn contributor() -> Self {
        Self {
            name: "contributor",
            brand: Some(BrandLink::default()),
        }
    }

    /// No header; the page sits directly in the inset.
    pub fn bare() -> Self {
        Self {
            name: "bare",
            brand: None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Prefix `page` with this section's header, if it has one.
    pub fn compose(&self, page: &PageContent) -> PageContent {
        let Some(brand) = &self.brand else {
            return page.clone();
        };
        PageContent(format!(
            "<header class=\"section-header\"><a href=\"{}\" class=\"brand\">{}</a>\
             <div class=\"wallet-slot\" data-slot=\"wallet\"></div></header>{}",
            escape(&brand.href),
            escape(&brand.label),
            page.as_str()
        ))
    }

    /// Compose `page` and render it inside `shell`.
    pub fn render(&self, shell: &NavShell, location: &str, page: &PageContent) -> ShellView {
        shell.render(location, self.compose(page))
    }
}
