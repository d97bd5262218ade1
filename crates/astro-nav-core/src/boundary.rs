//! Failure isolation around the navigation panel.
//!
//! [`ErrorBoundary::guard`] runs a render call and turns both returned
//! errors and panics into a [`BoundaryOutcome::Failed`] carrying a
//! [`Diagnostic`]. The first failure trips the boundary for good: later
//! calls return the recorded diagnostic without rendering again. Only a
//! fresh boundary (a remount) renders again.
//!
//! Panics raised inside a guard are not printed by the process panic hook;
//! their source location is recorded in the diagnostic trace instead and
//! reported once through `tracing`. Panics outside any guard reach the
//! previously installed hook unchanged.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Once, OnceLock};

use serde::Serialize;
use tracing::error;

use crate::panel::RenderError;

/// Message shown in place of a failed panel.
pub const DEFAULT_FALLBACK_MESSAGE: &str = "Error: Sidebar failed to render";

/// Structured record of a contained render failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Boundary that caught the failure.
    pub component: String,
    pub error: String,
    /// Render path, then the failing component and panic site when known.
    pub trace: Vec<String>,
}

/// Result of a guarded render: `Ok(view) | Failed(diagnostic)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundaryOutcome<V> {
    Rendered(V),
    Failed(Diagnostic),
}

impl<V> BoundaryOutcome<V> {
    pub fn is_rendered(&self) -> bool {
        matches!(self, BoundaryOutcome::Rendered(_))
    }
}

/// Static view substituted for a failed subtree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FallbackView {
    pub message: String,
}

impl Default for FallbackView {
    fn default() -> Self {
        Self {
            message: DEFAULT_FALLBACK_MESSAGE.to_string(),
        }
    }
}

/// Coarse, non-retrying fault container for one subtree.
#[derive(Debug)]
pub struct ErrorBoundary {
    component: String,
    tripped: OnceLock<Diagnostic>,
}

impl ErrorBoundary {
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            tripped: OnceLock::new(),
        }
    }

    pub fn component(&self) -> &str {
        &self.component
    }

    pub fn is_tripped(&self) -> bool {
        self.tripped.get().is_some()
    }

    /// The diagnostic recorded when the boundary tripped.
    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        self.tripped.get()
    }

    /// Run `render` inside the boundary.
    ///
    /// `path` names the render call within the subtree and is recorded as
    /// the first trace frame.
    pub fn guard<V, F>(&self, path: &str, render: F) -> BoundaryOutcome<V>
    where
        F: FnOnce() -> Result<V, RenderError>,
    {
        if let Some(diagnostic) = self.tripped.get() {
            return BoundaryOutcome::Failed(diagnostic.clone());
        }

        install_panic_hook();
        GUARD_DEPTH.with(|depth| depth.set(depth.get() + 1));
        let result = panic::catch_unwind(AssertUnwindSafe(render));
        GUARD_DEPTH.with(|depth| depth.set(depth.get() - 1));
        let site = PANIC_SITE.with(|slot| slot.borrow_mut().take());

        let err = match result {
            Ok(Ok(view)) => return BoundaryOutcome::Rendered(view),
            Ok(Err(err)) => err,
            Err(payload) => RenderError::Panicked {
                component: path.to_string(),
                message: panic_message(payload.as_ref()),
            },
        };

        let diagnostic = self.diagnose(path, &err, site);
        if self.tripped.set(diagnostic.clone()).is_ok() {
            error!(
                component = %diagnostic.component,
                error = %diagnostic.error,
                trace = ?diagnostic.trace,
                "render fault contained by error boundary"
            );
        }
        // A concurrent failure may have tripped first; report the recorded one.
        BoundaryOutcome::Failed(self.tripped.get().cloned().unwrap_or(diagnostic))
    }

    fn diagnose(&self, path: &str, err: &RenderError, site: Option<String>) -> Diagnostic {
        let mut trace = vec![format!("{} > {}", self.component, path)];
        if let RenderError::Render { component, .. } = err {
            trace.push(format!("{} > {} > {}", self.component, path, component));
        }
        if let Some(site) = site {
            trace.push(format!("panicked at {site}"));
        }
        Diagnostic {
            component: self.component.clone(),
            error: err.to_string(),
            trace,
        }
    }
}

thread_local! {
    static GUARD_DEPTH: Cell<usize> = const { Cell::new(0) };
    static PANIC_SITE: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Chain a hook in front of the current one that captures the panic site
/// while a guard is running on this thread.
fn install_panic_hook() {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if GUARD_DEPTH.with(Cell::get) == 0 {
                previous(info);
                return;
            }
            let site = info
                .location()
                .map(|loc| format!("{}:{}:{}", loc.file(), loc.line(), loc.column()));
            PANIC_SITE.with(|slot| *slot.borrow_mut() = site);
        }));
    });
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        (*text).to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "<non-string panic payload>".to_string()
    }
}
