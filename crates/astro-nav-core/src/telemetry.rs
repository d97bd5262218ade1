//! Subscriber setup for hosts embedding the navigation shell.
//!
//! Filtering is resolved from `ASTRO_NAV_LOG`, then `RUST_LOG`, then a
//! built-in directive that applies the requested level to the astro crates
//! only and keeps third-party crates at `warn`. Records go to stderr so
//! markup written to stdout stays clean.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable checked before `RUST_LOG`.
pub const LOG_ENV: &str = "ASTRO_NAV_LOG";

const NAV_TARGETS: [&str; 3] = ["astro_nav_core", "astro_role_store", "astro_nav"];

/// Directive used when neither environment variable is set.
pub fn default_directive(level: Level) -> String {
    let mut directive = String::from("warn");
    for target in NAV_TARGETS {
        directive.push_str(&format!(",{target}={}", level.as_str().to_ascii_lowercase()));
    }
    directive
}

fn nav_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_directive(level)))
}

/// Install the global subscriber. Only the first call takes effect.
///
/// `json` switches to one JSON object per line; the `nav.*` event fields
/// and the `nav.shell` span then appear as structured keys.
pub fn init_tracing(json: bool, level: Level) {
    let layer = fmt::layer().with_target(false).with_writer(std::io::stderr);
    let registry = tracing_subscriber::registry().with(nav_filter(level));
    let installed = if json {
        registry.with(layer.json().with_current_span(true)).try_init()
    } else {
        registry.with(layer.compact()).try_init()
    };
    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
