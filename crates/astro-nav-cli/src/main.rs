//! Astro-Nav - command-line host for the navigation shell
//!
//! The `astro-nav` command mounts the shell the way a page layout would and
//! prints the result.
//!
//! ## Commands
//!
//! - `render`: render a page for a location (HTML or JSON)
//! - `routes`: list the route table, or one role's routes
//! - `role`: show or set the stored role

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use astro_nav_core::{
    init_tracing, render_page, NavConfig, NavShell, PageContent, Role, RoleStore, SectionLayout,
    ShellView, UnavailableRoleStore,
};
use astro_role_store::FileRoleStore;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{debug, info, Level};

#[derive(Parser)]
#[command(name = "astro-nav")]
#[command(author = "Astrodome Engineering")]
#[command(version = astro_nav_core::VERSION)]
#[command(about = "Role-driven navigation shell for Astrodome", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    /// Navigation config file (TOML)
    #[arg(short, long, global = true, env = "ASTRO_NAV_CONFIG")]
    config: Option<PathBuf>,

    /// Role store file (JSON object of key/value strings)
    #[arg(long, global = true, env = "ASTRO_NAV_ROLE_FILE")]
    role_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the shell around a page for the given location
    Render {
        /// Current location (absolute path)
        location: String,

        /// Page layout wrapping the content
        #[arg(short, long, value_enum, default_value_t = Layout::Bare)]
        layout: Layout,

        /// File holding the page markup (default: a placeholder page)
        #[arg(short, long)]
        page: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Html)]
        format: Format,

        /// Render before the role is read (loading state)
        #[arg(long)]
        unmounted: bool,
    },

    /// List route tables
    Routes {
        /// Only this role's routes (unknown roles show the fallback table)
        #[arg(short, long)]
        role: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = ListFormat::Text)]
        format: ListFormat,
    },

    /// Show or change the stored role
    Role {
        #[command(subcommand)]
        action: RoleAction,
    },
}

#[derive(Subcommand)]
enum RoleAction {
    /// Print the role the shell would resolve
    Show,
    /// Write a role to the role file
    Set {
        /// Role token (not validated)
        role: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Layout {
    Admin,
    Contributor,
    Bare,
}

impl From<Layout> for SectionLayout {
    fn from(layout: Layout) -> Self {
        match layout {
            Layout::Admin => SectionLayout::admin(),
            Layout::Contributor => SectionLayout::contributor(),
            Layout::Bare => SectionLayout::bare(),
        }
    }
}

/// Output of `render`.
#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Html,
    Json,
}

/// Output of `routes`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ListFormat {
    Text,
    Json,
}

const TEST_PAGE: &str = "<div class=\"p-4\"><h1>Test Sidebar Page</h1>\
<p>This is a minimal page to test the sidebar rendering.</p></div>";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    init_tracing(cli.json, level);

    let config = match &cli.config {
        Some(path) => NavConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => NavConfig::default(),
    };

    match cli.command {
        Commands::Render {
            location,
            layout,
            page,
            format,
            unmounted,
        } => {
            let page = read_page(page.as_deref()).await?;
            let view = cmd_render(
                &config,
                role_store(cli.role_file.as_deref()),
                &location,
                layout.into(),
                &page,
                unmounted,
            )
            .await?;
            match format {
                Format::Html => println!("{}", render_page(&view)),
                Format::Json => print_json(&view)?,
            }
        }
        Commands::Routes { role, format } => cmd_routes(&config, role, format)?,
        Commands::Role { action } => match action {
            RoleAction::Show => {
                let resolved = config
                    .resolver(role_store(cli.role_file.as_deref()))
                    .resolve()
                    .await;
                println!("{} ({})", resolved.role, resolved.source);
            }
            RoleAction::Set { role } => {
                let path = cli
                    .role_file
                    .context("--role-file (or ASTRO_NAV_ROLE_FILE) is required to set a role")?;
                let store = FileRoleStore::open(path);
                store
                    .set(&config.role_key, &role)
                    .await
                    .with_context(|| format!("failed to write {}", store.path().display()))?;
                info!(role = %role, path = %store.path().display(), "stored role updated");
                println!("{} = {}", config.role_key, role);
            }
        },
    }

    Ok(())
}

/// The file store when a path is given; otherwise no persistent context.
fn role_store(path: Option<&Path>) -> Arc<dyn RoleStore> {
    match path {
        Some(path) => Arc::new(FileRoleStore::open(path)),
        None => Arc::new(UnavailableRoleStore::new("no role file configured")),
    }
}

async fn read_page(path: Option<&Path>) -> Result<PageContent> {
    match path {
        Some(path) => {
            let markup = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("failed to read page {}", path.display()))?;
            Ok(PageContent::new(markup))
        }
        None => Ok(PageContent::new(TEST_PAGE)),
    }
}

async fn cmd_render(
    config: &NavConfig,
    store: Arc<dyn RoleStore>,
    location: &str,
    layout: SectionLayout,
    page: &PageContent,
    unmounted: bool,
) -> Result<ShellView> {
    if !location.starts_with('/') {
        anyhow::bail!("location must be an absolute path, got {location:?}");
    }
    debug!(layout = layout.name(), location, unmounted, "rendering page");

    let mut shell = NavShell::standard(
        config.resolver(store),
        config.route_table()?,
        config.shell_settings(),
    );
    if !unmounted {
        shell.mount().await;
    }
    Ok(layout.render(&shell, location, page))
}

#[derive(Serialize)]
struct RouteListing<'a> {
    role: &'a str,
    routes: &'a [astro_nav_core::RouteItem],
}

fn cmd_routes(config: &NavConfig, role: Option<String>, format: ListFormat) -> Result<()> {
    let table = config.route_table()?;
    let roles: Vec<String> = match role {
        Some(role) => vec![role],
        None => table.roles().map(str::to_string).collect(),
    };

    let listings: Vec<RouteListing<'_>> = roles
        .iter()
        .map(|role| RouteListing {
            role,
            routes: table.routes_for(&Role::new(role.as_str())),
        })
        .collect();

    if format == ListFormat::Json {
        return print_json(&listings);
    }

    for listing in &listings {
        println!("{}", listing.role);
        for item in listing.routes {
            println!("  {:<16} {:<28} {}", item.label, item.href, item.icon);
        }
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
