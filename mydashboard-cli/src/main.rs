//! MyDashboard — per-user dashboard layout CLI.
//!
//! # Usage
//!
//! ```text
//! mydashboard component list
//! mydashboard component add <id> --priority <n> [--title <t>] [--body <b>]
//! mydashboard component remove <id>
//! mydashboard show <user> [--json] [--render]
//! mydashboard config show <user> [--json]
//! mydashboard config set <user> <id>... [--hide <id>]...
//! mydashboard config reset <user>
//! ```

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use commands::{component::ComponentCommand, config::ConfigCommand, show::ShowArgs};
use mydashboard_core::{registry, FileConfigStore, StaticRegistry};
use mydashboard_service::DashboardService;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "mydashboard",
    version,
    about = "Manage per-user dashboard component order and visibility",
    long_about = None,
)]
struct Cli {
    /// Log debug output to stderr (overridden by RUST_LOG).
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage the registered dashboard components.
    Component {
        #[command(subcommand)]
        command: ComponentCommand,
    },

    /// Show the components a user sees, in display order.
    Show(ShowArgs),

    /// Inspect or change a user's dashboard configuration.
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

// ---------------------------------------------------------------------------
// Composition root
// ---------------------------------------------------------------------------

/// Service wired to the manifest registry and the per-user YAML store.
pub type Service = DashboardService<StaticRegistry, FileConfigStore>;

pub fn build_service() -> Result<Service> {
    let registry = registry::load_registry()
        .context("failed to load component manifest (~/.mydashboard/components.yaml)")?;
    let store = FileConfigStore::open().context("failed to open configuration store")?;
    Ok(DashboardService::new(registry, store))
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Commands::Component { command } => commands::component::run(command),
        Commands::Show(args) => args.run(),
        Commands::Config { command } => commands::config::run(command),
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
