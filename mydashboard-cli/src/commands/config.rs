//! `mydashboard config show|set|reset <user>`

use std::collections::BTreeSet;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use mydashboard_core::{ComponentId, ConfigStore, DashboardComponent, DashboardConfig, UserName};
use mydashboard_service::{MemorySession, NoSession};

use crate::build_service;

/// Inspect or change a user's dashboard configuration.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the resolved configuration (stored, or the generated default).
    Show(ShowConfigArgs),

    /// Replace the user's configuration with the given component order.
    Set(SetArgs),

    /// Delete the user's configuration; the default layout applies again.
    Reset {
        /// User whose configuration to delete.
        user: String,
    },
}

#[derive(Args, Debug)]
pub struct ShowConfigArgs {
    /// User whose configuration to show.
    pub user: String,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// User whose configuration to replace.
    pub user: String,

    /// Component ids in display order.
    #[arg(required = true)]
    pub components: Vec<String>,

    /// Component id to hide (repeatable). Ids not listed in the order are
    /// appended as hidden.
    #[arg(long = "hide", value_name = "ID")]
    pub hide: Vec<String>,
}

pub fn run(cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show(args) => show(args),
        ConfigCommand::Set(args) => set(args),
        ConfigCommand::Reset { user } => reset(user),
    }
}

#[derive(Tabled, Serialize)]
struct ConfigRow {
    #[tabled(rename = "ORDER")]
    order: i32,
    #[tabled(rename = "COMPONENT")]
    component: String,
    #[tabled(rename = "HIDDEN")]
    hidden: bool,
}

fn show(args: ShowConfigArgs) -> Result<()> {
    let service = build_service()?;
    let user = UserName::from(args.user);
    let stored = !service
        .store()
        .find_by_user(&user)
        .with_context(|| format!("failed to read configuration for '{user}'"))?
        .is_empty();
    let configs = service
        .session(&MemorySession::new())
        .get_user_config(&user)
        .with_context(|| format!("failed to resolve configuration for '{user}'"))?;

    let rows: Vec<ConfigRow> = configs
        .iter()
        .map(|c| ConfigRow {
            order: c.order,
            component: c.component_id.to_string(),
            hidden: c.hidden,
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("No components registered; nothing to configure for '{user}'.");
        return Ok(());
    }
    if !stored {
        println!("No saved configuration for '{user}'; showing the default layout.");
    }
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
    Ok(())
}

/// Build replace-all records: listed ids numbered from 1, hidden ids that
/// were not listed appended after them.
fn build_records(user: &UserName, components: &[String], hide: &[String]) -> Vec<DashboardConfig> {
    let hidden: BTreeSet<&str> = hide.iter().map(String::as_str).collect();
    let mut seen = BTreeSet::new();
    let ordered = components
        .iter()
        .chain(hide.iter())
        .filter(|id| seen.insert(id.as_str()));
    ordered
        .zip(1..)
        .map(|(id, order)| {
            DashboardConfig::new(user.clone(), ComponentId::from(id.as_str()), order)
                .with_hidden(hidden.contains(id.as_str()))
        })
        .collect()
}

fn set(args: SetArgs) -> Result<()> {
    let service = build_service()?;
    let user = UserName::from(args.user);
    let records = build_records(&user, &args.components, &args.hide);

    let registered: BTreeSet<ComponentId> = service
        .list_components()
        .iter()
        .map(|c| c.id().clone())
        .collect();
    for record in &records {
        if !registered.contains(&record.component_id) {
            tracing::warn!(component = %record.component_id, "component is not registered");
        }
    }

    let count = records.len();
    service
        .session(&NoSession)
        .replace_user_config(&user, records)
        .with_context(|| format!("failed to save configuration for '{user}'"))?;
    println!("✓ Saved {count} component(s) for '{user}'");
    Ok(())
}

fn reset(user: String) -> Result<()> {
    let service = build_service()?;
    let user = UserName::from(user);
    service
        .session(&NoSession)
        .delete_user_config(&user)
        .with_context(|| format!("failed to delete configuration for '{user}'"))?;
    println!("✓ Reset dashboard configuration for '{user}'");
    Ok(())
}
