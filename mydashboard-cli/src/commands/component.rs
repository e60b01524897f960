//! `mydashboard component list|add|remove`

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use tabled::{settings::Style, Table, Tabled};

use mydashboard_core::{registry, ComponentId, ComponentSpec, DashboardComponent};

use crate::build_service;

/// Manage the registered dashboard components.
#[derive(Subcommand, Debug)]
pub enum ComponentCommand {
    /// List registered components in default display order.
    List,

    /// Register a new component.
    Add(AddArgs),

    /// Unregister a component. Stored user configurations are kept.
    Remove {
        /// Component id.
        id: String,
    },
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Component id (e.g. "news", "agenda").
    pub id: String,

    /// Intrinsic display priority; lower values display first.
    #[arg(long, short = 'p', allow_negative_numbers = true)]
    pub priority: i32,

    /// Heading shown when rendering. Defaults to the id.
    #[arg(long, short = 't')]
    pub title: Option<String>,

    /// Body text; `{user}` is replaced with the user name.
    #[arg(long, short = 'b')]
    pub body: Option<String>,
}

pub fn run(cmd: ComponentCommand) -> Result<()> {
    match cmd {
        ComponentCommand::List => list(),
        ComponentCommand::Add(args) => add(args),
        ComponentCommand::Remove { id } => remove(id),
    }
}

#[derive(Tabled)]
struct ComponentRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "PRIORITY")]
    priority: i32,
    #[tabled(rename = "TITLE")]
    title: String,
}

fn list() -> Result<()> {
    let service = build_service()?;
    let components = service.list_components();
    if components.is_empty() {
        println!("No components registered.");
        println!("Run: mydashboard component add <id> --priority <n>");
        return Ok(());
    }

    let rows: Vec<ComponentRow> = components
        .iter()
        .map(|c| ComponentRow {
            id: c.id().to_string(),
            priority: c.priority(),
            title: c.title().to_string(),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
    Ok(())
}

fn add(args: AddArgs) -> Result<()> {
    let spec = ComponentSpec {
        id: ComponentId::from(args.id.clone()),
        priority: args.priority,
        title: args.title,
        body: args.body,
    };
    registry::add_component(spec)
        .with_context(|| format!("failed to register component '{}'", args.id))?;
    println!("✓ Registered component '{}' (priority {})", args.id, args.priority);
    Ok(())
}

fn remove(id: String) -> Result<()> {
    registry::remove_component(&ComponentId::from(id.clone()))
        .with_context(|| format!("failed to remove component '{id}'"))?;
    println!("✓ Removed component '{id}'");
    Ok(())
}
