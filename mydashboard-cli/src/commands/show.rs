//! `mydashboard show <user>` — the user's dashboard in display order.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use mydashboard_core::{DashboardComponent, UserName};
use mydashboard_service::MemorySession;

use crate::build_service;

/// Arguments for `mydashboard show`.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// User whose dashboard to resolve.
    pub user: String,

    /// Emit machine-readable JSON.
    #[arg(long, conflicts_with = "render")]
    pub json: bool,

    /// Print each component's rendered output.
    #[arg(long)]
    pub render: bool,
}

#[derive(Serialize)]
struct ComponentJson {
    id: String,
    priority: i32,
    title: String,
}

impl ShowArgs {
    pub fn run(self) -> Result<()> {
        let service = build_service()?;
        let cache = MemorySession::new();
        let user = UserName::from(self.user);
        let components = service
            .session(&cache)
            .get_components(&user)
            .with_context(|| format!("failed to resolve dashboard for '{user}'"))?;

        if self.json {
            let rows: Vec<ComponentJson> = components
                .iter()
                .map(|c| ComponentJson {
                    id: c.id().to_string(),
                    priority: c.priority(),
                    title: c.title().to_string(),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
            return Ok(());
        }

        if components.is_empty() {
            println!("Nothing to show for '{user}'.");
            return Ok(());
        }

        if self.render {
            for component in components.iter() {
                println!("{}", component.render(&user));
            }
            return Ok(());
        }

        println!("Dashboard for {}:", user.to_string().bold());
        for (position, component) in components.iter().enumerate() {
            println!(
                "  {:>2}. {} {}",
                position + 1,
                component.id().to_string().green(),
                format!("({})", component.title()).dimmed()
            );
        }
        Ok(())
    }
}
