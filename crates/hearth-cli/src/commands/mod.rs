//! Command implementations for the CLI
//!
//! Each submodule groups a family of related commands. All of them are
//! re-exported here so main.rs can dispatch without caring about the split.

pub mod core;
pub mod entries;
pub mod recurring;
pub mod reports;
pub mod transfer;

pub use core::*;
pub use entries::*;
pub use recurring::*;
pub use reports::*;
pub use transfer::*;

use anyhow::Result;

use crate::cli::{Cli, Commands};

/// Route a parsed command line to its implementation
pub async fn dispatch(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Init => cmd_init(cli).await,
        Commands::Tx { action } => cmd_tx(cli, action).await,
        Commands::Income { action } => cmd_income(cli, action).await,
        Commands::Liability { action } => cmd_liability(cli, action).await,
        Commands::Asset { action } => cmd_asset(cli, action).await,
        Commands::Category { action } => cmd_category(cli, action).await,
        Commands::Budget { action } => cmd_budget(cli, action).await,
        Commands::Recurring { action } => cmd_recurring(cli, action).await,
        Commands::Balance { month } => cmd_balance(cli, month.as_deref()).await,
        Commands::Networth => cmd_networth(cli).await,
        Commands::Import { file, commit, r#as } => {
            cmd_import(cli, file, *commit, r#as.as_deref()).await
        }
        Commands::Export { out } => cmd_export(cli, out.as_deref()).await,
        Commands::Rates => cmd_rates().await,
    }
}

/// Truncate a string for table display
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
