//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Hearth - Household finance tracker
#[derive(Parser)]
#[command(name = "hearth")]
#[command(about = "Self-hosted household finance tracker", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "hearth.db", global = true)]
    pub db: PathBuf,

    /// Acting user (husband or wife)
    #[arg(short, long, default_value = "husband", global = true)]
    pub user: String,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable database encryption (not recommended for production)
    ///
    /// By default, the database is encrypted using SQLCipher.
    /// Set HEARTH_DB_KEY environment variable with your passphrase.
    /// Use --no-encrypt only for development or testing.
    #[arg(long, global = true)]
    pub no_encrypt: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and seed starter categories
    Init,

    /// Manage ledger transactions
    Tx {
        #[command(subcommand)]
        action: TxAction,
    },

    /// Manage incomes
    Income {
        #[command(subcommand)]
        action: IncomeAction,
    },

    /// Manage liabilities (loans, credit lines)
    Liability {
        #[command(subcommand)]
        action: LiabilityAction,
    },

    /// Manage assets (property, deposits, vehicles)
    Asset {
        #[command(subcommand)]
        action: AssetAction,
    },

    /// Manage expense categories
    Category {
        #[command(subcommand)]
        action: Option<CategoryAction>,
    },

    /// Manage monthly category budgets
    Budget {
        #[command(subcommand)]
        action: BudgetAction,
    },

    /// Manage recurring entry templates
    Recurring {
        #[command(subcommand)]
        action: Option<RecurringAction>,
    },

    /// Show opening, cash flow, and closing balance per currency
    Balance {
        /// Month to report (YYYY-MM, defaults to the current month)
        #[arg(long)]
        month: Option<String>,
    },

    /// Show savings, liabilities, assets, and net worth per currency
    Networth,

    /// Import a bank statement CSV
    Import {
        /// CSV file to import
        #[arg(short, long)]
        file: PathBuf,

        /// Commit the drafts instead of previewing them
        #[arg(long)]
        commit: bool,

        /// Treat every row as the given draft kind (expense or income)
        #[arg(long)]
        r#as: Option<String>,
    },

    /// Export the full ledger as CSV
    Export {
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Show current exchange rates
    Rates,
}

#[derive(Subcommand)]
pub enum TxAction {
    /// Add a transaction
    Add {
        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Kind: expense, savings, savingsWithdrawal, liabilityPayment, openingBalance
        #[arg(short, long, default_value = "expense")]
        kind: String,

        /// Amount (always positive)
        #[arg(short, long)]
        amount: f64,

        /// Currency: EUR or INR
        #[arg(short, long, default_value = "EUR")]
        currency: String,

        /// Expense category
        #[arg(long)]
        category: Option<String>,

        /// Who paid (husband or wife)
        #[arg(long)]
        payer: Option<String>,

        /// Whose savings (husband or wife)
        #[arg(long)]
        saver: Option<String>,

        /// Liability id (required for liability payments)
        #[arg(long)]
        liability: Option<i64>,

        /// Free-form description
        #[arg(short, long)]
        description: Option<String>,
    },

    /// List transactions
    List,

    /// Delete a transaction
    Delete {
        /// Transaction id
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum IncomeAction {
    /// Add an income
    Add {
        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Amount (always positive)
        #[arg(short, long)]
        amount: f64,

        /// Currency: EUR or INR
        #[arg(short, long, default_value = "EUR")]
        currency: String,

        /// Source: husband, wife, or other
        #[arg(short, long, default_value = "other")]
        source: String,

        /// Free-form description
        #[arg(short, long)]
        description: Option<String>,
    },

    /// List incomes
    List,

    /// Delete an income
    Delete {
        /// Income id
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum LiabilityAction {
    /// Add a liability
    Add {
        /// Liability name
        name: String,

        /// Total amount owed
        #[arg(short, long)]
        total: f64,

        /// Currency: EUR or INR
        #[arg(short, long, default_value = "EUR")]
        currency: String,
    },

    /// List liabilities with outstanding balances
    List,
}

#[derive(Subcommand)]
pub enum AssetAction {
    /// Add an asset
    Add {
        /// Asset name
        name: String,

        /// Current value
        #[arg(long)]
        value: f64,

        /// Currency: EUR or INR
        #[arg(short, long, default_value = "EUR")]
        currency: String,
    },

    /// List assets
    List,
}

#[derive(Subcommand)]
pub enum CategoryAction {
    /// List categories in display order
    List,

    /// Append a category
    Add {
        /// Category name
        name: String,
    },

    /// Remove a category (existing transactions keep the label)
    Delete {
        /// Category name
        name: String,
    },
}

#[derive(Subcommand)]
pub enum BudgetAction {
    /// Set the budget for one category in one month
    Set {
        /// Month (YYYY-MM, defaults to the current month)
        #[arg(long)]
        month: Option<String>,

        /// Category name
        category: String,

        /// EUR budget amount
        amount: f64,
    },

    /// Show budget vs actual for one month
    Show {
        /// Month (YYYY-MM, defaults to the current month)
        #[arg(long)]
        month: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum RecurringAction {
    /// Add a recurring template
    Add {
        /// Frequency: monthly or yearly
        #[arg(short, long, default_value = "monthly")]
        frequency: String,

        /// First occurrence date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        start: Option<String>,

        /// Kind: expense, savings, savingsWithdrawal, liabilityPayment, or income
        #[arg(short, long, default_value = "expense")]
        kind: String,

        /// Amount per occurrence
        #[arg(short, long)]
        amount: f64,

        /// Currency: EUR or INR
        #[arg(short, long, default_value = "EUR")]
        currency: String,

        /// Expense category
        #[arg(long)]
        category: Option<String>,

        /// Who pays (husband or wife)
        #[arg(long)]
        payer: Option<String>,

        /// Whose savings (husband or wife)
        #[arg(long)]
        saver: Option<String>,

        /// Liability id (required for liability payments)
        #[arg(long)]
        liability: Option<i64>,

        /// Income source (husband, wife, or other; income templates only)
        #[arg(long)]
        source: Option<String>,

        /// Free-form description
        #[arg(short, long)]
        description: Option<String>,
    },

    /// List recurring templates
    List,

    /// Delete a template (materialized entries stay)
    Delete {
        /// Template id
        id: i64,
    },

    /// Materialize every due occurrence
    Run,
}
