//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `cmd_init` - Initialize the database
//! - shared parsers for dates, months, and the acting user

use anyhow::{bail, Context, Result};
use chrono::{Datelike, NaiveDate, Utc};
use hearth_core::db::Database;
use hearth_core::models::Person;

use crate::cli::Cli;

/// Open database with encryption by default, or unencrypted if --no-encrypt
pub fn open_db(cli: &Cli) -> Result<Database> {
    let path_str = cli
        .db
        .to_str()
        .context("Database path is not valid UTF-8")?;
    if cli.no_encrypt {
        Database::new_unencrypted(path_str).context("Failed to open database (unencrypted)")
    } else {
        Database::new(path_str).context("Failed to open database")
    }
}

/// Resolve the acting user from --user. Only the two household members exist.
pub fn resolve_user(cli: &Cli) -> Result<&str> {
    let person: Person = cli
        .user
        .parse()
        .map_err(|e| anyhow::anyhow!("{e} (expected husband or wife)"))?;
    Ok(person.as_str())
}

/// Parse YYYY-MM-DD, defaulting to today when omitted
pub fn parse_date_or_today(date: Option<&str>) -> Result<NaiveDate> {
    match date {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("Invalid date '{s}' (expected YYYY-MM-DD)")),
        None => Ok(Utc::now().date_naive()),
    }
}

/// Parse YYYY-MM, defaulting to the current month when omitted
pub fn parse_month_or_current(month: Option<&str>) -> Result<(i32, u32)> {
    match month {
        Some(s) => {
            let Some((y, m)) = s.split_once('-') else {
                bail!("Invalid month '{s}' (expected YYYY-MM)");
            };
            let year: i32 = y
                .parse()
                .with_context(|| format!("Invalid month '{s}' (expected YYYY-MM)"))?;
            let month: u32 = m
                .parse()
                .with_context(|| format!("Invalid month '{s}' (expected YYYY-MM)"))?;
            if !(1..=12).contains(&month) {
                bail!("Invalid month '{s}' (month must be 1-12)");
            }
            Ok((year, month))
        }
        None => {
            let today = Utc::now().date_naive();
            Ok((today.year(), today.month()))
        }
    }
}

pub async fn cmd_init(cli: &Cli) -> Result<()> {
    println!("🔧 Initializing database at {}...", cli.db.display());

    let db = open_db(cli)?;

    for user in Person::ALL {
        let seeded = db
            .seed_default_categories(user.as_str())
            .context("Failed to seed default categories")?;
        if seeded > 0 {
            println!("   Seeded {} categories for {}", seeded, user.as_str());
        }
    }

    if cli.no_encrypt {
        println!("   ⚠️  Encryption: DISABLED (--no-encrypt)");
    } else {
        println!("   🔒 Encryption: ENABLED");
    }

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Record a transaction: hearth tx add --amount 42.50 --category Groceries");
    println!("  2. Import a statement: hearth import --file statement.csv");
    println!("  3. Check the month: hearth balance");

    Ok(())
}
