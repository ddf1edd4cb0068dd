//! Statement import, ledger export, and exchange rate commands

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use hearth_core::export::export_csv;
use hearth_core::import::{commit_drafts, parse_statement, DraftKind};
use hearth_core::rates;

use crate::cli::Cli;
use crate::commands::{open_db, resolve_user, truncate};

pub async fn cmd_import(
    cli: &Cli,
    file: &Path,
    commit: bool,
    kind_override: Option<&str>,
) -> Result<()> {
    let reader = fs::File::open(file)
        .with_context(|| format!("Failed to open {}", file.display()))?;

    println!("📂 Parsing {}...", file.display());
    let mut drafts = parse_statement(reader)
        .with_context(|| format!("Failed to parse {}", file.display()))?;

    if let Some(kind) = kind_override {
        let kind = match kind {
            "expense" => DraftKind::Expense,
            "income" => DraftKind::Income,
            other => bail!("Unknown draft kind '{other}' (expected expense or income)"),
        };
        for draft in &mut drafts {
            draft.kind = kind;
        }
    }

    if drafts.is_empty() {
        println!("   No importable rows found.");
        return Ok(());
    }

    if !commit {
        println!(
            "{:<12} {:<8} {:>10} {:<4} {}",
            "Date", "Kind", "Amount", "Cur", "Description"
        );
        println!("{}", "─".repeat(66));
        for draft in &drafts {
            let kind = match draft.kind {
                DraftKind::Expense => "expense",
                DraftKind::Income => "income",
            };
            println!(
                "{:<12} {:<8} {:>10.2} {:<4} {}",
                draft.date.to_string(),
                kind,
                draft.amount,
                draft.currency.as_str(),
                truncate(&draft.description, 36),
            );
        }
        println!();
        println!(
            "{} drafts. Re-run with --commit to write them to the ledger.",
            drafts.len()
        );
        return Ok(());
    }

    let db = open_db(cli)?;
    let user = resolve_user(cli)?;
    let outcome = commit_drafts(&db, user, &drafts)?;

    println!("✅ Import complete!");
    println!("   Imported: {}", outcome.imported);
    if outcome.skipped > 0 {
        println!("   Skipped (already imported): {}", outcome.skipped);
    }

    Ok(())
}

pub async fn cmd_export(cli: &Cli, out: Option<&Path>) -> Result<()> {
    let db = open_db(cli)?;
    let user = resolve_user(cli)?;

    let transactions = db.list_transactions(user)?;
    let incomes = db.list_incomes(user)?;
    let csv = export_csv(&transactions, &incomes);

    match out {
        Some(path) => {
            fs::write(path, &csv)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!(
                "✅ Exported {} entries to {}",
                transactions.len() + incomes.len(),
                path.display()
            );
        }
        None => print!("{csv}"),
    }

    Ok(())
}

pub async fn cmd_rates() -> Result<()> {
    println!("💱 Fetching exchange rates...");
    let rates = rates::fetch_or_fallback().await;
    println!("   1 EUR = {:.4} INR", rates.inr);
    Ok(())
}
