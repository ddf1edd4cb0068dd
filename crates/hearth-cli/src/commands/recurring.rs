//! Recurring template commands

use anyhow::{bail, Result};
use chrono::Utc;
use hearth_core::models::{
    Frequency, IncomeSource, IncomeTemplate, NewRecurringTemplate, TemplateDetails,
    TransactionKind, TransactionTemplate,
};
use hearth_core::recurring::run_materialization;

use crate::cli::{Cli, RecurringAction};
use crate::commands::{open_db, parse_date_or_today, resolve_user, truncate};

pub async fn cmd_recurring(cli: &Cli, action: &Option<RecurringAction>) -> Result<()> {
    let db = open_db(cli)?;
    let user = resolve_user(cli)?;

    match action {
        Some(RecurringAction::Add {
            frequency,
            start,
            kind,
            amount,
            currency,
            category,
            payer,
            saver,
            liability,
            source,
            description,
        }) => {
            let frequency: Frequency = frequency
                .parse()
                .map_err(|e| anyhow::anyhow!("{e} (expected monthly or yearly)"))?;
            let start_date = parse_date_or_today(start.as_deref())?;
            let currency = currency
                .parse()
                .map_err(|e| anyhow::anyhow!("{e} (expected EUR or INR)"))?;

            let details = if kind == "income" {
                let source: IncomeSource = source
                    .as_deref()
                    .unwrap_or("other")
                    .parse()
                    .map_err(|e| anyhow::anyhow!("{e} (expected husband, wife, or other)"))?;
                TemplateDetails::Income(IncomeTemplate {
                    amount: *amount,
                    currency,
                    source,
                    description: description.clone(),
                })
            } else {
                let kind: TransactionKind = kind.parse().map_err(|e| {
                    anyhow::anyhow!(
                        "{e} (expected expense, savings, savingsWithdrawal, liabilityPayment, or income)"
                    )
                })?;
                if kind == TransactionKind::OpeningBalance {
                    bail!("Opening balances are one-off snapshots and cannot recur");
                }
                TemplateDetails::Transaction(TransactionTemplate {
                    kind,
                    amount: *amount,
                    currency,
                    category: category.clone(),
                    payer: payer
                        .as_deref()
                        .map(|s| {
                            s.parse()
                                .map_err(|e| anyhow::anyhow!("{e} (expected husband or wife)"))
                        })
                        .transpose()?,
                    saver: saver
                        .as_deref()
                        .map(|s| {
                            s.parse()
                                .map_err(|e| anyhow::anyhow!("{e} (expected husband or wife)"))
                        })
                        .transpose()?,
                    liability_id: *liability,
                    description: description.clone(),
                })
            };

            let template = NewRecurringTemplate {
                frequency,
                start_date,
                details,
            };
            let id = db.add_recurring(user, &template)?;
            println!(
                "✅ Added {} recurring template #{} starting {}",
                frequency, id, start_date
            );

            // Catch up immediately in case the start date is in the past
            let outcome = run_materialization(&db, user, Utc::now().date_naive())?;
            if outcome.created > 0 {
                println!("   Materialized {} past occurrences", outcome.created);
            }
        }
        None | Some(RecurringAction::List) => {
            let templates = db.list_recurring(user)?;
            if templates.is_empty() {
                println!("No recurring templates. Add one with: hearth recurring add");
                return Ok(());
            }
            println!(
                "{:<6} {:<9} {:<8} {:>10} {:<4} {:<12} {:<12} {}",
                "ID", "Freq", "Kind", "Amount", "Cur", "Start", "Last run", "Description"
            );
            println!("{}", "─".repeat(84));
            for t in &templates {
                let description = match &t.details {
                    TemplateDetails::Transaction(tx) => tx.description.as_deref().unwrap_or(""),
                    TemplateDetails::Income(i) => i.description.as_deref().unwrap_or(""),
                };
                println!(
                    "{:<6} {:<9} {:<8} {:>10.2} {:<4} {:<12} {:<12} {}",
                    t.id,
                    t.frequency.as_str(),
                    t.details.kind_str(),
                    t.details.amount(),
                    t.details.currency().as_str(),
                    t.start_date.to_string(),
                    t.last_processed
                        .map(|d| d.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                    truncate(description, 24),
                );
            }
        }
        Some(RecurringAction::Delete { id }) => {
            db.delete_recurring(user, *id)?;
            println!("🗑️  Deleted recurring template #{id} (materialized entries kept)");
        }
        Some(RecurringAction::Run) => {
            println!("⏳ Materializing recurring entries...");
            let outcome = run_materialization(&db, user, Utc::now().date_naive())?;
            if outcome.created == 0 {
                println!("✅ Nothing due. Everything is up to date.");
            } else {
                println!(
                    "✅ Created {} entries from {} templates",
                    outcome.created, outcome.templates_advanced
                );
            }
        }
    }

    Ok(())
}
