//! Ledger entry commands: transactions, incomes, liabilities, assets,
//! categories, and monthly budgets.

use anyhow::{Context, Result};
use hearth_core::models::{
    Currency, IncomeSource, NewIncome, NewTransaction, Person, TransactionKind,
};

use crate::cli::{
    AssetAction, BudgetAction, CategoryAction, Cli, IncomeAction, LiabilityAction, TxAction,
};
use crate::commands::{
    open_db, parse_date_or_today, parse_month_or_current, resolve_user, truncate,
};

fn parse_currency(s: &str) -> Result<Currency> {
    s.parse()
        .map_err(|e| anyhow::anyhow!("{e} (expected EUR or INR)"))
}

fn parse_person(s: &str) -> Result<Person> {
    s.parse()
        .map_err(|e| anyhow::anyhow!("{e} (expected husband or wife)"))
}

pub async fn cmd_tx(cli: &Cli, action: &TxAction) -> Result<()> {
    let db = open_db(cli)?;
    let user = resolve_user(cli)?;

    match action {
        TxAction::Add {
            date,
            kind,
            amount,
            currency,
            category,
            payer,
            saver,
            liability,
            description,
        } => {
            let kind: TransactionKind = kind
                .parse()
                .map_err(|e| anyhow::anyhow!("{e} (expected expense, savings, savingsWithdrawal, liabilityPayment, or openingBalance)"))?;
            let tx = NewTransaction {
                date: parse_date_or_today(date.as_deref())?,
                kind,
                amount: *amount,
                currency: parse_currency(currency)?,
                category: category.clone(),
                payer: payer.as_deref().map(parse_person).transpose()?,
                saver: saver.as_deref().map(parse_person).transpose()?,
                liability_id: *liability,
                description: description.clone(),
                import_hash: None,
            };
            let id = db
                .insert_transaction(user, &tx)?
                .context("Transaction already exists (duplicate import hash)")?;
            println!("✅ Added {} #{} ({} {})", kind, id, tx.amount, tx.currency);
        }
        TxAction::List => {
            let txs = db.list_transactions(user)?;
            if txs.is_empty() {
                println!("No transactions yet. Add one with: hearth tx add");
                return Ok(());
            }
            println!(
                "{:<6} {:<12} {:<18} {:>10} {:<4} {:<14} {}",
                "ID", "Date", "Kind", "Amount", "Cur", "Category", "Description"
            );
            println!("{}", "─".repeat(88));
            for tx in &txs {
                println!(
                    "{:<6} {:<12} {:<18} {:>10.2} {:<4} {:<14} {}",
                    tx.id,
                    tx.date.to_string(),
                    tx.kind.as_str(),
                    tx.amount,
                    tx.currency.as_str(),
                    truncate(tx.category.as_deref().unwrap_or("-"), 14),
                    truncate(tx.description.as_deref().unwrap_or(""), 30),
                );
            }
            println!();
            println!("{} transactions", txs.len());
        }
        TxAction::Delete { id } => {
            db.delete_transaction(user, *id)?;
            println!("🗑️  Deleted transaction #{id}");
        }
    }

    Ok(())
}

pub async fn cmd_income(cli: &Cli, action: &IncomeAction) -> Result<()> {
    let db = open_db(cli)?;
    let user = resolve_user(cli)?;

    match action {
        IncomeAction::Add {
            date,
            amount,
            currency,
            source,
            description,
        } => {
            let source: IncomeSource = source
                .parse()
                .map_err(|e| anyhow::anyhow!("{e} (expected husband, wife, or other)"))?;
            let income = NewIncome {
                date: parse_date_or_today(date.as_deref())?,
                amount: *amount,
                currency: parse_currency(currency)?,
                source,
                description: description.clone(),
                import_hash: None,
            };
            let id = db
                .insert_income(user, &income)?
                .context("Income already exists (duplicate import hash)")?;
            println!(
                "✅ Added income #{} ({} {} from {})",
                id, income.amount, income.currency, source
            );
        }
        IncomeAction::List => {
            let incomes = db.list_incomes(user)?;
            if incomes.is_empty() {
                println!("No incomes yet. Add one with: hearth income add");
                return Ok(());
            }
            println!(
                "{:<6} {:<12} {:>10} {:<4} {:<10} {}",
                "ID", "Date", "Amount", "Cur", "Source", "Description"
            );
            println!("{}", "─".repeat(70));
            for income in &incomes {
                println!(
                    "{:<6} {:<12} {:>10.2} {:<4} {:<10} {}",
                    income.id,
                    income.date.to_string(),
                    income.amount,
                    income.currency.as_str(),
                    income.source.as_str(),
                    truncate(income.description.as_deref().unwrap_or(""), 30),
                );
            }
            println!();
            println!("{} incomes", incomes.len());
        }
        IncomeAction::Delete { id } => {
            db.delete_income(user, *id)?;
            println!("🗑️  Deleted income #{id}");
        }
    }

    Ok(())
}

pub async fn cmd_liability(cli: &Cli, action: &LiabilityAction) -> Result<()> {
    let db = open_db(cli)?;
    let user = resolve_user(cli)?;

    match action {
        LiabilityAction::Add {
            name,
            total,
            currency,
        } => {
            let currency = parse_currency(currency)?;
            let id = db.add_liability(user, name, *total, currency)?;
            println!("✅ Added liability '{}' #{} ({} {})", name, id, total, currency);
        }
        LiabilityAction::List => {
            let liabilities = db.list_liabilities(user)?;
            if liabilities.is_empty() {
                println!("No liabilities recorded.");
                return Ok(());
            }
            let transactions = db.list_transactions(user)?;
            let balances =
                hearth_core::networth::liability_balances(&transactions, &liabilities);
            println!(
                "{:<6} {:<24} {:>12} {:>12} {:>12} {:<4}",
                "ID", "Name", "Total", "Paid", "Balance", "Cur"
            );
            println!("{}", "─".repeat(76));
            for lb in &balances {
                println!(
                    "{:<6} {:<24} {:>12.2} {:>12.2} {:>12.2} {:<4}",
                    lb.id,
                    truncate(&lb.name, 24),
                    lb.total_amount,
                    lb.paid,
                    lb.balance,
                    lb.currency.as_str(),
                );
            }
        }
    }

    Ok(())
}

pub async fn cmd_asset(cli: &Cli, action: &AssetAction) -> Result<()> {
    let db = open_db(cli)?;
    let user = resolve_user(cli)?;

    match action {
        AssetAction::Add {
            name,
            value,
            currency,
        } => {
            let currency = parse_currency(currency)?;
            let id = db.add_asset(user, name, *value, currency)?;
            println!("✅ Added asset '{}' #{} ({} {})", name, id, value, currency);
        }
        AssetAction::List => {
            let assets = db.list_assets(user)?;
            if assets.is_empty() {
                println!("No assets recorded.");
                return Ok(());
            }
            println!("{:<6} {:<24} {:>12} {:<4}", "ID", "Name", "Value", "Cur");
            println!("{}", "─".repeat(50));
            for asset in &assets {
                println!(
                    "{:<6} {:<24} {:>12.2} {:<4}",
                    asset.id,
                    truncate(&asset.name, 24),
                    asset.value,
                    asset.currency.as_str(),
                );
            }
        }
    }

    Ok(())
}

pub async fn cmd_category(cli: &Cli, action: &Option<CategoryAction>) -> Result<()> {
    let db = open_db(cli)?;
    let user = resolve_user(cli)?;

    match action {
        None | Some(CategoryAction::List) => {
            let categories = db.list_categories(user)?;
            if categories.is_empty() {
                println!("No categories yet. Run 'hearth init' to seed the defaults.");
                return Ok(());
            }
            for name in &categories {
                println!("  {name}");
            }
        }
        Some(CategoryAction::Add { name }) => {
            db.add_category(user, name)?;
            println!("✅ Added category '{name}'");
        }
        Some(CategoryAction::Delete { name }) => {
            db.delete_category(user, name)?;
            println!("🗑️  Deleted category '{name}'");
        }
    }

    Ok(())
}

pub async fn cmd_budget(cli: &Cli, action: &BudgetAction) -> Result<()> {
    let db = open_db(cli)?;
    let user = resolve_user(cli)?;

    match action {
        BudgetAction::Set {
            month,
            category,
            amount,
        } => {
            let (year, month) = parse_month_or_current(month.as_deref())?;
            db.set_budget(user, year, month, category, *amount)?;
            println!(
                "✅ Budget for '{}' in {}-{:02} set to {:.2} EUR",
                category, year, month, amount
            );
        }
        BudgetAction::Show { month } => {
            crate::commands::cmd_budget_show(&db, user, month.as_deref()).await?;
        }
    }

    Ok(())
}
