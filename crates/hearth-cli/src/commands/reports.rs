//! Report commands: monthly balance, net worth, budget vs actual
//!
//! Every report first materializes due recurring entries so the figures
//! reflect everything owed up to today.

use anyhow::Result;
use chrono::Utc;
use hearth_core::balance::monthly_balances;
use hearth_core::budget::budget_variance;
use hearth_core::context::SessionContext;
use hearth_core::db::Database;
use hearth_core::networth::net_worth_report;
use hearth_core::rates;
use hearth_core::recurring::run_materialization;

use crate::cli::Cli;
use crate::commands::{open_db, parse_month_or_current, resolve_user};

/// Materialize due recurring entries before reading the ledger
fn catch_up(db: &Database, user: &str) -> Result<()> {
    let outcome = run_materialization(db, user, Utc::now().date_naive())?;
    if outcome.created > 0 {
        println!(
            "⏳ Materialized {} recurring entries before reporting",
            outcome.created
        );
        println!();
    }
    Ok(())
}

pub async fn cmd_balance(cli: &Cli, month: Option<&str>) -> Result<()> {
    let db = open_db(cli)?;
    let user = resolve_user(cli)?;
    catch_up(&db, user)?;

    let (year, month) = parse_month_or_current(month)?;
    let transactions = db.list_transactions(user)?;
    let incomes = db.list_incomes(user)?;
    let balances = monthly_balances(&transactions, &incomes, year, month);

    println!("📊 Balance for {}-{:02}", year, month);
    println!("   ─────────────────────────────");
    for b in &balances {
        if b.opening == 0.0 && b.cash_flow == 0.0 {
            continue;
        }
        println!("   {}", b.currency.as_str());
        println!("     Opening:   {:>12.2}", b.opening);
        println!("     Cash flow: {:>12.2}", b.cash_flow);
        println!("     Closing:   {:>12.2}", b.closing);
    }
    if balances.iter().all(|b| b.opening == 0.0 && b.cash_flow == 0.0) {
        println!("   No activity.");
    }

    Ok(())
}

pub async fn cmd_networth(cli: &Cli) -> Result<()> {
    let db = open_db(cli)?;
    let user = resolve_user(cli)?;
    catch_up(&db, user)?;

    let transactions = db.list_transactions(user)?;
    let assets = db.list_assets(user)?;
    let liabilities = db.list_liabilities(user)?;
    let report = net_worth_report(&transactions, &assets, &liabilities);

    println!("💰 Net Worth");
    println!("   ─────────────────────────────");

    if !report.savings.is_empty() {
        println!("   Savings:");
        for s in &report.savings {
            println!(
                "     {:<10} {:>12.2} {}",
                s.person.as_str(),
                s.balance,
                s.currency.as_str()
            );
        }
    }

    if !report.liabilities.is_empty() {
        println!("   Liabilities:");
        for l in &report.liabilities {
            println!(
                "     {:<24} {:>12.2} {} outstanding",
                l.name, l.balance, l.currency.as_str()
            );
        }
    }

    println!("   Totals:");
    for t in &report.totals {
        if t.savings == 0.0 && t.assets == 0.0 && t.liabilities == 0.0 {
            continue;
        }
        println!(
            "     {}: savings {:.2} + assets {:.2} − liabilities {:.2} = {:.2}",
            t.currency.as_str(),
            t.savings,
            t.assets,
            t.liabilities,
            t.net_worth
        );
    }

    Ok(())
}

pub async fn cmd_budget_show(db: &Database, user: &str, month: Option<&str>) -> Result<()> {
    catch_up(db, user)?;

    let rates = rates::fetch_or_fallback().await;
    let ctx = SessionContext::new(user, Utc::now().date_naive(), rates);
    let (year, month) = parse_month_or_current(month)?;
    let ctx = ctx.with_month(year, month);

    let transactions = db.list_transactions(&ctx.user_id)?;
    let budgets = db.get_budgets(&ctx.user_id, ctx.year, ctx.month)?;
    let report = budget_variance(&transactions, &budgets, ctx.year, ctx.month, &ctx.rates);

    println!("🎯 Budget vs actual for {}-{:02} (EUR)", ctx.year, ctx.month);
    if report.categories.is_empty() {
        println!("   No budgets and no categorized expenses this month.");
        return Ok(());
    }

    println!(
        "   {:<18} {:>10} {:>10}  {}",
        "Category", "Budget", "Actual", ""
    );
    println!("   {}", "─".repeat(44));
    for c in &report.categories {
        let budget = c
            .budget
            .map(|b| format!("{:.2}", b))
            .unwrap_or_else(|| "-".to_string());
        let flag = if c.over_budget { "⚠️  over" } else { "" };
        println!(
            "   {:<18} {:>10} {:>10.2}  {}",
            c.category, budget, c.actual, flag
        );
    }

    Ok(())
}
