//! Monthly balance aggregation
//!
//! Pure functions over ledger snapshots. Each currency is computed
//! independently; EUR and INR figures are reported side by side and
//! never summed together.

use chrono::{Datelike, NaiveDate};

use crate::models::{Currency, Income, Transaction, TransactionKind};

/// Opening balance, month cash flow, and closing balance for one currency
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyBalance {
    pub currency: Currency,
    pub opening: f64,
    pub cash_flow: f64,
    pub closing: f64,
}

/// Signed cash-flow contribution of a transaction
///
/// Savings and liability payments leave the spendable balance even though
/// they stay in the household's net worth. Opening balances are savings
/// snapshots, not cash movements, and contribute nothing here.
fn flow(tx: &Transaction) -> f64 {
    match tx.kind {
        TransactionKind::Expense
        | TransactionKind::Savings
        | TransactionKind::LiabilityPayment => -tx.amount,
        TransactionKind::SavingsWithdrawal => tx.amount,
        TransactionKind::OpeningBalance => 0.0,
    }
}

fn in_month(date: NaiveDate, year: i32, month: u32) -> bool {
    date.year() == year && date.month() == month
}

/// Balance figures for one month and one currency
///
/// `opening` folds every entry dated strictly before the month's first
/// day; an entry on the 1st belongs to `cash_flow`.
pub fn monthly_balance(
    transactions: &[Transaction],
    incomes: &[Income],
    year: i32,
    month: u32,
    currency: Currency,
) -> MonthlyBalance {
    let mut opening = 0.0;
    let mut cash_flow = 0.0;

    for tx in transactions.iter().filter(|t| t.currency == currency) {
        if in_month(tx.date, year, month) {
            cash_flow += flow(tx);
        } else if (tx.date.year(), tx.date.month()) < (year, month) {
            opening += flow(tx);
        }
    }

    for income in incomes.iter().filter(|i| i.currency == currency) {
        if in_month(income.date, year, month) {
            cash_flow += income.amount;
        } else if (income.date.year(), income.date.month()) < (year, month) {
            opening += income.amount;
        }
    }

    MonthlyBalance {
        currency,
        opening,
        cash_flow,
        closing: opening + cash_flow,
    }
}

/// Balance figures for one month, all currencies
pub fn monthly_balances(
    transactions: &[Transaction],
    incomes: &[Income],
    year: i32,
    month: u32,
) -> Vec<MonthlyBalance> {
    Currency::ALL
        .iter()
        .map(|&currency| monthly_balance(transactions, incomes, year, month, currency))
        .collect()
}
