//! Budget variance calculation
//!
//! Pure function comparing one month's expenses against its category
//! budgets. Budgets are EUR amounts; INR expenses convert at the session's
//! rates before comparison.

use std::collections::BTreeMap;

use chrono::Datelike;

use crate::models::{Transaction, TransactionKind};
use crate::rates::CurrencyRates;

/// Budget-vs-actual for one category in one month
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryVariance {
    pub category: String,
    /// EUR budget for the month, if one was set
    pub budget: Option<f64>,
    /// Actual expenses converted to EUR
    pub actual: f64,
    /// Only set for a positive budget that was exceeded
    pub over_budget: bool,
}

/// Variance report for one month
#[derive(Debug, Clone)]
pub struct BudgetVarianceReport {
    pub year: i32,
    pub month: u32,
    pub categories: Vec<CategoryVariance>,
}

/// Compare one month's expenses against its budgets
///
/// The category set is the union of budgeted categories and categories
/// that actually saw expenses, so an untouched budget still shows up with
/// zero actual, and an unbudgeted spend still shows up without a flag.
/// Uncategorized expenses are outside budget tracking and are ignored.
pub fn budget_variance(
    transactions: &[Transaction],
    budgets: &BTreeMap<String, f64>,
    year: i32,
    month: u32,
    rates: &CurrencyRates,
) -> BudgetVarianceReport {
    let mut actuals: BTreeMap<String, f64> = BTreeMap::new();
    for tx in transactions {
        if tx.kind != TransactionKind::Expense {
            continue;
        }
        if tx.date.year() != year || tx.date.month() != month {
            continue;
        }
        if let Some(category) = &tx.category {
            *actuals.entry(category.clone()).or_insert(0.0) +=
                rates.to_eur(tx.amount, tx.currency);
        }
    }

    let mut names: Vec<&String> = budgets.keys().chain(actuals.keys()).collect();
    names.sort();
    names.dedup();

    let categories = names
        .into_iter()
        .map(|name| {
            let budget = budgets.get(name).copied();
            let actual = actuals.get(name).copied().unwrap_or(0.0);
            let over_budget = match budget {
                Some(b) => b > 0.0 && actual > b,
                None => false,
            };
            CategoryVariance {
                category: name.clone(),
                budget,
                actual,
                over_budget,
            }
        })
        .collect();

    BudgetVarianceReport {
        year,
        month,
        categories,
    }
}
