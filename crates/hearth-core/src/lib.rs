//! Hearth Core Library
//!
//! Shared functionality for the Hearth household finance tool:
//! - Database access and migrations (per-user ledger collections)
//! - Recurring entry materialization
//! - Balance, net worth, and budget variance aggregation
//! - CSV statement import and full-ledger export
//! - Currency rate fetching with fixed fallback
//! - Change dispatch for observers of store collections

pub mod balance;
pub mod budget;
pub mod context;
pub mod db;
pub mod dispatch;
pub mod error;
pub mod export;
pub mod import;
pub mod models;
pub mod networth;
pub mod rates;
pub mod recurring;

pub use balance::{monthly_balance, monthly_balances, MonthlyBalance};
pub use budget::{budget_variance, BudgetVarianceReport, CategoryVariance};
pub use context::SessionContext;
pub use db::{Database, StoreOp};
pub use dispatch::{ChangeDispatcher, Collection};
pub use error::{Error, Result};
pub use export::export_csv;
pub use import::{
    commit_drafts, parse_statement, DraftEntry, DraftKind, ImportOutcome, StatementFormat,
};
pub use models::{
    Asset, Currency, Frequency, Income, IncomeSource, Liability, NewIncome, NewRecurringTemplate,
    NewTransaction, Person, RecurringTemplate, TemplateDetails, Transaction, TransactionKind,
};
pub use networth::{
    liability_balances, net_worth_report, person_savings, LiabilityBalance, NetWorthReport,
    PersonSavings,
};
pub use rates::{fetch_or_fallback, CurrencyRates};
pub use recurring::{plan_materialization, run_materialization, DueDates, MaterializationOutcome};
