//! Domain models for Hearth

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Display currency for ledger entries
///
/// Amounts in different currencies are never summed together; every
/// aggregation reports parallel EUR/INR figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Eur,
    Inr,
}

impl Currency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eur => "EUR",
            Self::Inr => "INR",
        }
    }

    /// Both supported currencies, in display order
    pub const ALL: [Currency; 2] = [Currency::Eur, Currency::Inr];
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "EUR" => Ok(Self::Eur),
            "INR" => Ok(Self::Inr),
            _ => Err(format!("Unknown currency: {}", s)),
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Person label attached to expenses (payer) and savings entries (saver)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Person {
    Husband,
    Wife,
}

impl Person {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Husband => "Husband",
            Self::Wife => "Wife",
        }
    }

    pub const ALL: [Person; 2] = [Person::Husband, Person::Wife];
}

impl std::str::FromStr for Person {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "husband" => Ok(Self::Husband),
            "wife" => Ok(Self::Wife),
            _ => Err(format!("Unknown person: {}", s)),
        }
    }
}

impl std::fmt::Display for Person {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where an income came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IncomeSource {
    Husband,
    Wife,
    Other,
}

impl IncomeSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Husband => "Husband",
            Self::Wife => "Wife",
            Self::Other => "Other",
        }
    }
}

impl std::str::FromStr for IncomeSource {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "husband" => Ok(Self::Husband),
            "wife" => Ok(Self::Wife),
            "other" => Ok(Self::Other),
            _ => Err(format!("Unknown income source: {}", s)),
        }
    }
}

impl std::fmt::Display for IncomeSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Transaction kind
///
/// The kind determines which optional fields are meaningful:
/// `category`/`payer` for expenses, `saver` for savings movements,
/// `liability_id` for liability payments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransactionKind {
    Expense,
    Savings,
    SavingsWithdrawal,
    LiabilityPayment,
    /// Initial savings balance entered at setup time; counts toward
    /// savings/net worth but not toward monthly cash flow
    OpeningBalance,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Savings => "savings",
            Self::SavingsWithdrawal => "savingsWithdrawal",
            Self::LiabilityPayment => "liabilityPayment",
            Self::OpeningBalance => "openingBalance",
        }
    }
}

impl std::str::FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "expense" => Ok(Self::Expense),
            "savings" => Ok(Self::Savings),
            "savingsWithdrawal" => Ok(Self::SavingsWithdrawal),
            "liabilityPayment" => Ok(Self::LiabilityPayment),
            "openingBalance" => Ok(Self::OpeningBalance),
            _ => Err(format!("Unknown transaction kind: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A ledger transaction (expense, savings movement, liability payment,
/// or opening balance)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub user_id: String,
    pub date: NaiveDate,
    pub kind: TransactionKind,
    /// Always positive; the kind carries the direction
    pub amount: f64,
    pub currency: Currency,
    pub category: Option<String>,
    pub payer: Option<Person>,
    pub saver: Option<Person>,
    /// Liability this payment reduces (liabilityPayment only)
    pub liability_id: Option<i64>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A new transaction to be appended (before store insertion)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub kind: TransactionKind,
    pub amount: f64,
    pub currency: Currency,
    pub category: Option<String>,
    pub payer: Option<Person>,
    pub saver: Option<Person>,
    pub liability_id: Option<i64>,
    pub description: Option<String>,
    /// Hash for CSV-import deduplication
    pub import_hash: Option<String>,
}

/// An income entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Income {
    pub id: i64,
    pub user_id: String,
    pub date: NaiveDate,
    pub amount: f64,
    pub currency: Currency,
    pub source: IncomeSource,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A new income to be appended (before store insertion)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewIncome {
    pub date: NaiveDate,
    pub amount: f64,
    pub currency: Currency,
    pub source: IncomeSource,
    pub description: Option<String>,
    /// Hash for CSV-import deduplication
    pub import_hash: Option<String>,
}

/// A liability (loan, credit line)
///
/// The outstanding balance is derived: `total_amount` minus the sum of
/// liabilityPayment transactions referencing this id. Overpayment yields
/// a negative balance; it is never clamped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Liability {
    pub id: i64,
    pub user_id: String,
    pub name: String,
    pub total_amount: f64,
    pub currency: Currency,
    pub created_at: DateTime<Utc>,
}

/// An asset (property, deposit, vehicle)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    pub id: i64,
    pub user_id: String,
    pub name: String,
    pub value: f64,
    pub currency: Currency,
    pub created_at: DateTime<Utc>,
}

/// Recurrence frequency for templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Monthly,
    Yearly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

impl std::str::FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            _ => Err(format!("Unknown frequency: {}", s)),
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Transaction-shaped recurring payload (no date; the materializer fills it in)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionTemplate {
    pub kind: TransactionKind,
    pub amount: f64,
    pub currency: Currency,
    pub category: Option<String>,
    pub payer: Option<Person>,
    pub saver: Option<Person>,
    pub liability_id: Option<i64>,
    pub description: Option<String>,
}

/// Income-shaped recurring payload (no date)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeTemplate {
    pub amount: f64,
    pub currency: Currency,
    pub source: IncomeSource,
    pub description: Option<String>,
}

/// The embedded payload of a recurring template
///
/// Determines which collection materialized occurrences land in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TemplateDetails {
    #[serde(rename = "expense")]
    Transaction(TransactionTemplate),
    Income(IncomeTemplate),
}

impl TemplateDetails {
    /// Short label for listings ("expense" or "income")
    pub fn kind_str(&self) -> &'static str {
        match self {
            Self::Transaction(_) => "expense",
            Self::Income(_) => "income",
        }
    }

    pub fn amount(&self) -> f64 {
        match self {
            Self::Transaction(t) => t.amount,
            Self::Income(i) => i.amount,
        }
    }

    pub fn currency(&self) -> Currency {
        match self {
            Self::Transaction(t) => t.currency,
            Self::Income(i) => i.currency,
        }
    }
}

/// A recurring entry template
///
/// `last_processed` is the materialization cursor: the date of the last
/// occurrence that has been turned into a concrete document. It only ever
/// advances. A null cursor means nothing past `start_date` has been
/// materialized yet; the start date itself is represented by the entry the
/// user created alongside the template and is never re-materialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurringTemplate {
    pub id: i64,
    pub user_id: String,
    pub frequency: Frequency,
    pub start_date: NaiveDate,
    pub last_processed: Option<NaiveDate>,
    pub details: TemplateDetails,
    pub created_at: DateTime<Utc>,
}

/// A new recurring template (before store insertion)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRecurringTemplate {
    pub frequency: Frequency,
    pub start_date: NaiveDate,
    pub details: TemplateDetails,
}
