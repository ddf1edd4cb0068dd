//! CSV statement import
//!
//! Parses bank statements into draft entries the user reviews before
//! committing. Each draft gets a typed guess from the debit/credit side
//! (debit means expense, credit means income) which the user can flip
//! before commit. Committed drafts carry a content hash so importing the
//! same statement twice skips rows already in the ledger.

use chrono::NaiveDate;
use csv::ReaderBuilder;
use sha2::{Digest, Sha256};
use std::io::Read;
use tracing::debug;

use crate::db::Database;
use crate::error::{Error, Result};
use crate::models::{Currency, IncomeSource, NewIncome, NewTransaction, TransactionKind};

/// CSV layouts the importer understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementFormat {
    /// Bank statement: Date(DD/MM/YYYY), Description, Debit, Credit
    BankDebitCredit,
    /// Hearth's own export: Date, Type, Description, Category/Source, Amount, Currency, Payer/Saver
    HearthExport,
}

/// What a draft will become on commit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftKind {
    Expense,
    Income,
}

/// A parsed statement row awaiting user review
#[derive(Debug, Clone)]
pub struct DraftEntry {
    pub date: NaiveDate,
    pub description: String,
    /// Always positive; `kind` carries the direction
    pub amount: f64,
    pub currency: Currency,
    pub kind: DraftKind,
    pub import_hash: String,
}

/// Detect the statement layout from the CSV header line
///
/// Returns None if the header matches neither known layout.
pub fn detect_statement_format(header: &str) -> Option<StatementFormat> {
    let header = header.trim().trim_start_matches('\u{feff}');

    if header.starts_with("Date,Type,Description") {
        return Some(StatementFormat::HearthExport);
    }

    // Bank layout: "Date,Description,Debit,Credit" (extra trailing columns allowed)
    if header.starts_with("Date,Description,Debit,Credit") {
        return Some(StatementFormat::BankDebitCredit);
    }

    None
}

/// Generate a unique hash for deduplication
fn generate_hash(date: &NaiveDate, description: &str, amount: f64) -> String {
    let mut hasher = Sha256::new();
    hasher.update(date.to_string().as_bytes());
    hasher.update(description.as_bytes());
    hasher.update(amount.to_be_bytes());
    hex::encode(hasher.finalize())
}

/// Parse statement CSV into draft entries, detecting the layout from the header
pub fn parse_statement<R: Read>(mut reader: R) -> Result<Vec<DraftEntry>> {
    let mut data = String::new();
    reader.read_to_string(&mut data)?;

    let header = data
        .lines()
        .next()
        .ok_or_else(|| Error::Import("Empty statement file".to_string()))?;
    let format = detect_statement_format(header)
        .ok_or_else(|| Error::UnsupportedStatement(header.to_string()))?;

    match format {
        StatementFormat::BankDebitCredit => parse_bank(data.as_bytes()),
        StatementFormat::HearthExport => parse_hearth_export(data.as_bytes()),
    }
}

/// Parse the bank layout: Date(DD/MM/YYYY), Description, Debit, Credit
///
/// Rows with no parseable date or no positive amount are dropped silently;
/// partial statement exports routinely contain such filler lines.
fn parse_bank<R: Read>(reader: R) -> Result<Vec<DraftEntry>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut drafts = Vec::new();
    let mut dropped = 0usize;

    for result in rdr.records() {
        let record = result?;

        let date = record.get(0).and_then(|s| parse_date(s).ok());
        let debit = record.get(2).and_then(|s| parse_amount(s).ok());
        let credit = record.get(3).and_then(|s| parse_amount(s).ok());

        let (date, amount, kind) = match (date, debit, credit) {
            (Some(d), Some(a), _) if a > 0.0 => (d, a, DraftKind::Expense),
            (Some(d), _, Some(a)) if a > 0.0 => (d, a, DraftKind::Income),
            _ => {
                dropped += 1;
                continue;
            }
        };

        let description = record.get(1).unwrap_or("").trim().to_string();
        let import_hash = generate_hash(&date, &description, amount);

        drafts.push(DraftEntry {
            date,
            description,
            amount,
            currency: Currency::Eur,
            kind,
            import_hash,
        });
    }

    debug!(
        parsed = drafts.len(),
        dropped, "Parsed bank statement rows"
    );
    Ok(drafts)
}

/// Parse Hearth's own export layout back into drafts
///
/// The round trip is lossy on purpose: specialized kinds (savings,
/// liability payments, opening balances) come back as the side they would
/// show on a statement, which for re-import means plain expense drafts.
fn parse_hearth_export<R: Read>(reader: R) -> Result<Vec<DraftEntry>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut drafts = Vec::new();
    let mut dropped = 0usize;

    for result in rdr.records() {
        let record = result?;

        let date = record.get(0).and_then(|s| parse_date(s).ok());
        let amount = record.get(4).and_then(|s| parse_amount(s).ok());

        let (date, amount) = match (date, amount) {
            (Some(d), Some(a)) if a > 0.0 => (d, a),
            _ => {
                dropped += 1;
                continue;
            }
        };

        let kind = match record.get(1).map(str::trim) {
            Some("income") => DraftKind::Income,
            _ => DraftKind::Expense,
        };
        let description = record.get(2).unwrap_or("").trim().to_string();
        let currency = record
            .get(5)
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(Currency::Eur);
        let import_hash = generate_hash(&date, &description, amount);

        drafts.push(DraftEntry {
            date,
            description,
            amount,
            currency,
            kind,
            import_hash,
        });
    }

    debug!(parsed = drafts.len(), dropped, "Parsed export rows");
    Ok(drafts)
}

/// Outcome of committing drafts to the ledger
#[derive(Debug, Clone, Default)]
pub struct ImportOutcome {
    pub imported: usize,
    /// Rows whose hash already existed
    pub skipped: usize,
}

/// Commit reviewed drafts to the ledger
///
/// Expense drafts become uncategorized expense transactions; income drafts
/// become incomes with source Other. Duplicate hashes are skipped, not
/// errors.
pub fn commit_drafts(db: &Database, user_id: &str, drafts: &[DraftEntry]) -> Result<ImportOutcome> {
    let mut outcome = ImportOutcome::default();

    for draft in drafts {
        let inserted = match draft.kind {
            DraftKind::Expense => db.insert_transaction(
                user_id,
                &NewTransaction {
                    date: draft.date,
                    kind: TransactionKind::Expense,
                    amount: draft.amount,
                    currency: draft.currency,
                    category: None,
                    payer: None,
                    saver: None,
                    liability_id: None,
                    description: Some(draft.description.clone()),
                    import_hash: Some(draft.import_hash.clone()),
                },
            )?,
            DraftKind::Income => db.insert_income(
                user_id,
                &NewIncome {
                    date: draft.date,
                    amount: draft.amount,
                    currency: draft.currency,
                    source: IncomeSource::Other,
                    description: Some(draft.description.clone()),
                    import_hash: Some(draft.import_hash.clone()),
                },
            )?,
        };

        match inserted {
            Some(_) => outcome.imported += 1,
            None => outcome.skipped += 1,
        }
    }

    debug!(
        imported = outcome.imported,
        skipped = outcome.skipped,
        "Import commit complete"
    );
    Ok(outcome)
}

/// Parse a date string in the formats statements use
fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();

    let formats = [
        "%d/%m/%Y", // 15/01/2024 (bank statements)
        "%Y-%m-%d", // 2024-01-15 (Hearth exports)
        "%d/%m/%y", // 15/01/24
    ];

    for fmt in formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(date);
        }
    }

    Err(Error::Import(format!("Unable to parse date: {}", s)))
}

/// Parse an amount string, handling currency symbols and thousands separators
fn parse_amount(s: &str) -> Result<f64> {
    let cleaned: String = s.trim().replace(['€', '₹', ',', ' '], "");
    if cleaned.is_empty() {
        return Err(Error::Import("Empty amount".to_string()));
    }

    cleaned
        .parse::<f64>()
        .map_err(|_| Error::Import(format!("Unable to parse amount: {}", s)))
}
