//! CSV export of the full ledger
//!
//! One row per transaction and income, merged and sorted by date. Every
//! field is double-quoted with internal quotes doubled, so descriptions
//! containing commas or quotes survive a round trip through the importer.

use chrono::NaiveDate;

use crate::models::{Income, Transaction};

const HEADER: &str = "Date,Type,Description,Category/Source,Amount,Currency,Payer/Saver";

/// Quote a field for CSV output (always quoted, internal quotes doubled)
fn escape_csv_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn format_row(fields: &[&str]) -> String {
    fields
        .iter()
        .map(|f| escape_csv_field(f))
        .collect::<Vec<_>>()
        .join(",")
}

fn transaction_row(tx: &Transaction) -> String {
    let person = tx
        .payer
        .or(tx.saver)
        .map(|p| p.as_str().to_string())
        .unwrap_or_default();
    format_row(&[
        &tx.date.to_string(),
        tx.kind.as_str(),
        tx.description.as_deref().unwrap_or(""),
        tx.category.as_deref().unwrap_or(""),
        &format!("{:.2}", tx.amount),
        tx.currency.as_str(),
        &person,
    ])
}

fn income_row(income: &Income) -> String {
    format_row(&[
        &income.date.to_string(),
        "income",
        income.description.as_deref().unwrap_or(""),
        income.source.as_str(),
        &format!("{:.2}", income.amount),
        income.currency.as_str(),
        "",
    ])
}

/// Render the full ledger as CSV
pub fn export_csv(transactions: &[Transaction], incomes: &[Income]) -> String {
    let mut rows: Vec<(NaiveDate, String)> = transactions
        .iter()
        .map(|tx| (tx.date, transaction_row(tx)))
        .chain(incomes.iter().map(|i| (i.date, income_row(i))))
        .collect();
    rows.sort_by_key(|(date, _)| *date);

    let mut out = String::from(HEADER);
    out.push('\n');
    for (_, row) in rows {
        out.push_str(&row);
        out.push('\n');
    }
    out
}
