//! Transaction operations

use rusqlite::{params, Connection, OptionalExtension};

use super::{parse_datetime, Database};
use crate::dispatch::Collection;
use crate::error::{Error, Result};
use crate::models::{Currency, NewTransaction, Transaction, TransactionKind};

fn validate(tx: &NewTransaction) -> Result<()> {
    if !tx.amount.is_finite() || tx.amount <= 0.0 {
        return Err(Error::InvalidData(format!(
            "Transaction amount must be positive, got {}",
            tx.amount
        )));
    }
    if tx.kind == TransactionKind::LiabilityPayment && tx.liability_id.is_none() {
        return Err(Error::InvalidData(
            "Liability payments must reference a liability".to_string(),
        ));
    }
    Ok(())
}

/// Insert within an existing SQLite transaction or plain connection
///
/// Returns `None` when the import hash matched an existing row for this user.
pub(super) fn insert_in(
    conn: &Connection,
    user_id: &str,
    tx: &NewTransaction,
) -> Result<Option<i64>> {
    validate(tx)?;

    if let Some(hash) = &tx.import_hash {
        let existing: Option<i64> = conn
            .query_row(
                "SELECT id FROM transactions WHERE user_id = ? AND import_hash = ?",
                params![user_id, hash],
                |row| row.get(0),
            )
            .optional()?;
        if existing.is_some() {
            return Ok(None);
        }
    }

    conn.execute(
        r#"
        INSERT INTO transactions (user_id, date, kind, amount, currency, category, payer, saver, liability_id, description, import_hash)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
        params![
            user_id,
            tx.date.to_string(),
            tx.kind.as_str(),
            tx.amount,
            tx.currency.as_str(),
            tx.category,
            tx.payer.map(|p| p.as_str()),
            tx.saver.map(|p| p.as_str()),
            tx.liability_id,
            tx.description,
            tx.import_hash,
        ],
    )?;

    Ok(Some(conn.last_insert_rowid()))
}

impl Database {
    pub(crate) fn row_to_transaction(row: &rusqlite::Row) -> rusqlite::Result<Transaction> {
        let date_str: String = row.get(2)?;
        let kind_str: String = row.get(3)?;
        let currency_str: String = row.get(5)?;
        let payer_str: Option<String> = row.get(7)?;
        let saver_str: Option<String> = row.get(8)?;
        let created_at_str: String = row.get(11)?;
        Ok(Transaction {
            id: row.get(0)?,
            user_id: row.get(1)?,
            date: chrono::NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").unwrap_or_default(),
            kind: kind_str.parse().unwrap_or(TransactionKind::Expense),
            amount: row.get(4)?,
            currency: currency_str.parse().unwrap_or(Currency::Eur),
            category: row.get(6)?,
            payer: payer_str.and_then(|s| s.parse().ok()),
            saver: saver_str.and_then(|s| s.parse().ok()),
            liability_id: row.get(9)?,
            description: row.get(10)?,
            created_at: parse_datetime(&created_at_str),
        })
    }

    /// Insert a transaction (skips duplicates based on import_hash)
    ///
    /// Returns `None` when an identical import hash already exists for this user.
    pub fn insert_transaction(&self, user_id: &str, tx: &NewTransaction) -> Result<Option<i64>> {
        let conn = self.conn()?;
        let id = insert_in(&conn, user_id, tx)?;
        if id.is_some() {
            self.notify(Collection::Transactions);
        }
        Ok(id)
    }

    /// List all transactions for a user, ordered by date then insertion order
    pub fn list_transactions(&self, user_id: &str) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, user_id, date, kind, amount, currency, category, payer, saver, liability_id, description, created_at
            FROM transactions
            WHERE user_id = ?
            ORDER BY date, id
            "#,
        )?;

        let transactions = stmt
            .query_map(params![user_id], |row| Self::row_to_transaction(row))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(transactions)
    }

    /// Get a single transaction by ID
    pub fn get_transaction(&self, user_id: &str, id: i64) -> Result<Option<Transaction>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, user_id, date, kind, amount, currency, category, payer, saver, liability_id, description, created_at
            FROM transactions
            WHERE user_id = ? AND id = ?
            "#,
        )?;

        let tx = stmt
            .query_row(params![user_id, id], |row| Self::row_to_transaction(row))
            .optional()?;

        Ok(tx)
    }

    /// Delete a transaction by id
    pub fn delete_transaction(&self, user_id: &str, id: i64) -> Result<()> {
        let conn = self.conn()?;
        let affected = conn.execute(
            "DELETE FROM transactions WHERE user_id = ? AND id = ?",
            params![user_id, id],
        )?;
        if affected == 0 {
            return Err(Error::NotFound(format!("Transaction {}", id)));
        }
        self.notify(Collection::Transactions);
        Ok(())
    }
}
