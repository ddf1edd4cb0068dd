//! Income operations

use rusqlite::{params, Connection, OptionalExtension};

use super::{parse_datetime, Database};
use crate::dispatch::Collection;
use crate::error::{Error, Result};
use crate::models::{Currency, Income, IncomeSource, NewIncome};

fn validate(income: &NewIncome) -> Result<()> {
    if !income.amount.is_finite() || income.amount <= 0.0 {
        return Err(Error::InvalidData(format!(
            "Income amount must be positive, got {}",
            income.amount
        )));
    }
    Ok(())
}

/// Insert within an existing SQLite transaction or plain connection
///
/// Returns `None` when the import hash matched an existing row for this user.
pub(super) fn insert_in(conn: &Connection, user_id: &str, income: &NewIncome) -> Result<Option<i64>> {
    validate(income)?;

    if let Some(hash) = &income.import_hash {
        let existing: Option<i64> = conn
            .query_row(
                "SELECT id FROM incomes WHERE user_id = ? AND import_hash = ?",
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
        INSERT INTO incomes (user_id, date, amount, currency, source, description, import_hash)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
        params![
            user_id,
            income.date.to_string(),
            income.amount,
            income.currency.as_str(),
            income.source.as_str(),
            income.description,
            income.import_hash,
        ],
    )?;

    Ok(Some(conn.last_insert_rowid()))
}

impl Database {
    fn row_to_income(row: &rusqlite::Row) -> rusqlite::Result<Income> {
        let date_str: String = row.get(2)?;
        let currency_str: String = row.get(4)?;
        let source_str: String = row.get(5)?;
        let created_at_str: String = row.get(7)?;
        Ok(Income {
            id: row.get(0)?,
            user_id: row.get(1)?,
            date: chrono::NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").unwrap_or_default(),
            amount: row.get(3)?,
            currency: currency_str.parse().unwrap_or(Currency::Eur),
            source: source_str.parse().unwrap_or(IncomeSource::Other),
            description: row.get(6)?,
            created_at: parse_datetime(&created_at_str),
        })
    }

    /// Insert an income (skips duplicates based on import_hash)
    pub fn insert_income(&self, user_id: &str, income: &NewIncome) -> Result<Option<i64>> {
        let conn = self.conn()?;
        let id = insert_in(&conn, user_id, income)?;
        if id.is_some() {
            self.notify(Collection::Incomes);
        }
        Ok(id)
    }

    /// List all incomes for a user, ordered by date then insertion order
    pub fn list_incomes(&self, user_id: &str) -> Result<Vec<Income>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, user_id, date, amount, currency, source, description, created_at
            FROM incomes
            WHERE user_id = ?
            ORDER BY date, id
            "#,
        )?;

        let incomes = stmt
            .query_map(params![user_id], |row| Self::row_to_income(row))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(incomes)
    }

    /// Delete an income by id
    pub fn delete_income(&self, user_id: &str, id: i64) -> Result<()> {
        let conn = self.conn()?;
        let affected = conn.execute(
            "DELETE FROM incomes WHERE user_id = ? AND id = ?",
            params![user_id, id],
        )?;
        if affected == 0 {
            return Err(Error::NotFound(format!("Income {}", id)));
        }
        self.notify(Collection::Incomes);
        Ok(())
    }
}
