//! Monthly category budgets
//!
//! Budgets are keyed by (user, year, month, category) and hold an EUR
//! amount. Setting a budget overwrites any previous value for the key;
//! setting zero keeps the row (a zero budget is "tracked but unbudgeted").

use std::collections::BTreeMap;

use rusqlite::params;

use super::Database;
use crate::dispatch::Collection;
use crate::error::{Error, Result};

impl Database {
    /// Set (or overwrite) the budget for one category in one month
    pub fn set_budget(
        &self,
        user_id: &str,
        year: i32,
        month: u32,
        category: &str,
        amount: f64,
    ) -> Result<()> {
        if !(1..=12).contains(&month) {
            return Err(Error::InvalidData(format!("Invalid month: {}", month)));
        }
        if !amount.is_finite() || amount < 0.0 {
            return Err(Error::InvalidData(format!(
                "Budget amount must be non-negative, got {}",
                amount
            )));
        }

        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO budgets (user_id, year, month, category, amount)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(user_id, year, month, category) DO UPDATE SET amount = excluded.amount
            "#,
            params![user_id, year, month, category, amount],
        )?;
        self.notify(Collection::Budgets);
        Ok(())
    }

    /// Remove the budget row for one category in one month
    pub fn delete_budget(&self, user_id: &str, year: i32, month: u32, category: &str) -> Result<()> {
        let conn = self.conn()?;
        let affected = conn.execute(
            "DELETE FROM budgets WHERE user_id = ? AND year = ? AND month = ? AND category = ?",
            params![user_id, year, month, category],
        )?;
        if affected == 0 {
            return Err(Error::NotFound(format!(
                "Budget for '{}' in {}-{:02}",
                category, year, month
            )));
        }
        self.notify(Collection::Budgets);
        Ok(())
    }

    /// Budgets for one month, keyed by category
    pub fn get_budgets(&self, user_id: &str, year: i32, month: u32) -> Result<BTreeMap<String, f64>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT category, amount FROM budgets WHERE user_id = ? AND year = ? AND month = ?",
        )?;

        let rows = stmt.query_map(params![user_id, year, month], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?))
        })?;

        let mut budgets = BTreeMap::new();
        for row in rows {
            let (category, amount) = row?;
            budgets.insert(category, amount);
        }
        Ok(budgets)
    }
}
