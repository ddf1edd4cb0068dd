//! Expense category list
//!
//! Categories are a per-user ordered list of names. Ordering is the
//! insertion order; reports and pickers present categories in this order.

use rusqlite::params;

use super::Database;
use crate::dispatch::Collection;
use crate::error::{Error, Result};

impl Database {
    /// Append a category to the user's list
    ///
    /// Duplicate names are rejected.
    pub fn add_category(&self, user_id: &str, name: &str) -> Result<i64> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidData("Category name cannot be empty".to_string()));
        }

        let conn = self.conn()?;
        let next_position: i64 = conn.query_row(
            "SELECT COALESCE(MAX(position), -1) + 1 FROM categories WHERE user_id = ?",
            params![user_id],
            |row| row.get(0),
        )?;

        let inserted = conn.execute(
            "INSERT OR IGNORE INTO categories (user_id, name, position) VALUES (?, ?, ?)",
            params![user_id, name, next_position],
        )?;
        if inserted == 0 {
            return Err(Error::InvalidData(format!(
                "Category '{}' already exists",
                name
            )));
        }

        let id = conn.last_insert_rowid();
        self.notify(Collection::Categories);
        Ok(id)
    }

    /// Seed the starter category list for a new user
    ///
    /// Skips names the user already has, so re-running init is safe.
    pub fn seed_default_categories(&self, user_id: &str) -> Result<usize> {
        const DEFAULTS: [&str; 8] = [
            "Groceries",
            "Rent",
            "Utilities",
            "Transport",
            "Dining",
            "Health",
            "Entertainment",
            "Family Support",
        ];

        let existing = self.list_categories(user_id)?;
        let mut added = 0;
        for name in DEFAULTS {
            if !existing.iter().any(|c| c == name) {
                self.add_category(user_id, name)?;
                added += 1;
            }
        }
        Ok(added)
    }

    /// List category names in display order
    pub fn list_categories(&self, user_id: &str) -> Result<Vec<String>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT name FROM categories WHERE user_id = ? ORDER BY position",
        )?;

        let names = stmt
            .query_map(params![user_id], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;

        Ok(names)
    }

    /// Remove a category by name
    ///
    /// Existing transactions keep their category label; only the picker
    /// list loses the entry.
    pub fn delete_category(&self, user_id: &str, name: &str) -> Result<()> {
        let conn = self.conn()?;
        let affected = conn.execute(
            "DELETE FROM categories WHERE user_id = ? AND name = ?",
            params![user_id, name],
        )?;
        if affected == 0 {
            return Err(Error::NotFound(format!("Category '{}'", name)));
        }
        self.notify(Collection::Categories);
        Ok(())
    }
}
