//! Liability and asset operations

use rusqlite::params;

use super::{parse_datetime, Database};
use crate::dispatch::Collection;
use crate::error::{Error, Result};
use crate::models::{Asset, Currency, Liability};

impl Database {
    /// Add a liability (loan, credit line)
    pub fn add_liability(
        &self,
        user_id: &str,
        name: &str,
        total_amount: f64,
        currency: Currency,
    ) -> Result<i64> {
        if !total_amount.is_finite() || total_amount <= 0.0 {
            return Err(Error::InvalidData(format!(
                "Liability total must be positive, got {}",
                total_amount
            )));
        }

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO liabilities (user_id, name, total_amount, currency) VALUES (?, ?, ?, ?)",
            params![user_id, name, total_amount, currency.as_str()],
        )?;
        let id = conn.last_insert_rowid();
        self.notify(Collection::Liabilities);
        Ok(id)
    }

    /// List liabilities for a user
    pub fn list_liabilities(&self, user_id: &str) -> Result<Vec<Liability>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, user_id, name, total_amount, currency, created_at
             FROM liabilities WHERE user_id = ? ORDER BY id",
        )?;

        let liabilities = stmt
            .query_map(params![user_id], |row| {
                let currency_str: String = row.get(4)?;
                let created_at_str: String = row.get(5)?;
                Ok(Liability {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    name: row.get(2)?,
                    total_amount: row.get(3)?,
                    currency: currency_str.parse().unwrap_or(Currency::Eur),
                    created_at: parse_datetime(&created_at_str),
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(liabilities)
    }

    /// Add an asset (property, deposit, vehicle)
    pub fn add_asset(
        &self,
        user_id: &str,
        name: &str,
        value: f64,
        currency: Currency,
    ) -> Result<i64> {
        if !value.is_finite() || value <= 0.0 {
            return Err(Error::InvalidData(format!(
                "Asset value must be positive, got {}",
                value
            )));
        }

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO assets (user_id, name, value, currency) VALUES (?, ?, ?, ?)",
            params![user_id, name, value, currency.as_str()],
        )?;
        let id = conn.last_insert_rowid();
        self.notify(Collection::Assets);
        Ok(id)
    }

    /// List assets for a user
    pub fn list_assets(&self, user_id: &str) -> Result<Vec<Asset>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, user_id, name, value, currency, created_at
             FROM assets WHERE user_id = ? ORDER BY id",
        )?;

        let assets = stmt
            .query_map(params![user_id], |row| {
                let currency_str: String = row.get(4)?;
                let created_at_str: String = row.get(5)?;
                Ok(Asset {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    name: row.get(2)?,
                    value: row.get(3)?,
                    currency: currency_str.parse().unwrap_or(Currency::Eur),
                    created_at: parse_datetime(&created_at_str),
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(assets)
    }
}
