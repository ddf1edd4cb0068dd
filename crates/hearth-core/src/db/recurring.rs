//! Recurring entry templates

use chrono::NaiveDate;
use rusqlite::{params, Connection};

use super::{parse_datetime, Database};
use crate::dispatch::Collection;
use crate::error::{Error, Result};
use crate::models::{Frequency, NewRecurringTemplate, RecurringTemplate, TemplateDetails};

/// Advance the materialization cursor within an existing SQLite transaction
///
/// The cursor is monotonic: an update that would move it backwards is a no-op.
pub(super) fn advance_cursor_in(
    conn: &Connection,
    user_id: &str,
    template_id: i64,
    cursor: NaiveDate,
) -> Result<()> {
    let affected = conn.execute(
        r#"
        UPDATE recurring_templates
        SET last_processed = ?
        WHERE user_id = ? AND id = ?
          AND (last_processed IS NULL OR last_processed < ?)
        "#,
        params![cursor.to_string(), user_id, template_id, cursor.to_string()],
    )?;

    if affected == 0 {
        // Distinguish a missing template from a backwards cursor
        let exists: i64 = conn.query_row(
            "SELECT COUNT(*) FROM recurring_templates WHERE user_id = ? AND id = ?",
            params![user_id, template_id],
            |row| row.get(0),
        )?;
        if exists == 0 {
            return Err(Error::NotFound(format!("Recurring template {}", template_id)));
        }
    }
    Ok(())
}

impl Database {
    fn row_to_template(row: &rusqlite::Row) -> rusqlite::Result<RecurringTemplate> {
        let frequency_str: String = row.get(2)?;
        let start_date_str: String = row.get(3)?;
        let last_processed_str: Option<String> = row.get(4)?;
        let details_json: String = row.get(5)?;
        let created_at_str: String = row.get(6)?;

        let details: TemplateDetails = serde_json::from_str(&details_json).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                5,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })?;

        Ok(RecurringTemplate {
            id: row.get(0)?,
            user_id: row.get(1)?,
            frequency: frequency_str.parse().unwrap_or(Frequency::Monthly),
            start_date: NaiveDate::parse_from_str(&start_date_str, "%Y-%m-%d").unwrap_or_default(),
            last_processed: last_processed_str
                .and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()),
            details,
            created_at: parse_datetime(&created_at_str),
        })
    }

    /// Add a recurring template
    pub fn add_recurring(&self, user_id: &str, template: &NewRecurringTemplate) -> Result<i64> {
        if template.details.amount() <= 0.0 || !template.details.amount().is_finite() {
            return Err(Error::InvalidData(format!(
                "Template amount must be positive, got {}",
                template.details.amount()
            )));
        }

        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO recurring_templates (user_id, frequency, start_date, details)
            VALUES (?, ?, ?, ?)
            "#,
            params![
                user_id,
                template.frequency.as_str(),
                template.start_date.to_string(),
                serde_json::to_string(&template.details)?,
            ],
        )?;
        let id = conn.last_insert_rowid();
        self.notify(Collection::Recurring);
        Ok(id)
    }

    /// List recurring templates for a user
    pub fn list_recurring(&self, user_id: &str) -> Result<Vec<RecurringTemplate>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, user_id, frequency, start_date, last_processed, details, created_at
            FROM recurring_templates
            WHERE user_id = ?
            ORDER BY id
            "#,
        )?;

        let templates = stmt
            .query_map(params![user_id], |row| Self::row_to_template(row))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(templates)
    }

    /// Delete a recurring template
    ///
    /// Occurrences already materialized stay in the ledger.
    pub fn delete_recurring(&self, user_id: &str, id: i64) -> Result<()> {
        let conn = self.conn()?;
        let affected = conn.execute(
            "DELETE FROM recurring_templates WHERE user_id = ? AND id = ?",
            params![user_id, id],
        )?;
        if affected == 0 {
            return Err(Error::NotFound(format!("Recurring template {}", id)));
        }
        self.notify(Collection::Recurring);
        Ok(())
    }
}
