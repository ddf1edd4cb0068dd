//! Session context
//!
//! Explicit value threaded through report and materialization call sites:
//! the acting user, the month being viewed, and the session's exchange
//! rates. Nothing here is ambient or global.

use chrono::{Datelike, NaiveDate};

use crate::rates::CurrencyRates;

#[derive(Debug, Clone)]
pub struct SessionContext {
    pub user_id: String,
    /// Year of the month under view
    pub year: i32,
    /// Month under view (1-12)
    pub month: u32,
    pub rates: CurrencyRates,
}

impl SessionContext {
    /// Context viewing the month containing `today`
    pub fn new(user_id: &str, today: NaiveDate, rates: CurrencyRates) -> Self {
        Self {
            user_id: user_id.to_string(),
            year: today.year(),
            month: today.month(),
            rates,
        }
    }

    /// Same context viewing another month
    pub fn with_month(mut self, year: i32, month: u32) -> Self {
        self.year = year;
        self.month = month;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_current_month() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 17).unwrap();
        let ctx = SessionContext::new("husband", today, CurrencyRates::fallback());
        assert_eq!((ctx.year, ctx.month), (2024, 3));

        let ctx = ctx.with_month(2023, 12);
        assert_eq!((ctx.year, ctx.month), (2023, 12));
    }
}
