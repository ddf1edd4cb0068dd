//! Recurring entry materialization
//!
//! Turns recurring templates into concrete ledger entries. The cursor
//! (`last_processed`) names the last occurrence already materialized; each
//! run walks forward from it, one period at a time, creating every
//! occurrence that falls strictly before today. The start date itself is
//! never materialized: it belongs to the entry the user created alongside
//! the template. All created entries and cursor advances commit in one
//! store transaction, so a crash mid-run never double-creates.

use chrono::{Datelike, NaiveDate};
use tracing::{debug, info};

use crate::db::{Database, StoreOp};
use crate::error::Result;
use crate::models::{Frequency, NewIncome, NewTransaction, RecurringTemplate, TemplateDetails};

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if (year % 4 == 0 && year % 100 != 0) || year % 400 == 0 {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

/// One period after `date`, anchored on the template's day-of-month
///
/// A January 31st monthly template lands on Feb 28th (29th in leap years)
/// and returns to the 31st in March; the anchor day is remembered, not
/// the clamped day. Yearly templates clamp only Feb 29th starts.
fn advance(date: NaiveDate, anchor_day: u32, frequency: Frequency) -> Option<NaiveDate> {
    let (year, month) = match frequency {
        Frequency::Monthly => {
            if date.month() == 12 {
                (date.year() + 1, 1)
            } else {
                (date.year(), date.month() + 1)
            }
        }
        Frequency::Yearly => (date.year() + 1, date.month()),
    };

    let day = anchor_day.min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Lazy stream of not-yet-materialized occurrence dates for one template
///
/// Yields each occurrence strictly before `today`, oldest first, then stops.
pub struct DueDates {
    cursor: NaiveDate,
    anchor_day: u32,
    frequency: Frequency,
    today: NaiveDate,
}

impl DueDates {
    pub fn new(template: &RecurringTemplate, today: NaiveDate) -> Self {
        Self {
            cursor: template.last_processed.unwrap_or(template.start_date),
            anchor_day: template.start_date.day(),
            frequency: template.frequency,
            today,
        }
    }
}

impl Iterator for DueDates {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let next = advance(self.cursor, self.anchor_day, self.frequency)?;
        if next < self.today {
            self.cursor = next;
            Some(next)
        } else {
            None
        }
    }
}

/// Outcome of one materialization run
#[derive(Debug, Clone, Default)]
pub struct MaterializationOutcome {
    /// Entries created across all templates
    pub created: usize,
    /// Templates whose cursor advanced
    pub templates_advanced: usize,
}

fn entry_for(details: &TemplateDetails, date: NaiveDate) -> StoreOp {
    match details {
        TemplateDetails::Transaction(t) => StoreOp::InsertTransaction(NewTransaction {
            date,
            kind: t.kind,
            amount: t.amount,
            currency: t.currency,
            category: t.category.clone(),
            payer: t.payer,
            saver: t.saver,
            liability_id: t.liability_id,
            description: t.description.clone(),
            import_hash: None,
        }),
        TemplateDetails::Income(i) => StoreOp::InsertIncome(NewIncome {
            date,
            amount: i.amount,
            currency: i.currency,
            source: i.source,
            description: i.description.clone(),
            import_hash: None,
        }),
    }
}

/// Build the batch of writes one run would perform
///
/// Per template: one insert per due occurrence, then a single cursor
/// advance to the last occurrence. Templates with nothing due contribute
/// no operations, which makes repeat runs on the same day no-ops.
pub fn plan_materialization(
    templates: &[RecurringTemplate],
    today: NaiveDate,
) -> (Vec<StoreOp>, MaterializationOutcome) {
    let mut ops = Vec::new();
    let mut outcome = MaterializationOutcome::default();

    for template in templates {
        let due: Vec<NaiveDate> = DueDates::new(template, today).collect();
        if due.is_empty() {
            continue;
        }

        debug!(
            template_id = template.id,
            occurrences = due.len(),
            "Materializing recurring template"
        );

        let last = due[due.len() - 1];
        for date in &due {
            ops.push(entry_for(&template.details, *date));
            outcome.created += 1;
        }
        ops.push(StoreOp::AdvanceRecurringCursor {
            template_id: template.id,
            cursor: last,
        });
        outcome.templates_advanced += 1;
    }

    (ops, outcome)
}

/// Materialize every due occurrence for a user's templates
pub fn run_materialization(
    db: &Database,
    user_id: &str,
    today: NaiveDate,
) -> Result<MaterializationOutcome> {
    let templates = db.list_recurring(user_id)?;
    let (ops, outcome) = plan_materialization(&templates, today);

    if ops.is_empty() {
        return Ok(outcome);
    }

    db.batch_submit(user_id, &ops)?;
    info!(
        created = outcome.created,
        templates = outcome.templates_advanced,
        "Recurring materialization complete"
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Currency, IncomeSource, IncomeTemplate, TransactionKind, TransactionTemplate};
    use chrono::Utc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn monthly_expense(start: NaiveDate, last_processed: Option<NaiveDate>) -> RecurringTemplate {
        RecurringTemplate {
            id: 1,
            user_id: "husband".to_string(),
            frequency: Frequency::Monthly,
            start_date: start,
            last_processed,
            details: TemplateDetails::Transaction(TransactionTemplate {
                kind: TransactionKind::Expense,
                amount: 1200.0,
                currency: Currency::Eur,
                category: Some("Rent".to_string()),
                payer: None,
                saver: None,
                liability_id: None,
                description: Some("Rent".to_string()),
            }),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn monthly_template_yields_each_month_before_today() {
        let template = monthly_expense(date(2024, 1, 15), None);
        let due: Vec<NaiveDate> = DueDates::new(&template, date(2024, 5, 1)).collect();
        assert_eq!(
            due,
            vec![date(2024, 2, 15), date(2024, 3, 15), date(2024, 4, 15)]
        );
    }

    #[test]
    fn start_date_itself_is_never_due() {
        let template = monthly_expense(date(2024, 1, 15), None);
        let due: Vec<NaiveDate> = DueDates::new(&template, date(2024, 2, 1)).collect();
        assert!(due.is_empty());
    }

    #[test]
    fn occurrence_on_today_is_not_due() {
        let template = monthly_expense(date(2024, 1, 15), None);
        let due: Vec<NaiveDate> = DueDates::new(&template, date(2024, 2, 15)).collect();
        assert!(due.is_empty());

        let due: Vec<NaiveDate> = DueDates::new(&template, date(2024, 2, 16)).collect();
        assert_eq!(due, vec![date(2024, 2, 15)]);
    }

    #[test]
    fn end_of_month_anchor_clamps_and_recovers() {
        let template = monthly_expense(date(2024, 1, 31), None);
        let due: Vec<NaiveDate> = DueDates::new(&template, date(2024, 5, 1)).collect();
        // 2024 is a leap year: Feb 29, then back to the 31st
        assert_eq!(
            due,
            vec![date(2024, 2, 29), date(2024, 3, 31), date(2024, 4, 30)]
        );
    }

    #[test]
    fn end_of_month_anchor_in_common_year() {
        let template = monthly_expense(date(2023, 1, 31), None);
        let due: Vec<NaiveDate> = DueDates::new(&template, date(2023, 4, 1)).collect();
        assert_eq!(due, vec![date(2023, 2, 28), date(2023, 3, 31)]);
    }

    #[test]
    fn resumes_from_cursor_not_start() {
        let template = monthly_expense(date(2024, 1, 15), Some(date(2024, 3, 15)));
        let due: Vec<NaiveDate> = DueDates::new(&template, date(2024, 6, 1)).collect();
        assert_eq!(due, vec![date(2024, 4, 15), date(2024, 5, 15)]);
    }

    #[test]
    fn yearly_template_advances_by_year() {
        let mut template = monthly_expense(date(2022, 6, 10), None);
        template.frequency = Frequency::Yearly;
        let due: Vec<NaiveDate> = DueDates::new(&template, date(2024, 7, 1)).collect();
        assert_eq!(due, vec![date(2023, 6, 10), date(2024, 6, 10)]);
    }

    #[test]
    fn yearly_leap_day_start_clamps_in_common_years() {
        let mut template = monthly_expense(date(2024, 2, 29), None);
        template.frequency = Frequency::Yearly;
        let due: Vec<NaiveDate> = DueDates::new(&template, date(2026, 3, 1)).collect();
        assert_eq!(due, vec![date(2025, 2, 28), date(2026, 2, 28)]);
    }

    #[test]
    fn plan_emits_single_cursor_advance_per_template() {
        let template = monthly_expense(date(2024, 1, 15), None);
        let (ops, outcome) = plan_materialization(&[template], date(2024, 5, 1));

        assert_eq!(outcome.created, 3);
        assert_eq!(outcome.templates_advanced, 1);
        assert_eq!(ops.len(), 4);

        let cursors: Vec<_> = ops
            .iter()
            .filter_map(|op| match op {
                StoreOp::AdvanceRecurringCursor { cursor, .. } => Some(*cursor),
                _ => None,
            })
            .collect();
        assert_eq!(cursors, vec![date(2024, 4, 15)]);
    }

    #[test]
    fn plan_is_empty_when_nothing_is_due() {
        let template = monthly_expense(date(2024, 1, 15), Some(date(2024, 4, 15)));
        let (ops, outcome) = plan_materialization(&[template], date(2024, 5, 1));
        assert!(ops.is_empty());
        assert_eq!(outcome.created, 0);
    }

    #[test]
    fn income_template_materializes_incomes() {
        let template = RecurringTemplate {
            id: 7,
            user_id: "wife".to_string(),
            frequency: Frequency::Monthly,
            start_date: date(2024, 1, 1),
            last_processed: None,
            details: TemplateDetails::Income(IncomeTemplate {
                amount: 3000.0,
                currency: Currency::Eur,
                source: IncomeSource::Wife,
                description: Some("Salary".to_string()),
            }),
            created_at: Utc::now(),
        };

        let (ops, outcome) = plan_materialization(&[template], date(2024, 3, 15));
        assert_eq!(outcome.created, 2);
        assert!(matches!(ops[0], StoreOp::InsertIncome(_)));
    }
}
