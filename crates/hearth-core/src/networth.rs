//! Net worth and savings aggregation
//!
//! Pure functions over ledger snapshots. Savings accumulate per person and
//! per currency; liability balances derive from payments and may go
//! negative on overpayment. Net worth is reported per currency with no
//! cross-currency normalization.

use crate::models::{Asset, Currency, Liability, Person, Transaction, TransactionKind};

/// Accumulated savings for one person in one currency
#[derive(Debug, Clone, PartialEq)]
pub struct PersonSavings {
    pub person: Person,
    pub currency: Currency,
    pub balance: f64,
}

/// Outstanding balance of one liability
#[derive(Debug, Clone, PartialEq)]
pub struct LiabilityBalance {
    pub id: i64,
    pub name: String,
    pub currency: Currency,
    pub total_amount: f64,
    pub paid: f64,
    /// total minus payments; negative when overpaid
    pub balance: f64,
}

/// Net worth figures for one currency
#[derive(Debug, Clone, PartialEq)]
pub struct NetWorth {
    pub currency: Currency,
    pub savings: f64,
    pub assets: f64,
    pub liabilities: f64,
    pub net_worth: f64,
}

/// Full net worth report across both currencies
#[derive(Debug, Clone)]
pub struct NetWorthReport {
    pub savings: Vec<PersonSavings>,
    pub liabilities: Vec<LiabilityBalance>,
    pub totals: Vec<NetWorth>,
}

/// Savings balance for one person in one currency
///
/// Deposits are savings and openingBalance entries with this saver;
/// withdrawals subtract. Entries with no saver belong to nobody and are
/// excluded.
pub fn person_savings(transactions: &[Transaction], person: Person, currency: Currency) -> f64 {
    transactions
        .iter()
        .filter(|t| t.currency == currency && t.saver == Some(person))
        .map(|t| match t.kind {
            TransactionKind::Savings | TransactionKind::OpeningBalance => t.amount,
            TransactionKind::SavingsWithdrawal => -t.amount,
            _ => 0.0,
        })
        .sum()
}

/// Outstanding balance per liability
pub fn liability_balances(
    transactions: &[Transaction],
    liabilities: &[Liability],
) -> Vec<LiabilityBalance> {
    liabilities
        .iter()
        .map(|liability| {
            let paid: f64 = transactions
                .iter()
                .filter(|t| {
                    t.kind == TransactionKind::LiabilityPayment
                        && t.liability_id == Some(liability.id)
                })
                .map(|t| t.amount)
                .sum();
            LiabilityBalance {
                id: liability.id,
                name: liability.name.clone(),
                currency: liability.currency,
                total_amount: liability.total_amount,
                paid,
                balance: liability.total_amount - paid,
            }
        })
        .collect()
}

/// Full report: per-person savings, per-liability balances, and per-currency
/// net worth (assets + savings − outstanding liabilities)
pub fn net_worth_report(
    transactions: &[Transaction],
    assets: &[Asset],
    liabilities: &[Liability],
) -> NetWorthReport {
    let mut savings = Vec::new();
    for &person in Person::ALL.iter() {
        for &currency in Currency::ALL.iter() {
            let balance = person_savings(transactions, person, currency);
            if balance != 0.0 {
                savings.push(PersonSavings {
                    person,
                    currency,
                    balance,
                });
            }
        }
    }

    let liability_rows = liability_balances(transactions, liabilities);

    let totals = Currency::ALL
        .iter()
        .map(|&currency| {
            let savings_total: f64 = Person::ALL
                .iter()
                .map(|&p| person_savings(transactions, p, currency))
                .sum();
            let assets_total: f64 = assets
                .iter()
                .filter(|a| a.currency == currency)
                .map(|a| a.value)
                .sum();
            let liabilities_total: f64 = liability_rows
                .iter()
                .filter(|l| l.currency == currency)
                .map(|l| l.balance)
                .sum();
            NetWorth {
                currency,
                savings: savings_total,
                assets: assets_total,
                liabilities: liabilities_total,
                net_worth: assets_total + savings_total - liabilities_total,
            }
        })
        .collect();

    NetWorthReport {
        savings,
        liabilities: liability_rows,
        totals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn savings_tx(kind: TransactionKind, amount: f64, saver: Person, currency: Currency) -> Transaction {
        Transaction {
            id: 0,
            user_id: "husband".to_string(),
            date: date(2024, 1, 15),
            kind,
            amount,
            currency,
            category: None,
            payer: None,
            saver: Some(saver),
            liability_id: None,
            description: None,
            created_at: Utc::now(),
        }
    }

    fn payment(liability_id: i64, amount: f64) -> Transaction {
        Transaction {
            id: 0,
            user_id: "husband".to_string(),
            date: date(2024, 1, 15),
            kind: TransactionKind::LiabilityPayment,
            amount,
            currency: Currency::Eur,
            category: None,
            payer: None,
            saver: None,
            liability_id: Some(liability_id),
            description: None,
            created_at: Utc::now(),
        }
    }

    fn liability(id: i64, total: f64) -> Liability {
        Liability {
            id,
            user_id: "husband".to_string(),
            name: format!("Loan {}", id),
            total_amount: total,
            currency: Currency::Eur,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn savings_accumulate_per_person() {
        let transactions = vec![
            savings_tx(TransactionKind::OpeningBalance, 5000.0, Person::Husband, Currency::Eur),
            savings_tx(TransactionKind::Savings, 500.0, Person::Husband, Currency::Eur),
            savings_tx(TransactionKind::SavingsWithdrawal, 1000.0, Person::Husband, Currency::Eur),
            savings_tx(TransactionKind::Savings, 700.0, Person::Wife, Currency::Eur),
        ];

        assert_eq!(
            person_savings(&transactions, Person::Husband, Currency::Eur),
            4500.0
        );
        assert_eq!(
            person_savings(&transactions, Person::Wife, Currency::Eur),
            700.0
        );
    }

    #[test]
    fn savings_isolated_by_currency() {
        let transactions = vec![
            savings_tx(TransactionKind::Savings, 500.0, Person::Wife, Currency::Eur),
            savings_tx(TransactionKind::Savings, 40_000.0, Person::Wife, Currency::Inr),
        ];

        assert_eq!(person_savings(&transactions, Person::Wife, Currency::Eur), 500.0);
        assert_eq!(person_savings(&transactions, Person::Wife, Currency::Inr), 40_000.0);
    }

    #[test]
    fn overpaid_liability_goes_negative() {
        let liabilities = vec![liability(1, 1000.0)];
        let transactions = vec![payment(1, 600.0), payment(1, 600.0)];

        let balances = liability_balances(&transactions, &liabilities);
        assert_eq!(balances[0].paid, 1200.0);
        assert_eq!(balances[0].balance, -200.0);
    }

    #[test]
    fn net_worth_combines_assets_savings_and_liabilities() {
        let transactions = vec![
            savings_tx(TransactionKind::Savings, 2000.0, Person::Husband, Currency::Eur),
            payment(1, 400.0),
        ];
        let liabilities = vec![liability(1, 1000.0)];
        let assets = vec![Asset {
            id: 1,
            user_id: "husband".to_string(),
            name: "Car".to_string(),
            value: 8000.0,
            currency: Currency::Eur,
            created_at: Utc::now(),
        }];

        let report = net_worth_report(&transactions, &assets, &liabilities);
        let eur = report
            .totals
            .iter()
            .find(|t| t.currency == Currency::Eur)
            .unwrap();

        // 8000 assets + 2000 savings - 600 outstanding
        assert_eq!(eur.net_worth, 9400.0);
    }

    #[test]
    fn payments_to_other_liabilities_do_not_count() {
        let liabilities = vec![liability(1, 1000.0), liability(2, 500.0)];
        let transactions = vec![payment(2, 100.0)];

        let balances = liability_balances(&transactions, &liabilities);
        assert_eq!(balances[0].balance, 1000.0);
        assert_eq!(balances[1].balance, 400.0);
    }
}
