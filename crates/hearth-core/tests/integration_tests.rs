//! End-to-end flows through the public API

use chrono::NaiveDate;

use hearth_core::{
    balance, budget, export, import, networth, recurring, Currency, CurrencyRates, Database,
    Frequency, IncomeSource, NewRecurringTemplate, NewTransaction, Person, TemplateDetails,
    TransactionKind,
};
use hearth_core::models::{IncomeTemplate, TransactionTemplate};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

const USER: &str = "husband";

#[test]
fn materialize_then_aggregate() {
    let db = Database::in_memory().unwrap();

    // Monthly salary starting mid-January, monthly rent on the 1st of February
    db.add_recurring(
        USER,
        &NewRecurringTemplate {
            frequency: Frequency::Monthly,
            start_date: date(2024, 1, 15),
            details: TemplateDetails::Income(IncomeTemplate {
                amount: 3000.0,
                currency: Currency::Eur,
                source: IncomeSource::Husband,
                description: Some("Salary".to_string()),
            }),
        },
    )
    .unwrap();
    db.add_recurring(
        USER,
        &NewRecurringTemplate {
            frequency: Frequency::Monthly,
            start_date: date(2024, 2, 1),
            details: TemplateDetails::Transaction(TransactionTemplate {
                kind: TransactionKind::Expense,
                amount: 1200.0,
                currency: Currency::Eur,
                category: Some("Rent".to_string()),
                payer: Some(Person::Husband),
                saver: None,
                liability_id: None,
                description: Some("Rent".to_string()),
            }),
        },
    )
    .unwrap();

    let today = date(2024, 5, 1);
    let outcome = recurring::run_materialization(&db, USER, today).unwrap();
    // Salary: Feb/Mar/Apr 15th. Rent: Mar 1, Apr 1 (Feb 1 is the start date).
    assert_eq!(outcome.created, 5);
    assert_eq!(outcome.templates_advanced, 2);

    // Re-running the same day creates nothing
    let again = recurring::run_materialization(&db, USER, today).unwrap();
    assert_eq!(again.created, 0);

    let transactions = db.list_transactions(USER).unwrap();
    let incomes = db.list_incomes(USER).unwrap();
    assert_eq!(transactions.len(), 2);
    assert_eq!(incomes.len(), 3);

    // April: one salary in, one rent out; opening covers Feb + Mar
    let april = balance::monthly_balance(&transactions, &incomes, 2024, 4, Currency::Eur);
    assert_eq!(april.opening, 3000.0 + 3000.0 - 1200.0);
    assert_eq!(april.cash_flow, 3000.0 - 1200.0);
    assert_eq!(april.closing, april.opening + april.cash_flow);
}

#[test]
fn import_preview_then_commit() {
    let db = Database::in_memory().unwrap();

    let statement = "Date,Description,Debit,Credit\n\
                     05/03/2024,SUPERMARKET,45.20,\n\
                     31/03/2024,SALARY,,3000.00\n\
                     ,,,\n";

    let mut drafts = import::parse_statement(statement.as_bytes()).unwrap();
    assert_eq!(drafts.len(), 2);

    // User overrides the salary draft to stay an expense (say, a refund reversal)
    drafts[1].kind = import::DraftKind::Expense;

    let outcome = import::commit_drafts(&db, USER, &drafts).unwrap();
    assert_eq!(outcome.imported, 2);

    let transactions = db.list_transactions(USER).unwrap();
    assert_eq!(transactions.len(), 2);
    assert!(db.list_incomes(USER).unwrap().is_empty());

    // Importing the same statement again is a no-op
    let drafts = import::parse_statement(statement.as_bytes()).unwrap();
    let outcome = import::commit_drafts(&db, USER, &drafts).unwrap();
    assert_eq!(outcome.imported, 1); // the salary row, now as income
    assert_eq!(outcome.skipped, 1);
}

#[test]
fn export_round_trips_through_import() {
    let db = Database::in_memory().unwrap();

    db.insert_transaction(
        USER,
        &NewTransaction {
            date: date(2024, 3, 5),
            kind: TransactionKind::Expense,
            amount: 45.2,
            currency: Currency::Eur,
            category: Some("Groceries".to_string()),
            payer: Some(Person::Husband),
            saver: None,
            liability_id: None,
            description: Some("Market, with \"specials\"".to_string()),
            import_hash: None,
        },
    )
    .unwrap();
    db.insert_income(
        USER,
        &hearth_core::NewIncome {
            date: date(2024, 3, 31),
            amount: 3000.0,
            currency: Currency::Eur,
            source: IncomeSource::Husband,
            description: Some("Salary".to_string()),
            import_hash: None,
        },
    )
    .unwrap();

    let csv = export::export_csv(
        &db.list_transactions(USER).unwrap(),
        &db.list_incomes(USER).unwrap(),
    );

    // Re-import into a fresh ledger for the other user
    let drafts = import::parse_statement(csv.as_bytes()).unwrap();
    assert_eq!(drafts.len(), 2);

    let outcome = import::commit_drafts(&db, "wife", &drafts).unwrap();
    assert_eq!(outcome.imported, 2);

    let transactions = db.list_transactions("wife").unwrap();
    let incomes = db.list_incomes("wife").unwrap();
    assert_eq!(transactions.len(), 1);
    assert_eq!(incomes.len(), 1);
    assert_eq!(transactions[0].amount, 45.2);
    assert_eq!(transactions[0].date, date(2024, 3, 5));
    assert_eq!(
        transactions[0].description.as_deref(),
        Some("Market, with \"specials\"")
    );
    assert_eq!(incomes[0].amount, 3000.0);
}

#[test]
fn net_worth_over_ledger() {
    let db = Database::in_memory().unwrap();

    let loan = db
        .add_liability(USER, "Car loan", 10_000.0, Currency::Eur)
        .unwrap();
    db.add_asset(USER, "Deposit", 200_000.0, Currency::Inr).unwrap();

    db.insert_transaction(
        USER,
        &NewTransaction {
            date: date(2024, 1, 1),
            kind: TransactionKind::OpeningBalance,
            amount: 5000.0,
            currency: Currency::Eur,
            category: None,
            payer: None,
            saver: Some(Person::Wife),
            liability_id: None,
            description: None,
            import_hash: None,
        },
    )
    .unwrap();
    db.insert_transaction(
        USER,
        &NewTransaction {
            date: date(2024, 2, 10),
            kind: TransactionKind::LiabilityPayment,
            amount: 12_000.0,
            currency: Currency::Eur,
            category: None,
            payer: None,
            saver: None,
            liability_id: Some(loan),
            description: None,
            import_hash: None,
        },
    )
    .unwrap();

    let report = networth::net_worth_report(
        &db.list_transactions(USER).unwrap(),
        &db.list_assets(USER).unwrap(),
        &db.list_liabilities(USER).unwrap(),
    );

    // Overpaid loan: balance -2000, which raises EUR net worth
    assert_eq!(report.liabilities[0].balance, -2000.0);

    let eur = report
        .totals
        .iter()
        .find(|t| t.currency == Currency::Eur)
        .unwrap();
    assert_eq!(eur.net_worth, 5000.0 - (-2000.0));

    let inr = report
        .totals
        .iter()
        .find(|t| t.currency == Currency::Inr)
        .unwrap();
    assert_eq!(inr.net_worth, 200_000.0);
}

#[test]
fn budget_variance_over_month() {
    let db = Database::in_memory().unwrap();

    db.set_budget(USER, 2024, 3, "Groceries", 300.0).unwrap();
    db.set_budget(USER, 2024, 3, "Transport", 100.0).unwrap();

    db.insert_transaction(
        USER,
        &NewTransaction {
            date: date(2024, 3, 12),
            kind: TransactionKind::Expense,
            amount: 31_500.0,
            currency: Currency::Inr,
            category: Some("Groceries".to_string()),
            payer: None,
            saver: None,
            liability_id: None,
            description: None,
            import_hash: None,
        },
    )
    .unwrap();

    let rates = CurrencyRates { eur: 1.0, inr: 90.0 };
    let report = budget::budget_variance(
        &db.list_transactions(USER).unwrap(),
        &db.get_budgets(USER, 2024, 3).unwrap(),
        2024,
        3,
        &rates,
    );

    let groceries = report
        .categories
        .iter()
        .find(|c| c.category == "Groceries")
        .unwrap();
    assert_eq!(groceries.actual, 350.0);
    assert!(groceries.over_budget);

    let transport = report
        .categories
        .iter()
        .find(|c| c.category == "Transport")
        .unwrap();
    assert_eq!(transport.actual, 0.0);
    assert!(!transport.over_budget);
}
