//! CLI command tests
//!
//! Commands are exercised end to end: a full argument line is parsed with
//! clap and dispatched, then the resulting database state is inspected
//! directly. Tests run against unencrypted databases in a temp directory.

use std::path::Path;

use chrono::{Months, Utc};
use clap::Parser;
use hearth_core::db::Database;

use crate::cli::Cli;
use crate::commands::{self, truncate};

/// Parse and dispatch one command line against the given database file
async fn run(db_path: &Path, args: &[&str]) -> anyhow::Result<()> {
    let path = db_path.to_str().unwrap();
    let mut full = vec!["hearth", "--db", path, "--no-encrypt"];
    full.extend_from_slice(args);
    let cli = Cli::try_parse_from(full)?;
    commands::dispatch(&cli).await
}

fn open(db_path: &Path) -> Database {
    Database::new_unencrypted(db_path.to_str().unwrap()).unwrap()
}

// ========== Init ==========

#[tokio::test]
async fn test_cmd_init_seeds_categories_for_both_users() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("test.db");

    run(&db_path, &["init"]).await.unwrap();

    let db = open(&db_path);
    let husband = db.list_categories("Husband").unwrap();
    let wife = db.list_categories("Wife").unwrap();
    assert!(!husband.is_empty());
    assert_eq!(husband, wife);
    assert!(husband.contains(&"Groceries".to_string()));
}

#[tokio::test]
async fn test_cmd_init_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("test.db");

    run(&db_path, &["init"]).await.unwrap();
    let before = open(&db_path).list_categories("Husband").unwrap();

    run(&db_path, &["init"]).await.unwrap();
    let after = open(&db_path).list_categories("Husband").unwrap();
    assert_eq!(before, after);
}

// ========== Transactions ==========

#[tokio::test]
async fn test_cmd_tx_add_and_delete() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("test.db");

    run(
        &db_path,
        &[
            "tx",
            "add",
            "--date",
            "2024-03-10",
            "--amount",
            "42.50",
            "--category",
            "Groceries",
            "--payer",
            "husband",
        ],
    )
    .await
    .unwrap();

    let db = open(&db_path);
    let txs = db.list_transactions("Husband").unwrap();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0].amount, 42.50);
    assert_eq!(txs[0].category.as_deref(), Some("Groceries"));
    let id = txs[0].id;
    drop(db);

    run(&db_path, &["tx", "delete", &id.to_string()])
        .await
        .unwrap();
    assert!(open(&db_path).list_transactions("Husband").unwrap().is_empty());
}

#[tokio::test]
async fn test_cmd_tx_add_rejects_unknown_kind() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("test.db");

    let result = run(
        &db_path,
        &["tx", "add", "--kind", "refund", "--amount", "5"],
    )
    .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_cmd_tx_add_rejects_negative_amount() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("test.db");

    let result = run(&db_path, &["tx", "add", "--amount=-10"]).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_cmd_tx_liability_payment_requires_liability() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("test.db");

    let result = run(
        &db_path,
        &["tx", "add", "--kind", "liabilityPayment", "--amount", "500"],
    )
    .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_cmd_tx_scoped_to_acting_user() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("test.db");

    run(
        &db_path,
        &["--user", "wife", "tx", "add", "--amount", "12", "--currency", "INR"],
    )
    .await
    .unwrap();

    let db = open(&db_path);
    assert!(db.list_transactions("Husband").unwrap().is_empty());
    assert_eq!(db.list_transactions("Wife").unwrap().len(), 1);
}

#[tokio::test]
async fn test_unknown_user_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("test.db");

    let result = run(&db_path, &["--user", "charlie", "tx", "list"]).await;
    assert!(result.is_err());
}

// ========== Incomes ==========

#[tokio::test]
async fn test_cmd_income_add() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("test.db");

    run(
        &db_path,
        &[
            "income",
            "add",
            "--date",
            "2024-03-01",
            "--amount",
            "3000",
            "--source",
            "wife",
            "--description",
            "Salary",
        ],
    )
    .await
    .unwrap();

    let incomes = open(&db_path).list_incomes("Husband").unwrap();
    assert_eq!(incomes.len(), 1);
    assert_eq!(incomes[0].amount, 3000.0);
}

// ========== Categories and budgets ==========

#[tokio::test]
async fn test_cmd_category_add_and_delete() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("test.db");

    run(&db_path, &["category", "add", "Travel"]).await.unwrap();
    assert_eq!(
        open(&db_path).list_categories("Husband").unwrap(),
        vec!["Travel".to_string()]
    );

    // Duplicate add fails
    assert!(run(&db_path, &["category", "add", "Travel"]).await.is_err());

    run(&db_path, &["category", "delete", "Travel"])
        .await
        .unwrap();
    assert!(open(&db_path).list_categories("Husband").unwrap().is_empty());
}

#[tokio::test]
async fn test_cmd_budget_set() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("test.db");

    run(
        &db_path,
        &["budget", "set", "--month", "2024-03", "Groceries", "400"],
    )
    .await
    .unwrap();

    let budgets = open(&db_path).get_budgets("Husband", 2024, 3).unwrap();
    assert_eq!(budgets.get("Groceries"), Some(&400.0));
}

#[tokio::test]
async fn test_cmd_budget_set_rejects_bad_month() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("test.db");

    let result = run(
        &db_path,
        &["budget", "set", "--month", "2024-13", "Groceries", "400"],
    )
    .await;
    assert!(result.is_err());
}

// ========== Recurring ==========

#[tokio::test]
async fn test_cmd_recurring_add_catches_up_past_occurrences() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("test.db");

    let start = Utc::now().date_naive() - Months::new(3);
    run(
        &db_path,
        &[
            "recurring",
            "add",
            "--start",
            &start.format("%Y-%m-%d").to_string(),
            "--amount",
            "1200",
            "--category",
            "Rent",
        ],
    )
    .await
    .unwrap();

    // Start date itself never materializes; the following months do
    let txs = open(&db_path).list_transactions("Husband").unwrap();
    assert!(txs.len() >= 2, "expected catch-up entries, got {}", txs.len());
    assert!(txs.iter().all(|t| t.date > start));
}

#[tokio::test]
async fn test_cmd_recurring_run_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("test.db");

    let start = Utc::now().date_naive() - Months::new(2);
    run(
        &db_path,
        &[
            "recurring",
            "add",
            "--kind",
            "income",
            "--source",
            "husband",
            "--start",
            &start.format("%Y-%m-%d").to_string(),
            "--amount",
            "2500",
        ],
    )
    .await
    .unwrap();

    let after_add = open(&db_path).list_incomes("Husband").unwrap().len();

    run(&db_path, &["recurring", "run"]).await.unwrap();
    let after_run = open(&db_path).list_incomes("Husband").unwrap().len();
    assert_eq!(after_add, after_run);
}

#[tokio::test]
async fn test_cmd_recurring_rejects_opening_balance() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("test.db");

    let result = run(
        &db_path,
        &["recurring", "add", "--kind", "openingBalance", "--amount", "100"],
    )
    .await;
    assert!(result.is_err());
}

// ========== Import and export ==========

#[tokio::test]
async fn test_cmd_import_preview_does_not_write() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("test.db");
    let csv_path = dir.path().join("statement.csv");

    std::fs::write(
        &csv_path,
        "Date,Description,Debit,Credit\n15/01/2024,SUPERMARKET,45.00,\n",
    )
    .unwrap();

    run(
        &db_path,
        &["import", "--file", csv_path.to_str().unwrap()],
    )
    .await
    .unwrap();

    assert!(open(&db_path).list_transactions("Husband").unwrap().is_empty());
}

#[tokio::test]
async fn test_cmd_import_commit_writes_and_dedups() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("test.db");
    let csv_path = dir.path().join("statement.csv");

    std::fs::write(
        &csv_path,
        "Date,Description,Debit,Credit\n\
         15/01/2024,SUPERMARKET,45.00,\n\
         25/01/2024,SALARY,,2000.00\n",
    )
    .unwrap();

    let file = csv_path.to_str().unwrap();
    run(&db_path, &["import", "--file", file, "--commit"])
        .await
        .unwrap();

    let db = open(&db_path);
    assert_eq!(db.list_transactions("Husband").unwrap().len(), 1);
    assert_eq!(db.list_incomes("Husband").unwrap().len(), 1);
    drop(db);

    // Second commit of the same file is a no-op
    run(&db_path, &["import", "--file", file, "--commit"])
        .await
        .unwrap();
    let db = open(&db_path);
    assert_eq!(db.list_transactions("Husband").unwrap().len(), 1);
    assert_eq!(db.list_incomes("Husband").unwrap().len(), 1);
}

#[tokio::test]
async fn test_cmd_import_kind_override() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("test.db");
    let csv_path = dir.path().join("statement.csv");

    std::fs::write(
        &csv_path,
        "Date,Description,Debit,Credit\n15/01/2024,REIMBURSEMENT,,80.00\n",
    )
    .unwrap();

    run(
        &db_path,
        &[
            "import",
            "--file",
            csv_path.to_str().unwrap(),
            "--as",
            "expense",
            "--commit",
        ],
    )
    .await
    .unwrap();

    let db = open(&db_path);
    assert_eq!(db.list_transactions("Husband").unwrap().len(), 1);
    assert!(db.list_incomes("Husband").unwrap().is_empty());
}

#[tokio::test]
async fn test_cmd_export_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("test.db");
    let out_path = dir.path().join("export.csv");

    run(
        &db_path,
        &["tx", "add", "--date", "2024-03-10", "--amount", "42.50"],
    )
    .await
    .unwrap();

    run(
        &db_path,
        &["export", "--out", out_path.to_str().unwrap()],
    )
    .await
    .unwrap();

    let exported = std::fs::read_to_string(&out_path).unwrap();
    assert!(exported.starts_with("Date,Type,Description"));
    assert!(exported.contains("42.50"));
}

// ========== Reports ==========

#[tokio::test]
async fn test_cmd_balance_runs_on_populated_ledger() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("test.db");

    run(
        &db_path,
        &["tx", "add", "--date", "2024-03-10", "--amount", "50"],
    )
    .await
    .unwrap();
    run(
        &db_path,
        &["income", "add", "--date", "2024-03-01", "--amount", "2000"],
    )
    .await
    .unwrap();

    run(&db_path, &["balance", "--month", "2024-03"])
        .await
        .unwrap();
}

#[tokio::test]
async fn test_cmd_networth_runs_on_populated_ledger() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("test.db");

    run(
        &db_path,
        &["liability", "add", "Car Loan", "--total", "8000"],
    )
    .await
    .unwrap();
    run(&db_path, &["asset", "add", "Deposit", "--value", "5000"])
        .await
        .unwrap();

    run(&db_path, &["networth"]).await.unwrap();
}

// ========== Helpers ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("a longer description", 10), "a longer …");
}
