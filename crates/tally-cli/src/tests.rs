//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::sync::Arc;

use chrono::NaiveDate;
use clap::Parser;
use rust_decimal_macros::dec;
use tally_core::{
    Database, FixedClock, Month, NewTransaction, ReportEngine, TransactionFilter, TransactionKind,
    TransactionUpdate, Year,
};

use crate::cli::{BudgetAction, Cli, Commands, TransactionsAction};
use crate::commands::{self, truncate, ListOptions};

const USER: &str = "local-dev";

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn setup_test_db() -> Database {
    Database::in_memory().unwrap()
}

fn engine_at(db: &Database, today: NaiveDate) -> ReportEngine<Database> {
    ReportEngine::with_clock(db.clone(), Arc::new(FixedClock(today)))
}

fn count_for(db: &Database, user: &str) -> i64 {
    db.count_transactions(&TransactionFilter::new(user)).unwrap()
}

// ========== Argument Parsing Tests ==========

#[test]
fn test_parse_add() {
    let cli = Cli::try_parse_from([
        "tally",
        "add",
        "expense",
        "Groceries",
        "42.50",
        "--date",
        "2024-03-05",
        "--note",
        "weekly shop",
    ])
    .unwrap();

    match cli.command {
        Commands::Add {
            kind,
            category,
            amount,
            date: tx_date,
            note,
        } => {
            assert_eq!(kind, TransactionKind::Expense);
            assert_eq!(category, "Groceries");
            assert_eq!(amount, dec!(42.50));
            assert_eq!(tx_date, Some(date(2024, 3, 5)));
            assert_eq!(note.as_deref(), Some("weekly shop"));
        }
        _ => panic!("expected add command"),
    }
}

#[test]
fn test_parse_rejects_unknown_kind() {
    let result = Cli::try_parse_from(["tally", "add", "transfer", "Rent", "10"]);
    assert!(result.is_err());
}

#[test]
fn test_parse_summary_month() {
    let cli = Cli::try_parse_from(["tally", "summary", "--month", "2024-03", "--json"]).unwrap();
    match cli.command {
        Commands::Summary { month, json } => {
            assert_eq!(month, Month::new(2024, 3));
            assert!(json);
        }
        _ => panic!("expected summary command"),
    }
}

#[test]
fn test_parse_summary_rejects_malformed_month() {
    assert!(Cli::try_parse_from(["tally", "summary", "--month", "2024-13"]).is_err());
    assert!(Cli::try_parse_from(["tally", "summary", "--month", "March"]).is_err());
}

#[test]
fn test_parse_overview_year() {
    let cli = Cli::try_parse_from(["tally", "overview", "--year", "2024"]).unwrap();
    match cli.command {
        Commands::Overview { year, json } => {
            assert_eq!(year, Year::new(2024));
            assert!(!json);
        }
        _ => panic!("expected overview command"),
    }
}

#[test]
fn test_parse_global_user_flag() {
    let cli = Cli::try_parse_from(["tally", "budget", "show", "--user", "alice"]).unwrap();
    assert_eq!(cli.user, "alice");
    assert!(matches!(
        cli.command,
        Commands::Budget {
            action: Some(BudgetAction::Show { month: None })
        }
    ));
}

#[test]
fn test_parse_transactions_list_defaults() {
    let cli = Cli::try_parse_from(["tally", "transactions", "list"]).unwrap();
    match cli.command {
        Commands::Transactions {
            action: Some(TransactionsAction::List { page, limit, .. }),
        } => {
            assert_eq!(page, 1);
            assert_eq!(limit, 20);
        }
        _ => panic!("expected transactions list"),
    }
}

#[test]
fn test_parse_serve_defaults() {
    let cli = Cli::try_parse_from(["tally", "serve"]).unwrap();
    match cli.command {
        Commands::Serve {
            port,
            host,
            no_auth,
            static_dir,
        } => {
            assert_eq!(port, 3000);
            assert_eq!(host, "127.0.0.1");
            assert!(!no_auth);
            assert!(static_dir.is_none());
        }
        _ => panic!("expected serve command"),
    }
}

// ========== Core Command Tests ==========

#[test]
fn test_default_db_path_file_name() {
    let path = commands::default_db_path();
    assert_eq!(path.file_name().unwrap(), "tally.db");
}

#[test]
fn test_open_db_creates_parent_dir() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("tally.db");

    let db = commands::open_db(&path).unwrap();
    assert!(path.exists());
    assert_eq!(count_for(&db, USER), 0);
}

#[test]
fn test_cmd_init() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tally.db");

    commands::cmd_init(&path).unwrap();
    assert!(path.exists());

    // Re-running is harmless
    commands::cmd_init(&path).unwrap();
}

#[test]
fn test_cmd_seed_replaces_data() {
    let db = setup_test_db();
    let today = date(2024, 3, 20);

    commands::cmd_add(
        &db,
        USER,
        TransactionKind::Expense,
        "Old",
        dec!(9),
        today,
        None,
    )
    .unwrap();

    commands::cmd_seed(&db, USER, today).unwrap();
    assert_eq!(count_for(&db, USER), 5);

    let budget = db
        .get_budget(USER, Month::containing(today))
        .unwrap()
        .unwrap();
    assert_eq!(budget.amount, dec!(3000));
}

// ========== Transaction Command Tests ==========

#[test]
fn test_cmd_add_records_for_user() {
    let db = setup_test_db();

    commands::cmd_add(
        &db,
        "alice",
        TransactionKind::Income,
        "Salary",
        dec!(5000),
        date(2024, 3, 1),
        Some("March".to_string()),
    )
    .unwrap();

    assert_eq!(count_for(&db, "alice"), 1);
    assert_eq!(count_for(&db, "bob"), 0);
}

#[test]
fn test_cmd_add_rejects_invalid_amount() {
    let db = setup_test_db();

    let result = commands::cmd_add(
        &db,
        USER,
        TransactionKind::Expense,
        "Rent",
        dec!(-5),
        date(2024, 3, 1),
        None,
    );
    assert!(result.is_err());
    assert_eq!(count_for(&db, USER), 0);
}

#[test]
fn test_cmd_transactions_list() {
    let db = setup_test_db();

    // Empty database
    commands::cmd_transactions_list(&db, USER, &ListOptions::default()).unwrap();

    for day in 1..=3 {
        db.insert_transaction(
            USER,
            &NewTransaction::new(TransactionKind::Expense, "Food", dec!(10), date(2024, 3, day)),
        )
        .unwrap();
    }

    let options = ListOptions {
        kind: Some(TransactionKind::Expense),
        limit: 2,
        ..ListOptions::default()
    };
    commands::cmd_transactions_list(&db, USER, &options).unwrap();

    // Page past the end
    let options = ListOptions {
        page: 5,
        ..ListOptions::default()
    };
    commands::cmd_transactions_list(&db, USER, &options).unwrap();
}

#[test]
fn test_cmd_transactions_show_not_found() {
    let db = setup_test_db();
    assert!(commands::cmd_transactions_show(&db, USER, 999).is_err());
}

#[test]
fn test_cmd_transactions_show_other_user() {
    let db = setup_test_db();
    let tx = db
        .insert_transaction(
            "alice",
            &NewTransaction::new(TransactionKind::Expense, "Rent", dec!(1200), date(2024, 3, 1)),
        )
        .unwrap();

    assert!(commands::cmd_transactions_show(&db, "alice", tx.id).is_ok());
    assert!(commands::cmd_transactions_show(&db, "bob", tx.id).is_err());
}

#[test]
fn test_cmd_transactions_edit() {
    let db = setup_test_db();
    let tx = db
        .insert_transaction(
            USER,
            &NewTransaction::new(TransactionKind::Expense, "Rent", dec!(1200), date(2024, 3, 1)),
        )
        .unwrap();

    let update = TransactionUpdate {
        amount: Some(dec!(1250)),
        ..TransactionUpdate::default()
    };
    commands::cmd_transactions_edit(&db, USER, tx.id, update).unwrap();

    let updated = db.get_transaction(USER, tx.id).unwrap().unwrap();
    assert_eq!(updated.amount, dec!(1250));
    assert_eq!(updated.category, "Rent");
}

#[test]
fn test_cmd_transactions_edit_requires_a_field() {
    let db = setup_test_db();
    let tx = db
        .insert_transaction(
            USER,
            &NewTransaction::new(TransactionKind::Expense, "Rent", dec!(1200), date(2024, 3, 1)),
        )
        .unwrap();

    let result = commands::cmd_transactions_edit(&db, USER, tx.id, TransactionUpdate::default());
    assert!(result.is_err());
}

#[test]
fn test_cmd_transactions_delete() {
    let db = setup_test_db();
    let tx = db
        .insert_transaction(
            USER,
            &NewTransaction::new(TransactionKind::Income, "Salary", dec!(100), date(2024, 3, 1)),
        )
        .unwrap();

    commands::cmd_transactions_delete(&db, USER, tx.id).unwrap();
    assert_eq!(count_for(&db, USER), 0);

    // Second delete reports not found
    assert!(commands::cmd_transactions_delete(&db, USER, tx.id).is_err());
}

// ========== Budget Command Tests ==========

#[test]
fn test_cmd_budget_set_and_show() {
    let db = setup_test_db();
    let month = Month::new(2024, 3).unwrap();

    // No budget yet
    commands::cmd_budget_show(&db, USER, month).unwrap();

    commands::cmd_budget_set(&db, USER, month, dec!(2000)).unwrap();
    commands::cmd_budget_set(&db, USER, month, dec!(2500)).unwrap();

    let budget = db.get_budget(USER, month).unwrap().unwrap();
    assert_eq!(budget.amount, dec!(2500));
    assert_eq!(db.budget_history(USER).unwrap().len(), 1);

    commands::cmd_budget_show(&db, USER, month).unwrap();
    commands::cmd_budget_history(&db, USER).unwrap();
}

#[test]
fn test_cmd_budget_set_rejects_zero() {
    let db = setup_test_db();
    let month = Month::new(2024, 3).unwrap();

    assert!(commands::cmd_budget_set(&db, USER, month, dec!(0)).is_err());
    assert!(db.get_budget(USER, month).unwrap().is_none());
}

#[test]
fn test_cmd_budget_history_empty() {
    let db = setup_test_db();
    commands::cmd_budget_history(&db, USER).unwrap();
}

// ========== Report Command Tests ==========

#[tokio::test]
async fn test_cmd_summary_and_overview() {
    let db = setup_test_db();
    let today = date(2024, 3, 20);
    commands::cmd_seed(&db, USER, today).unwrap();
    let engine = engine_at(&db, today);

    commands::cmd_summary(&engine, USER, None, false).await.unwrap();
    commands::cmd_summary(&engine, USER, Month::new(2024, 3), true)
        .await
        .unwrap();
    commands::cmd_overview(&engine, USER, None, false).await.unwrap();
    commands::cmd_overview(&engine, USER, Year::new(2024), true)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_format_summary() {
    let db = setup_test_db();
    let today = date(2024, 3, 20);
    commands::cmd_seed(&db, USER, today).unwrap();
    let engine = engine_at(&db, today);

    let summary = engine.monthly_summary(USER, None).await.unwrap();
    let text = commands::format_summary(&summary);

    assert!(text.contains("Summary for 2024-03"));
    assert!(text.contains("6000.00"));
    assert!(text.contains("1650.00"));
    assert!(text.contains("1350.00"));
    assert!(text.contains("55.0%"));
    assert!(text.contains("Rent"));
    assert!(!text.contains("Salary"));
    assert!(!text.contains("Over budget"));
}

#[tokio::test]
async fn test_format_summary_over_budget() {
    let db = setup_test_db();
    let month = Month::new(2024, 3).unwrap();
    db.set_budget(USER, month, dec!(100)).unwrap();
    db.insert_transaction(
        USER,
        &NewTransaction::new(TransactionKind::Expense, "Rent", dec!(150), date(2024, 3, 2)),
    )
    .unwrap();
    let engine = engine_at(&db, date(2024, 3, 20));

    let summary = engine.monthly_summary(USER, Some(month)).await.unwrap();
    let text = commands::format_summary(&summary);

    assert!(text.contains("-50.00"));
    assert!(text.contains("Over budget"));
}

#[tokio::test]
async fn test_format_summary_no_expenses() {
    let db = setup_test_db();
    let engine = engine_at(&db, date(2024, 3, 20));

    let summary = engine.monthly_summary(USER, None).await.unwrap();
    let text = commands::format_summary(&summary);
    assert!(text.contains("No expenses this month."));
}

#[tokio::test]
async fn test_format_overview_rows() {
    let db = setup_test_db();
    let today = date(2024, 3, 20);
    commands::cmd_seed(&db, USER, today).unwrap();
    let engine = engine_at(&db, today);

    let rows = engine.yearly_overview(USER, None).await.unwrap();
    let text = commands::format_overview(&rows);

    assert!(text.contains("Overview for 2024"));
    assert!(text.contains("2024-01"));
    assert!(text.contains("2024-12"));
    assert!(text.contains("3000.00"));
    let month_rows = text.lines().filter(|l| l.trim_start().starts_with("2024-")).count();
    assert_eq!(month_rows, 12);
}

// ========== Utility Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("Groceries", 20), "Groceries");
    assert_eq!(truncate("A very long category name", 10), "A very ...");
    assert_eq!(truncate("Café au lait", 8), "Café ...");
}
