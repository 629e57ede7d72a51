//! Integration tests for tally-core
//!
//! These tests exercise the full record → budget → report workflow through
//! the public API, against both the SQLite and in-memory ledgers.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use tally_core::{
    seed_demo, Database, FixedClock, MemoryLedger, Month, NewTransaction, ReportEngine,
    TransactionFilter, TransactionKind, TransactionUpdate, Year,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn march() -> Month {
    Month::new(2024, 3).unwrap()
}

/// A quarter of activity for one user
fn sample_transactions() -> Vec<NewTransaction> {
    vec![
        NewTransaction::new(TransactionKind::Income, "Salary", dec!(4000), date(2024, 1, 31)),
        NewTransaction::new(TransactionKind::Expense, "Rent", dec!(1200), date(2024, 2, 1)),
        NewTransaction::new(TransactionKind::Income, "Salary", dec!(4000), date(2024, 3, 1)),
        NewTransaction::new(TransactionKind::Expense, "Rent", dec!(1200), date(2024, 3, 1)),
        NewTransaction::new(TransactionKind::Expense, "Groceries", dec!(85.40), date(2024, 3, 9)),
        NewTransaction::new(TransactionKind::Expense, "Groceries", dec!(64.60), date(2024, 3, 23)),
        NewTransaction::new(TransactionKind::Expense, "Dining", dec!(150), date(2024, 3, 31)),
        NewTransaction::new(TransactionKind::Expense, "Rent", dec!(1200), date(2024, 4, 1)),
    ]
}

// =============================================================================
// Database Workflow
// =============================================================================

#[tokio::test]
async fn test_record_budget_and_summarize() {
    let db = Database::in_memory().expect("Failed to create database");
    for tx in sample_transactions() {
        db.insert_transaction("alice", &tx).unwrap();
    }
    db.set_budget("alice", march(), dec!(2000)).unwrap();

    let engine = ReportEngine::with_clock(db.clone(), Arc::new(FixedClock(date(2024, 3, 15))));
    let summary = engine.monthly_summary("alice", None).await.unwrap();

    assert_eq!(summary.month, march());
    assert_eq!(summary.income, dec!(4000));
    assert_eq!(summary.expense, dec!(1500));
    assert_eq!(summary.balance, dec!(2500));
    assert_eq!(summary.budget.amount, dec!(2000));
    assert_eq!(summary.budget.remaining, dec!(500));
    assert_eq!(summary.budget.percentage_used, dec!(75));

    let categories: Vec<_> = summary
        .category_breakdown
        .iter()
        .map(|c| (c.category.as_str(), c.amount))
        .collect();
    assert_eq!(categories[0], ("Rent", dec!(1200)));
    assert_eq!(summary.category_breakdown.len(), 3);
    assert!(categories.contains(&("Groceries", dec!(150.00))));
    assert!(categories.contains(&("Dining", dec!(150))));
}

#[tokio::test]
async fn test_edits_flow_into_reports() {
    let db = Database::in_memory().unwrap();
    let rent = db
        .insert_transaction(
            "alice",
            &NewTransaction::new(TransactionKind::Expense, "Rent", dec!(1200), date(2024, 3, 1)),
        )
        .unwrap();
    let engine = ReportEngine::with_clock(db.clone(), Arc::new(FixedClock(date(2024, 3, 15))));

    // Move the rent into February
    let update = TransactionUpdate {
        date: Some(date(2024, 2, 29)),
        ..TransactionUpdate::default()
    };
    db.update_transaction("alice", rent.id, &update).unwrap();

    let summary = engine.monthly_summary("alice", Some(march())).await.unwrap();
    assert_eq!(summary.expense, dec!(0));
    assert!(summary.category_breakdown.is_empty());

    let overview = engine
        .yearly_overview("alice", Year::new(2024))
        .await
        .unwrap();
    assert_eq!(overview[1].expense, dec!(1200));
    assert_eq!(overview[2].expense, dec!(0));

    // Deleting removes it from every report
    assert!(db.delete_transaction("alice", rent.id).unwrap());
    let overview = engine.yearly_overview("alice", None).await.unwrap();
    assert!(overview.iter().all(|row| row.expense == dec!(0)));
}

#[tokio::test]
async fn test_users_never_see_each_other() {
    let db = Database::in_memory().unwrap();
    for tx in sample_transactions() {
        db.insert_transaction("alice", &tx).unwrap();
    }
    db.set_budget("alice", march(), dec!(2000)).unwrap();

    let engine = ReportEngine::with_clock(db.clone(), Arc::new(FixedClock(date(2024, 3, 15))));
    let summary = engine.monthly_summary("bob", None).await.unwrap();

    assert_eq!(summary.income, dec!(0));
    assert_eq!(summary.expense, dec!(0));
    assert_eq!(summary.budget.amount, dec!(0));
    assert_eq!(
        db.count_transactions(&TransactionFilter::new("bob")).unwrap(),
        0
    );
    assert!(db.budget_history("bob").unwrap().is_empty());
}

#[tokio::test]
async fn test_seeded_demo_summary() {
    let db = Database::in_memory().unwrap();
    let today = date(2024, 7, 4);
    seed_demo(&db, "demo", today).unwrap();

    let engine = ReportEngine::with_clock(db, Arc::new(FixedClock(today)));
    let summary = engine.monthly_summary("demo", None).await.unwrap();

    assert_eq!(summary.income, dec!(6000));
    assert_eq!(summary.expense, dec!(1650));
    assert_eq!(summary.balance, dec!(4350));
    assert_eq!(summary.budget.remaining, dec!(1350));
    assert_eq!(summary.budget.percentage_used, dec!(55));
}

// =============================================================================
// Store Parity
// =============================================================================

#[tokio::test]
async fn test_memory_and_sqlite_reports_agree() {
    let db = Database::in_memory().unwrap();
    let memory = MemoryLedger::new();
    for tx in sample_transactions() {
        db.insert_transaction("alice", &tx).unwrap();
        memory.add_transaction("alice", tx).unwrap();
    }
    db.set_budget("alice", march(), dec!(1000)).unwrap();
    memory.set_budget("alice", march(), dec!(1000)).unwrap();

    let clock = Arc::new(FixedClock(date(2024, 3, 15)));
    let sqlite_engine = ReportEngine::with_clock(db, clock.clone());
    let memory_engine = ReportEngine::with_clock(memory, clock);

    let from_sqlite = sqlite_engine.monthly_summary("alice", None).await.unwrap();
    let from_memory = memory_engine.monthly_summary("alice", None).await.unwrap();
    assert_eq!(from_sqlite, from_memory);
    assert_eq!(from_sqlite.budget.remaining, dec!(-500));

    let overview_sqlite = sqlite_engine.yearly_overview("alice", None).await.unwrap();
    let overview_memory = memory_engine.yearly_overview("alice", None).await.unwrap();
    assert_eq!(overview_sqlite, overview_memory);
    assert_eq!(overview_sqlite.len(), 12);
}
