//! Demo data for trying the tracker out

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::info;

use crate::db::Database;
use crate::error::Result;
use crate::models::{NewTransaction, TransactionKind};
use crate::period::Month;

/// Budget seeded for the current month
const DEMO_BUDGET: i64 = 3000;

/// What [`seed_demo`] wrote
#[derive(Debug, Clone)]
pub struct SeedResult {
    pub cleared: usize,
    pub transactions: usize,
    pub budget_month: Month,
}

fn demo_transactions(today: NaiveDate) -> Vec<NewTransaction> {
    let entry = |kind: TransactionKind, category: &str, amount: i64, note: &str| {
        NewTransaction::new(kind, category, Decimal::from(amount), today).with_note(note)
    };

    vec![
        entry(TransactionKind::Income, "Salary", 5000, "Monthly salary"),
        entry(TransactionKind::Expense, "Rent", 1200, "Monthly rent"),
        entry(TransactionKind::Expense, "Groceries", 300, "Weekly grocery shopping"),
        entry(TransactionKind::Expense, "Utilities", 150, "Electricity and water"),
        entry(TransactionKind::Income, "Freelance", 1000, "Web design project"),
    ]
}

/// Replace `user_id`'s data with a handful of records dated `today` and a
/// budget for today's month
pub fn seed_demo(db: &Database, user_id: &str, today: NaiveDate) -> Result<SeedResult> {
    let cleared = db.clear_user_data(user_id)?;

    let transactions = demo_transactions(today);
    for tx in &transactions {
        db.insert_transaction(user_id, tx)?;
    }

    let budget_month = Month::containing(today);
    db.set_budget(user_id, budget_month, Decimal::from(DEMO_BUDGET))?;

    info!(
        user = user_id,
        transactions = transactions.len(),
        month = %budget_month,
        "Seeded demo data"
    );

    Ok(SeedResult {
        cleared,
        transactions: transactions.len(),
        budget_month,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::TransactionFilter;
    use crate::engine::ReportEngine;
    use crate::period::FixedClock;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_seed_replaces_user_data() {
        let db = Database::in_memory().unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 3, 12).unwrap();

        seed_demo(&db, "demo", today).unwrap();
        let again = seed_demo(&db, "demo", today).unwrap();

        assert_eq!(again.cleared, 6);
        assert_eq!(again.transactions, 5);
        assert_eq!(again.budget_month.to_string(), "2024-03");
        assert_eq!(
            db.count_transactions(&TransactionFilter::new("demo")).unwrap(),
            5
        );

        let engine = ReportEngine::with_clock(db, Arc::new(FixedClock(today)));
        let summary = engine.monthly_summary("demo", None).await.unwrap();
        assert_eq!(summary.income, dec!(6000));
        assert_eq!(summary.expense, dec!(1650));
        assert_eq!(summary.budget.amount, dec!(3000));
        assert_eq!(summary.budget.remaining, dec!(1350));
        assert_eq!(summary.budget.percentage_used, dec!(55));
    }
}
