//! Tally Core Library
//!
//! Shared functionality for the Tally personal finance tracker:
//! - Calendar periods (months, years, inclusive date ranges) and the clock
//!   that defaults absent ones
//! - The report engine: monthly summaries and yearly overviews
//! - The `LedgerStore` query interface with in-memory and SQLite stores
//! - Database access and migrations for transactions and budgets
//! - Demo data seeding

pub mod db;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod models;
pub mod period;
pub mod seed;
pub mod summary;

pub use db::{Database, TransactionFilter};
pub use engine::ReportEngine;
pub use error::{Error, Result};
pub use ledger::{LedgerStore, MemoryLedger};
pub use models::{
    Budget, BudgetUsage, CategoryAmount, MonthlyOverview, MonthlySummary, NewTransaction, MAX_AMOUNT,
    Pagination, Transaction, TransactionKind, TransactionPage, TransactionUpdate,
};
pub use period::{
    parse_optional_month, parse_optional_year, Clock, DateRange, FixedClock, Month,
    PeriodResolver, SystemClock, Year,
};
pub use seed::{seed_demo, SeedResult};
