//! Ledger store query interface
//!
//! The report engine reads transactions and budgets only through
//! [`LedgerStore`]. Two implementations ship with the crate:
//! - [`crate::db::Database`] - SQLite, used by the server and CLI
//! - [`MemoryLedger`] - in-process, used for tests and embedding

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Budget, Transaction};
use crate::period::{DateRange, Month};

mod memory;

pub use memory::MemoryLedger;

/// Read access to a user's transactions and budgets
///
/// Implementations must be Send + Sync so one store can serve concurrent
/// report requests. Result order is unspecified.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// All of the user's transactions dated inside `range` (inclusive)
    async fn find_transactions(&self, user_id: &str, range: &DateRange)
        -> Result<Vec<Transaction>>;

    /// The user's budget for `month`, if one was set
    async fn find_budget(&self, user_id: &str, month: Month) -> Result<Option<Budget>>;
}

#[async_trait]
impl<S: LedgerStore + ?Sized> LedgerStore for Arc<S> {
    async fn find_transactions(
        &self,
        user_id: &str,
        range: &DateRange,
    ) -> Result<Vec<Transaction>> {
        (**self).find_transactions(user_id, range).await
    }

    async fn find_budget(&self, user_id: &str, month: Month) -> Result<Option<Budget>> {
        (**self).find_budget(user_id, month).await
    }
}
