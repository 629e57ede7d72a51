//! `LedgerStore` over SQLite
//!
//! rusqlite is synchronous; queries run inline on the calling task, the
//! same way the HTTP handlers call the database directly.

use async_trait::async_trait;

use super::Database;
use crate::error::Result;
use crate::ledger::LedgerStore;
use crate::models::{Budget, Transaction};
use crate::period::{DateRange, Month};

#[async_trait]
impl LedgerStore for Database {
    async fn find_transactions(
        &self,
        user_id: &str,
        range: &DateRange,
    ) -> Result<Vec<Transaction>> {
        self.transactions_in_range(user_id, range)
    }

    async fn find_budget(&self, user_id: &str, month: Month) -> Result<Option<Budget>> {
        self.get_budget(user_id, month)
    }
}
