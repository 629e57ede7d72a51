//! In-memory ledger

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;

use super::LedgerStore;
use crate::error::{Error, Result};
use crate::models::{validate_amount, Budget, NewTransaction, Transaction};
use crate::period::{DateRange, Month};

#[derive(Default)]
struct MemoryState {
    transactions: Vec<Transaction>,
    budgets: Vec<Budget>,
    next_id: i64,
}

impl MemoryState {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Ledger held in process memory
///
/// Queries return records newest-inserted first, so callers cannot lean on
/// insertion order.
#[derive(Default)]
pub struct MemoryLedger {
    state: RwLock<MemoryState>,
    unavailable: AtomicBool,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a transaction for `user_id`
    pub fn add_transaction(&self, user_id: &str, tx: NewTransaction) -> Result<Transaction> {
        tx.validate()?;
        let mut state = self.write()?;

        let transaction = Transaction {
            id: state.next_id(),
            user_id: user_id.to_string(),
            kind: tx.kind,
            category: tx.category.trim().to_string(),
            amount: tx.amount,
            date: tx.date,
            note: tx.note,
            created_at: Utc::now(),
        };
        state.transactions.push(transaction.clone());
        Ok(transaction)
    }

    /// Set the budget for a month; an existing budget keeps its id and only
    /// the amount changes
    pub fn set_budget(&self, user_id: &str, month: Month, amount: Decimal) -> Result<Budget> {
        validate_amount(amount)?;
        let mut state = self.write()?;
        let now = Utc::now();

        if let Some(existing) = state
            .budgets
            .iter_mut()
            .find(|b| b.user_id == user_id && b.month == month)
        {
            existing.amount = amount;
            existing.updated_at = now;
            return Ok(existing.clone());
        }

        let budget = Budget {
            id: state.next_id(),
            user_id: user_id.to_string(),
            month,
            amount,
            created_at: now,
            updated_at: now,
        };
        state.budgets.push(budget.clone());
        Ok(budget)
    }

    /// Make every query fail as if the store could not be reached
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(Error::StoreUnavailable(
                "memory ledger marked unavailable".to_string(),
            ));
        }
        Ok(())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, MemoryState>> {
        self.check_available()?;
        self.state
            .read()
            .map_err(|_| Error::StoreUnavailable("memory ledger lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, MemoryState>> {
        self.check_available()?;
        self.state
            .write()
            .map_err(|_| Error::StoreUnavailable("memory ledger lock poisoned".to_string()))
    }
}

#[async_trait]
impl LedgerStore for MemoryLedger {
    async fn find_transactions(
        &self,
        user_id: &str,
        range: &DateRange,
    ) -> Result<Vec<Transaction>> {
        let state = self.read()?;
        Ok(state
            .transactions
            .iter()
            .rev()
            .filter(|tx| tx.user_id == user_id && range.contains(tx.date))
            .cloned()
            .collect())
    }

    async fn find_budget(&self, user_id: &str, month: Month) -> Result<Option<Budget>> {
        let state = self.read()?;
        Ok(state
            .budgets
            .iter()
            .find(|b| b.user_id == user_id && b.month == month)
            .cloned())
    }
}
