//! Financial aggregation engine
//!
//! Resolves the requested period, reads the user's records through a
//! [`LedgerStore`], and reduces them into a [`MonthlySummary`] or a
//! twelve-row yearly overview. The engine holds no mutable state, so one
//! instance can serve any number of concurrent requests.

use std::sync::Arc;

use chrono::Datelike;
use tracing::debug;

use crate::error::Result;
use crate::ledger::LedgerStore;
use crate::models::{MonthlyOverview, MonthlySummary, Transaction};
use crate::period::{Clock, DateRange, Month, PeriodResolver, SystemClock, Year};
use crate::summary::{overview_row, summarize_month};

/// Builds monthly summaries and yearly overviews from a ledger store
#[derive(Debug, Clone)]
pub struct ReportEngine<S> {
    store: S,
    periods: PeriodResolver,
}

impl<S: LedgerStore> ReportEngine<S> {
    /// Engine that defaults absent periods from the local wall clock
    pub fn new(store: S) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    pub fn with_clock(store: S, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            periods: PeriodResolver::new(clock),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn periods(&self) -> &PeriodResolver {
        &self.periods
    }

    /// Summary for `month`, or for the current month when absent
    pub async fn monthly_summary(
        &self,
        user_id: &str,
        month: Option<Month>,
    ) -> Result<MonthlySummary> {
        let month = self.periods.month(month);
        self.summary_for_range(user_id, &month.range()).await
    }

    /// Summary over an explicit range
    ///
    /// The budget consulted is the one for the month containing
    /// `range.start`, which is only meaningful for single-month ranges.
    pub async fn summary_for_range(
        &self,
        user_id: &str,
        range: &DateRange,
    ) -> Result<MonthlySummary> {
        let month = Month::containing(range.first_day());

        let transactions = self.store.find_transactions(user_id, range).await?;
        let budget = self.store.find_budget(user_id, month).await?;

        let summary = summarize_month(month, &transactions, budget.as_ref())?;
        debug!(
            user = user_id,
            month = %month,
            transactions = transactions.len(),
            has_budget = budget.is_some(),
            "Built monthly summary"
        );
        Ok(summary)
    }

    /// Twelve rows for `year` (or the current year), January first
    ///
    /// Transactions are fetched with one query over the whole year and
    /// bucketed by month; budgets are looked up per month.
    pub async fn yearly_overview(
        &self,
        user_id: &str,
        year: Option<Year>,
    ) -> Result<Vec<MonthlyOverview>> {
        let year = self.periods.year(year);
        let range = year.range();

        let transactions = self.store.find_transactions(user_id, &range).await?;
        let total = transactions.len();
        let mut buckets: Vec<Vec<Transaction>> = vec![Vec::new(); 12];
        for tx in transactions {
            if range.contains(tx.date) {
                buckets[tx.date.month0() as usize].push(tx);
            }
        }

        let mut overview = Vec::with_capacity(12);
        for (month, bucket) in year.months().zip(&buckets) {
            let budget = self.store.find_budget(user_id, month).await?;
            overview.push(overview_row(month, bucket, budget.as_ref())?);
        }

        debug!(
            user = user_id,
            year = %year,
            transactions = total,
            "Built yearly overview"
        );
        Ok(overview)
    }
}
