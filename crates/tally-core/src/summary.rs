//! Reduction of raw transactions into report figures
//!
//! Everything here is a pure function of its inputs; fetching belongs to
//! [`crate::engine::ReportEngine`].

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::error::{Error, Result};
use crate::models::{
    Budget, BudgetUsage, CategoryAmount, MonthlyOverview, MonthlySummary, Transaction,
    TransactionKind,
};
use crate::period::Month;

/// Income and expense sums for a set of transactions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub income: Decimal,
    pub expense: Decimal,
}

fn checked_sum(total: Decimal, amount: Decimal) -> Result<Decimal> {
    total
        .checked_add(amount)
        .ok_or_else(|| Error::InvalidData("amount total is out of range".to_string()))
}

impl Totals {
    /// Fails with `InvalidData` if a sum leaves the decimal range
    pub fn of<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Result<Self> {
        transactions
            .into_iter()
            .try_fold(Self::default(), |mut totals, tx| {
                match tx.kind {
                    TransactionKind::Income => {
                        totals.income = checked_sum(totals.income, tx.amount)?
                    }
                    TransactionKind::Expense => {
                        totals.expense = checked_sum(totals.expense, tx.amount)?
                    }
                }
                Ok(totals)
            })
    }

    pub fn balance(&self) -> Decimal {
        self.income - self.expense
    }
}

/// Expense amounts summed per category, largest first
///
/// Equal amounts keep the order their category was first seen in.
pub fn category_breakdown<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
) -> Result<Vec<CategoryAmount>> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut breakdown: Vec<CategoryAmount> = Vec::new();

    for tx in transactions
        .into_iter()
        .filter(|tx| tx.kind == TransactionKind::Expense)
    {
        match index.get(tx.category.as_str()) {
            Some(&slot) => {
                breakdown[slot].amount = checked_sum(breakdown[slot].amount, tx.amount)?
            }
            None => {
                index.insert(tx.category.as_str(), breakdown.len());
                breakdown.push(CategoryAmount {
                    category: tx.category.clone(),
                    amount: tx.amount,
                });
            }
        }
    }

    // stable sort keeps first-seen order among ties
    breakdown.sort_by(|a, b| b.amount.cmp(&a.amount));
    Ok(breakdown)
}

/// Budget utilization against a month's expense total
///
/// With no budget the amount and percentage are zero. Neither `remaining`
/// nor `percentage_used` is clamped.
pub fn budget_usage(budget: Option<&Budget>, expense: Decimal) -> Result<BudgetUsage> {
    let amount = budget.map(|b| b.amount).unwrap_or(Decimal::ZERO);
    let percentage_used = if amount > Decimal::ZERO {
        expense
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|scaled| scaled.checked_div(amount))
            .ok_or_else(|| {
                Error::InvalidData("budget utilization is out of range".to_string())
            })?
    } else {
        Decimal::ZERO
    };

    Ok(BudgetUsage {
        amount,
        used: expense,
        remaining: amount - expense,
        percentage_used,
    })
}

/// Full summary for one month
pub fn summarize_month(
    month: Month,
    transactions: &[Transaction],
    budget: Option<&Budget>,
) -> Result<MonthlySummary> {
    let totals = Totals::of(transactions)?;

    Ok(MonthlySummary {
        month,
        income: totals.income,
        expense: totals.expense,
        balance: totals.balance(),
        budget: budget_usage(budget, totals.expense)?,
        category_breakdown: category_breakdown(transactions)?,
    })
}

/// Yearly overview row for one month (no category breakdown)
pub fn overview_row(
    month: Month,
    transactions: &[Transaction],
    budget: Option<&Budget>,
) -> Result<MonthlyOverview> {
    let totals = Totals::of(transactions)?;

    Ok(MonthlyOverview {
        month,
        income: totals.income,
        expense: totals.expense,
        balance: totals.balance(),
        budget_amount: budget.map(|b| b.amount).unwrap_or(Decimal::ZERO),
    })
}
