//! Monthly budget operations

use rusqlite::{params, OptionalExtension};
use rust_decimal::Decimal;
use tracing::debug;

use super::{column_decimal, conversion_error, parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{validate_amount, Budget};
use crate::period::Month;

impl Database {
    /// Set the budget for a month
    ///
    /// A second call for the same user and month replaces the amount in
    /// place; the row keeps its id and creation time.
    pub fn set_budget(&self, user_id: &str, month: Month, amount: Decimal) -> Result<Budget> {
        validate_amount(amount)?;
        let conn = self.conn()?;

        conn.execute(
            r#"
            INSERT INTO budgets (user_id, month, amount)
            VALUES (?, ?, ?)
            ON CONFLICT(user_id, month) DO UPDATE SET
                amount = excluded.amount,
                updated_at = CURRENT_TIMESTAMP
            "#,
            params![user_id, month.to_string(), amount.to_string()],
        )?;
        debug!(user = user_id, month = %month, %amount, "Budget set");

        conn.query_row(
            "SELECT id, user_id, month, amount, created_at, updated_at
             FROM budgets WHERE user_id = ? AND month = ?",
            params![user_id, month.to_string()],
            Self::row_to_budget,
        )
        .optional()?
        .ok_or_else(|| Error::NotFound(format!("budget {} vanished after upsert", month)))
    }

    /// The user's budget for `month`, if one was set
    pub fn get_budget(&self, user_id: &str, month: Month) -> Result<Option<Budget>> {
        let conn = self.conn()?;
        let budget = conn
            .query_row(
                "SELECT id, user_id, month, amount, created_at, updated_at
                 FROM budgets WHERE user_id = ? AND month = ?",
                params![user_id, month.to_string()],
                Self::row_to_budget,
            )
            .optional()?;

        Ok(budget)
    }

    /// All of the user's budgets, newest month first
    pub fn budget_history(&self, user_id: &str) -> Result<Vec<Budget>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, user_id, month, amount, created_at, updated_at
             FROM budgets WHERE user_id = ?
             ORDER BY month DESC",
        )?;

        let budgets = stmt
            .query_map(params![user_id], Self::row_to_budget)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(budgets)
    }

    /// Column order: id, user_id, month, amount, created_at, updated_at
    fn row_to_budget(row: &rusqlite::Row) -> rusqlite::Result<Budget> {
        let month_str: String = row.get(2)?;
        let created_at_str: String = row.get(4)?;
        let updated_at_str: String = row.get(5)?;
        Ok(Budget {
            id: row.get(0)?,
            user_id: row.get(1)?,
            month: month_str
                .parse()
                .map_err(|e: Error| conversion_error(2, e.to_string()))?,
            amount: column_decimal(row, 3)?,
            created_at: parse_datetime(&created_at_str),
            updated_at: parse_datetime(&updated_at_str),
        })
    }
}
