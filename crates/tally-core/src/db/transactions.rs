//! Transaction operations
//!
//! Every query is scoped to the owning user; a transaction belonging to
//! someone else behaves exactly like a missing one.

use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use super::transaction_filter::TransactionFilter;
use super::{column_date, column_decimal, conversion_error, parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{NewTransaction, Transaction, TransactionUpdate};
use crate::period::DateRange;

const TRANSACTION_COLUMNS: &str =
    "t.id, t.user_id, t.kind, t.category, t.amount, t.date, t.note, t.created_at";

impl Database {
    /// Record a new transaction for `user_id`
    pub fn insert_transaction(&self, user_id: &str, tx: &NewTransaction) -> Result<Transaction> {
        tx.validate()?;
        let conn = self.conn()?;

        conn.execute(
            r#"
            INSERT INTO transactions (user_id, kind, category, amount, date, note)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
            params![
                user_id,
                tx.kind.as_str(),
                tx.category.trim(),
                tx.amount.to_string(),
                tx.date.to_string(),
                tx.note,
            ],
        )?;
        let id = conn.last_insert_rowid();
        debug!(user = user_id, id, kind = %tx.kind, "Inserted transaction");

        Self::select_transaction(&conn, user_id, id)?.ok_or_else(|| {
            Error::NotFound(format!("transaction {} vanished after insert", id))
        })
    }

    /// Get a single transaction by ID
    pub fn get_transaction(&self, user_id: &str, id: i64) -> Result<Option<Transaction>> {
        let conn = self.conn()?;
        Self::select_transaction(&conn, user_id, id)
    }

    /// One page of transactions matching `filter`, newest date first
    pub fn list_transactions(
        &self,
        filter: &TransactionFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let filter = filter.build();

        let sql = format!(
            "SELECT {} FROM transactions t {} {} LIMIT ? OFFSET ?",
            TRANSACTION_COLUMNS, filter.where_clause, filter.order_clause
        );

        let mut params = filter.into_params();
        params.push(Box::new(limit));
        params.push(Box::new(offset));
        let params_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();

        let mut stmt = conn.prepare(&sql)?;
        let transactions = stmt
            .query_map(params_refs.as_slice(), |row| Self::row_to_transaction(row))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(transactions)
    }

    /// Number of transactions matching `filter`
    pub fn count_transactions(&self, filter: &TransactionFilter) -> Result<i64> {
        let conn = self.conn()?;
        let filter = filter.build();

        let count: i64 = conn.query_row(
            &filter.build_count_query(),
            filter.params_refs().as_slice(),
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// All of a user's transactions dated inside `range` (inclusive)
    pub fn transactions_in_range(
        &self,
        user_id: &str,
        range: &DateRange,
    ) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let sql = format!(
            "SELECT {} FROM transactions t WHERE t.user_id = ? AND t.date >= ? AND t.date <= ?",
            TRANSACTION_COLUMNS
        );

        let mut stmt = conn.prepare(&sql)?;
        let transactions = stmt
            .query_map(
                params![
                    user_id,
                    range.first_day().to_string(),
                    range.last_day().to_string()
                ],
                |row| Self::row_to_transaction(row),
            )?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(transactions)
    }

    /// Apply a partial edit; returns `None` if the transaction doesn't exist
    pub fn update_transaction(
        &self,
        user_id: &str,
        id: i64,
        update: &TransactionUpdate,
    ) -> Result<Option<Transaction>> {
        update.validate()?;
        let conn = self.conn()?;

        let Some(mut tx) = Self::select_transaction(&conn, user_id, id)? else {
            return Ok(None);
        };
        if update.is_empty() {
            return Ok(Some(tx));
        }
        update.apply(&mut tx);

        conn.execute(
            r#"
            UPDATE transactions
            SET kind = ?, category = ?, amount = ?, date = ?, note = ?, updated_at = CURRENT_TIMESTAMP
            WHERE id = ? AND user_id = ?
            "#,
            params![
                tx.kind.as_str(),
                tx.category,
                tx.amount.to_string(),
                tx.date.to_string(),
                tx.note,
                id,
                user_id,
            ],
        )?;
        debug!(user = user_id, id, "Updated transaction");

        Ok(Some(tx))
    }

    /// Delete a transaction; returns whether anything was removed
    pub fn delete_transaction(&self, user_id: &str, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let deleted = conn.execute(
            "DELETE FROM transactions WHERE id = ? AND user_id = ?",
            params![id, user_id],
        )?;
        Ok(deleted > 0)
    }

    fn select_transaction(
        conn: &Connection,
        user_id: &str,
        id: i64,
    ) -> Result<Option<Transaction>> {
        let sql = format!(
            "SELECT {} FROM transactions t WHERE t.id = ? AND t.user_id = ?",
            TRANSACTION_COLUMNS
        );
        let transaction = conn
            .query_row(&sql, params![id, user_id], |row| {
                Self::row_to_transaction(row)
            })
            .optional()?;

        Ok(transaction)
    }

    /// Helper to convert a row to Transaction
    /// Column order: id, user_id, kind, category, amount, date, note, created_at
    pub(crate) fn row_to_transaction(row: &rusqlite::Row) -> rusqlite::Result<Transaction> {
        let kind_str: String = row.get(2)?;
        let created_at_str: String = row.get(7)?;
        Ok(Transaction {
            id: row.get(0)?,
            user_id: row.get(1)?,
            kind: kind_str.parse().map_err(|e| conversion_error(2, e))?,
            category: row.get(3)?,
            amount: column_decimal(row, 4)?,
            date: column_date(row, 5)?,
            note: row.get(6)?,
            created_at: parse_datetime(&created_at_str),
        })
    }
}
