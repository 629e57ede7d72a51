//! Transaction filter builder for constructing dynamic SQL queries
//!
//! The same filter feeds both the page query and the count query, so the
//! two can never disagree about which rows match.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::TransactionKind;

/// Builder for constructing transaction query filters
///
/// Every filter is scoped to one owner; the optional fields narrow it further.
#[derive(Debug, Default, Clone)]
pub struct TransactionFilter<'query> {
    pub user_id: &'query str,
    pub kind: Option<TransactionKind>,
    pub category: Option<&'query str>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub min_amount: Option<Decimal>,
    pub max_amount: Option<Decimal>,
}

/// Result of building a filter - contains SQL components and parameters
pub struct FilterResult {
    /// WHERE clause including "WHERE" keyword
    pub where_clause: String,
    /// ORDER BY clause including "ORDER BY" keyword
    pub order_clause: &'static str,
    /// Parameters for the query (boxed for rusqlite compatibility)
    pub params: Vec<Box<dyn rusqlite::ToSql>>,
}

impl<'query> TransactionFilter<'query> {
    /// Create a filter matching all of `user_id`'s transactions
    pub fn new(user_id: &'query str) -> Self {
        Self {
            user_id,
            ..Default::default()
        }
    }

    /// Set income/expense filter
    pub fn kind(mut self, kind: Option<TransactionKind>) -> Self {
        self.kind = kind;
        self
    }

    /// Set category filter (exact match)
    pub fn category(mut self, category: Option<&'query str>) -> Self {
        self.category = category;
        self
    }

    /// Set inclusive date bounds
    pub fn date_range(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    /// Set inclusive amount bounds
    pub fn amount_range(mut self, min: Option<Decimal>, max: Option<Decimal>) -> Self {
        self.min_amount = min;
        self.max_amount = max;
        self
    }

    /// Build the filter components
    pub fn build(&self) -> FilterResult {
        let mut conditions = vec!["t.user_id = ?".to_string()];
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(self.user_id.to_string())];

        if let Some(kind) = self.kind {
            conditions.push("t.kind = ?".to_string());
            params.push(Box::new(kind.as_str()));
        }

        if let Some(category) = self.category {
            if !category.trim().is_empty() {
                conditions.push("t.category = ?".to_string());
                params.push(Box::new(category.trim().to_string()));
            }
        }

        // Dates are stored as YYYY-MM-DD so text comparison orders correctly
        if let Some(from) = self.from {
            conditions.push("t.date >= ?".to_string());
            params.push(Box::new(from.to_string()));
        }
        if let Some(to) = self.to {
            conditions.push("t.date <= ?".to_string());
            params.push(Box::new(to.to_string()));
        }

        // Amounts are TEXT; compare numerically
        if let Some(min) = self.min_amount {
            conditions.push("CAST(t.amount AS REAL) >= CAST(? AS REAL)".to_string());
            params.push(Box::new(min.to_string()));
        }
        if let Some(max) = self.max_amount {
            conditions.push("CAST(t.amount AS REAL) <= CAST(? AS REAL)".to_string());
            params.push(Box::new(max.to_string()));
        }

        FilterResult {
            where_clause: format!("WHERE {}", conditions.join(" AND ")),
            order_clause: "ORDER BY t.date DESC, t.id DESC",
            params,
        }
    }
}

impl FilterResult {
    /// Build a COUNT query
    pub fn build_count_query(&self) -> String {
        format!("SELECT COUNT(*) FROM transactions t {}", self.where_clause)
    }

    /// Get parameter references for query execution
    pub fn params_refs(&self) -> Vec<&dyn rusqlite::ToSql> {
        self.params.iter().map(|p| p.as_ref()).collect()
    }

    /// Take the parameter vector to append pagination params
    pub fn into_params(self) -> Vec<Box<dyn rusqlite::ToSql>> {
        self.params
    }
}
