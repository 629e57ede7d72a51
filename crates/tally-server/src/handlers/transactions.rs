//! Transaction handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;

use crate::{read_json, AppError, AppState, AuthUser, SuccessResponse, MAX_PAGE_LIMIT};
use tally_core::models::{
    NewTransaction, Pagination, Transaction, TransactionKind, TransactionPage, TransactionUpdate,
};
use tally_core::TransactionFilter;

/// Query parameters for listing transactions
#[derive(Debug, Deserialize)]
pub struct TransactionQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
    /// income or expense
    #[serde(alias = "type")]
    pub kind: Option<String>,
    /// Exact category match
    pub category: Option<String>,
    /// Start date (YYYY-MM-DD), inclusive
    #[serde(alias = "startDate")]
    pub from: Option<String>,
    /// End date (YYYY-MM-DD), inclusive
    #[serde(alias = "endDate")]
    pub to: Option<String>,
    #[serde(alias = "minAmount")]
    pub min_amount: Option<String>,
    #[serde(alias = "maxAmount")]
    pub max_amount: Option<String>,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    10
}

fn parse_date(value: Option<&str>, name: &str) -> Result<Option<NaiveDate>, AppError> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .transpose()
        .map_err(|_| AppError::bad_request(&format!("Invalid {} date format (use YYYY-MM-DD)", name)))
}

fn parse_amount(value: Option<&str>, name: &str) -> Result<Option<Decimal>, AppError> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<Decimal>())
        .transpose()
        .map_err(|_| AppError::bad_request(&format!("Invalid {} (expected a number)", name)))
}

/// GET /api/transactions - List the caller's transactions, newest first
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<TransactionQuery>,
) -> Result<Json<TransactionPage>, AppError> {
    // Input validation: clamp pagination parameters
    let limit = params.limit.clamp(1, MAX_PAGE_LIMIT);
    let page = params.page.max(1);

    let kind = params
        .kind
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.parse::<TransactionKind>())
        .transpose()
        .map_err(|e| AppError::bad_request(&e))?;

    let filter = TransactionFilter::new(&user.id)
        .kind(kind)
        .category(params.category.as_deref())
        .date_range(
            parse_date(params.from.as_deref(), "from")?,
            parse_date(params.to.as_deref(), "to")?,
        )
        .amount_range(
            parse_amount(params.min_amount.as_deref(), "min_amount")?,
            parse_amount(params.max_amount.as_deref(), "max_amount")?,
        );

    let total = state.db.count_transactions(&filter)?;
    let pagination = Pagination::new(total, page, limit);
    let transactions = state
        .db
        .list_transactions(&filter, limit, pagination.offset())?;

    Ok(Json(TransactionPage {
        transactions,
        pagination,
    }))
}

/// POST /api/transactions - Record a transaction (201 Created)
pub async fn create_transaction(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    request: Request,
) -> Result<(StatusCode, Json<Transaction>), AppError> {
    let req: NewTransaction = read_json(request).await?;

    let tx = state.db.insert_transaction(&user.id, &req)?;
    info!(user = %user.id, id = tx.id, kind = %tx.kind, "Transaction created");

    Ok((StatusCode::CREATED, Json(tx)))
}

/// GET /api/transactions/:id - Get a single transaction
pub async fn get_transaction(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<Json<Transaction>, AppError> {
    let tx = state
        .db
        .get_transaction(&user.id, id)?
        .ok_or_else(|| AppError::not_found(&format!("Transaction {} not found", id)))?;

    Ok(Json(tx))
}

/// PUT /api/transactions/:id - Change some fields of a transaction
pub async fn update_transaction(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
    request: Request,
) -> Result<Json<Transaction>, AppError> {
    let update: TransactionUpdate = read_json(request).await?;

    let tx = state
        .db
        .update_transaction(&user.id, id, &update)?
        .ok_or_else(|| AppError::not_found(&format!("Transaction {} not found", id)))?;
    info!(user = %user.id, id, "Transaction updated");

    Ok(Json(tx))
}

/// DELETE /api/transactions/:id - Remove a transaction
pub async fn delete_transaction(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<Json<SuccessResponse>, AppError> {
    if !state.db.delete_transaction(&user.id, id)? {
        return Err(AppError::not_found(&format!("Transaction {} not found", id)));
    }
    info!(user = %user.id, id, "Transaction deleted");

    Ok(Json(SuccessResponse { success: true }))
}
