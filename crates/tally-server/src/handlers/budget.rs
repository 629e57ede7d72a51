//! Budget handlers

use std::sync::Arc;

use axum::{
    extract::{Query, Request, State},
    Extension, Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;

use crate::{read_json, AppError, AppState, AuthUser};
use tally_core::models::Budget;
use tally_core::{parse_optional_month, Month};

/// Query parameters for fetching a budget
#[derive(Debug, Deserialize)]
pub struct BudgetQuery {
    /// YYYY-MM; defaults to the current month
    pub month: Option<String>,
}

/// Request body for setting a budget
#[derive(Debug, Deserialize)]
pub struct SetBudgetRequest {
    pub month: String,
    pub amount: Decimal,
}

/// GET /api/budget - The caller's budget for a month
pub async fn get_budget(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<BudgetQuery>,
) -> Result<Json<Budget>, AppError> {
    let month = parse_optional_month(params.month.as_deref())?;
    let month = state.engine.periods().month(month);

    let budget = state
        .db
        .get_budget(&user.id, month)?
        .ok_or_else(|| AppError::not_found(&format!("No budget set for {}", month)))?;

    Ok(Json(budget))
}

/// POST /api/budget - Create or replace the budget for a month
pub async fn set_budget(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    request: Request,
) -> Result<Json<Budget>, AppError> {
    let req: SetBudgetRequest = read_json(request).await?;
    let month: Month = req.month.trim().parse()?;

    let budget = state.db.set_budget(&user.id, month, req.amount)?;
    info!(user = %user.id, month = %month, amount = %budget.amount, "Budget set");

    Ok(Json(budget))
}

/// GET /api/budget/history - All of the caller's budgets, newest month first
pub async fn budget_history(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Budget>>, AppError> {
    let budgets = state.db.budget_history(&user.id)?;
    Ok(Json(budgets))
}
