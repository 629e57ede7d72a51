//! Report handlers: monthly summary and yearly overview

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;

use crate::{AppError, AppState, AuthUser};
use tally_core::models::{MonthlyOverview, MonthlySummary};
use tally_core::{parse_optional_month, parse_optional_year};

/// Query parameters for the monthly summary
#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    /// YYYY-MM; defaults to the current month
    pub month: Option<String>,
}

/// Query parameters for the yearly overview
#[derive(Debug, Deserialize)]
pub struct OverviewQuery {
    /// YYYY; defaults to the current year
    pub year: Option<String>,
}

/// GET /api/summary - Totals, budget utilization and category breakdown
pub async fn monthly_summary(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<SummaryQuery>,
) -> Result<Json<MonthlySummary>, AppError> {
    // Reject malformed tokens before touching the store
    let month = parse_optional_month(params.month.as_deref())?;

    let summary = state.engine.monthly_summary(&user.id, month).await?;
    Ok(Json(summary))
}

/// GET /api/summary/monthly - Twelve month rows for a year, January first
pub async fn yearly_overview(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<OverviewQuery>,
) -> Result<Json<Vec<MonthlyOverview>>, AppError> {
    let year = parse_optional_year(params.year.as_deref())?;

    let overview = state.engine.yearly_overview(&user.id, year).await?;
    Ok(Json(overview))
}
