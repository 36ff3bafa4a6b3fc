use axum::{
    Json,
    extract::{Query, State},
};
use std::sync::Arc;
use tutordesk_core::{
    errors::DeskError,
    models::report::{FinancialReport, FinancialReportRequest},
};

use crate::{ApiState, middleware::error_handling::AppError};

/// Date-ranged financial summary: lesson count, revenue, teacher cost, and
/// the resulting profit. Inclusive on both ends of the range.
#[axum::debug_handler]
pub async fn financial_report(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<FinancialReportRequest>,
) -> Result<Json<FinancialReport>, AppError> {
    if query.start_date > query.end_date {
        return Err(AppError(DeskError::Validation(
            "start_date must not be after end_date".to_string(),
        )));
    }

    let summary = tutordesk_db::repositories::report::financial_summary(
        &state.db_pool,
        query.start_date,
        query.end_date,
    )
    .await
    .map_err(DeskError::Database)?;

    Ok(Json(FinancialReport {
        total_lessons: summary.total_lessons,
        revenue: summary.revenue,
        teacher_cost: summary.teacher_cost,
        profit: summary.revenue - summary.teacher_cost,
    }))
}
