use axum::extract::State;
use axum::Json;
use serde::Serialize;

use super::AppState;
use crate::engine::{daily_summary, total_summary, DailySummary, TotalSummary};
use crate::error::AppError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub daily: DailySummary,
    pub total: TotalSummary,
}

pub async fn get_summary(State(state): State<AppState>) -> Result<Json<SummaryResponse>, AppError> {
    let ledger = state.load_ledger().await?;

    Ok(Json(SummaryResponse {
        daily: daily_summary(&ledger),
        total: total_summary(&ledger),
    }))
}
