use axum::extract::State;
use axum::Json;
use tracing::warn;

use super::AppState;
use crate::error::AppError;
use crate::orchestration::RefreshReport;

/// Re-extract the ledger and rewrite the snapshot. On failure the previous
/// snapshot keeps serving.
pub async fn post_refresh(State(state): State<AppState>) -> Result<Json<RefreshReport>, AppError> {
    match state.refresher.refresh().await {
        Ok(report) => Ok(Json(report)),
        Err(e) => {
            warn!("Refresh failed: {}", e);
            Err(e.into())
        }
    }
}
