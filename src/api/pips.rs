use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use super::{parse_param, AppState};
use crate::engine::{latest_pip_growth, pip_growth, PipGrowth};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipsQuery {
    pub latest: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipsResponse {
    pub rows: Vec<PipGrowth>,
}

pub async fn get_pips(
    Query(params): Query<PipsQuery>,
    State(state): State<AppState>,
) -> Result<Json<PipsResponse>, AppError> {
    let latest = parse_param("latest", params.latest.as_deref(), false)?;
    let ledger = state.load_ledger().await?;

    let rows = pip_growth(&ledger, &state.pip_table);
    let rows = if latest {
        latest_pip_growth(&rows)
    } else {
        rows
    };

    Ok(Json(PipsResponse { rows }))
}
