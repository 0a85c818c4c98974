use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use super::{parse_param, AppState};
use crate::engine::{
    period_growth, period_profit, portfolio_growth, GrowthPoint, Period, PeriodGrowth,
    PeriodProfit,
};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthQuery {
    pub balance: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthResponse {
    pub points: Vec<GrowthPoint>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodQuery {
    pub period: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodGrowthResponse {
    pub period: Period,
    pub rows: Vec<PeriodGrowth>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodProfitResponse {
    pub period: Period,
    pub rows: Vec<PeriodProfit>,
}

pub async fn get_growth(
    Query(params): Query<GrowthQuery>,
    State(state): State<AppState>,
) -> Result<Json<GrowthResponse>, AppError> {
    let include_balance = parse_param("balance", params.balance.as_deref(), false)?;
    let ledger = state.load_ledger().await?;

    Ok(Json(GrowthResponse {
        points: portfolio_growth(&ledger, include_balance),
    }))
}

pub async fn get_period_growth(
    Query(params): Query<PeriodQuery>,
    State(state): State<AppState>,
) -> Result<Json<PeriodGrowthResponse>, AppError> {
    let period = parse_param("period", params.period.as_deref(), Period::Week)?;
    let ledger = state.load_ledger().await?;

    Ok(Json(PeriodGrowthResponse {
        period,
        rows: period_growth(&ledger, period),
    }))
}

pub async fn get_period_profit(
    Query(params): Query<PeriodQuery>,
    State(state): State<AppState>,
) -> Result<Json<PeriodProfitResponse>, AppError> {
    let period = parse_param("period", params.period.as_deref(), Period::Week)?;
    let ledger = state.load_ledger().await?;

    Ok(Json(PeriodProfitResponse {
        period,
        rows: period_profit(&ledger, period),
    }))
}
