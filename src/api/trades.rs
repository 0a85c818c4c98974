use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use super::{parse_param, AppState};
use crate::engine::{
    daily_trade_counts, latest_day_distribution, symbol_distribution, trade_count,
    DailyTradeCount, DistributionScope, SymbolCount,
};
use crate::error::AppError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradesResponse {
    pub total: usize,
    pub daily: Vec<DailyTradeCount>,
}

/// `all` and `daily` map onto the engine scopes; `latest` is the daily
/// distribution narrowed to its most recent day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolScope {
    All,
    Daily,
    Latest,
}

impl std::str::FromStr for SymbolScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(SymbolScope::All),
            "daily" => Ok(SymbolScope::Daily),
            "latest" => Ok(SymbolScope::Latest),
            other => Err(format!("unknown scope: {}", other)),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolsQuery {
    pub scope: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolsResponse {
    pub scope: SymbolScope,
    pub symbols: Vec<SymbolCount>,
}

pub async fn get_trades(State(state): State<AppState>) -> Result<Json<TradesResponse>, AppError> {
    let ledger = state.load_ledger().await?;

    Ok(Json(TradesResponse {
        total: trade_count(&ledger),
        daily: daily_trade_counts(&ledger),
    }))
}

pub async fn get_symbols(
    Query(params): Query<SymbolsQuery>,
    State(state): State<AppState>,
) -> Result<Json<SymbolsResponse>, AppError> {
    let scope = parse_param("scope", params.scope.as_deref(), SymbolScope::All)?;
    let ledger = state.load_ledger().await?;

    let symbols = match scope {
        SymbolScope::All => symbol_distribution(&ledger, DistributionScope::All),
        SymbolScope::Daily => symbol_distribution(&ledger, DistributionScope::Daily),
        SymbolScope::Latest => {
            latest_day_distribution(&symbol_distribution(&ledger, DistributionScope::Daily))
        }
    };

    Ok(Json(SymbolsResponse { scope, symbols }))
}
