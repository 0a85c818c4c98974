pub mod growth;
pub mod health;
pub mod pips;
pub mod refresh;
pub mod summary;
pub mod trades;

use crate::domain::Ledger;
use crate::engine::PipTable;
use crate::error::AppError;
use crate::ledger::read_snapshot;
use crate::orchestration::Refresher;
use axum::{
    routing::{get, post},
    Router,
};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub snapshot_path: PathBuf,
    pub pip_table: Arc<PipTable>,
    pub refresher: Arc<Refresher>,
}

impl AppState {
    pub fn new(pip_table: PipTable, refresher: Refresher) -> Self {
        Self {
            snapshot_path: refresher.snapshot_path().clone(),
            pip_table: Arc::new(pip_table),
            refresher: Arc::new(refresher),
        }
    }

    /// Read the current snapshot. Every request sees whatever the last
    /// successful refresh wrote.
    pub async fn load_ledger(&self) -> Result<Ledger, AppError> {
        let path = self.snapshot_path.clone();
        let ledger = tokio::task::spawn_blocking(move || read_snapshot(&path))
            .await
            .map_err(|e| AppError::Internal(format!("snapshot reader panicked: {}", e)))??;
        Ok(ledger)
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/v1/summary", get(summary::get_summary))
        .route("/v1/growth", get(growth::get_growth))
        .route("/v1/period-growth", get(growth::get_period_growth))
        .route("/v1/period-profit", get(growth::get_period_profit))
        .route("/v1/trades", get(trades::get_trades))
        .route("/v1/symbols", get(trades::get_symbols))
        .route("/v1/pips", get(pips::get_pips))
        .route("/v1/refresh", post(refresh::post_refresh))
        .layer(cors)
        .with_state(state)
}

/// Parse an optional query value, falling back to `default` when absent.
pub(crate) fn parse_param<T>(
    name: &str,
    value: Option<&str>,
    default: T,
) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        None => Ok(default),
        Some(raw) => raw
            .parse::<T>()
            .map_err(|e| AppError::BadRequest(format!("invalid {}: {}", name, e))),
    }
}
