use axum::extract::State;
use axum::Json;

use super::AppState;

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Ready once a snapshot exists to serve from.
pub async fn ready(State(state): State<AppState>) -> Json<serde_json::Value> {
    let snapshot = tokio::fs::try_exists(&state.snapshot_path)
        .await
        .unwrap_or(false);
    let status = if snapshot { "ready" } else { "waiting" };
    Json(serde_json::json!({"status": status, "snapshot": snapshot}))
}
