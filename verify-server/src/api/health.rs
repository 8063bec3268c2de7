//! Health check endpoint

use axum::{Json, extract::State};

use crate::state::AppState;

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    let db_ok = state.pool.acquire().await.is_ok();
    let status = if db_ok { "ok" } else { "degraded" };
    Json(serde_json::json!({
        "status": status,
        "db": db_ok
    }))
}
