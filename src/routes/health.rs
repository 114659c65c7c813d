use crate::{AppState, db};
use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;

/// GET /health
/// Response: 200 OK with JSON, or 503 when the database does not answer
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    let (status, label) = match db::ping(state.posts.store().pool()).await {
        Ok(()) => (StatusCode::OK, "healthy"),
        Err(_) => (StatusCode::SERVICE_UNAVAILABLE, "unhealthy"),
    };

    (
        status,
        Json(serde_json::json!({
          "status": label,
          "timestamp": Utc::now().timestamp()
        })),
    )
}
