// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Security Level: None
// Middleware: CORS + request tracing only

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::server::AppState;

/// GET / - service banner
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "VCRS API",
            "version": version,
            "description": "Citizen complaint registration and tracking",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "uploads": "/uploads/:file (public)",
                "complaints": "/api/complaints[/:id[/status]] (protected)",
                "user_complaints": "/api/complaints/user/:id (protected, self or admin)",
            }
        }
    }))
}

/// GET /health - pings the store
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "error": "database unavailable",
                    "code": "SERVICE_UNAVAILABLE",
                    "data": {
                        "status": "degraded",
                        "timestamp": now
                    }
                })),
            )
        }
    }
}
