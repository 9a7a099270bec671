use axum::{extract::State, http::StatusCode, response::Json};
use tracing::{instrument, warn};

use crate::schemas::{AppState, HealthResponse};

/// Health check endpoint
#[instrument(skip(state))]
pub async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>, StatusCode> {
    // Test database connection
    let db_status = match state.db.ping().await {
        Ok(_) => "connected".to_string(),
        Err(e) => {
            warn!("Database ping failed: {}", e);
            "disconnected".to_string()
        }
    };

    let response = HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: db_status,
    };

    Ok(Json(response))
}
