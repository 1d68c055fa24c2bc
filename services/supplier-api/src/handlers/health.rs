use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use vendora_database::postgres_health_check;

use crate::AppState;

/// GET /api/v1/health/detailed
pub async fn detailed_health_check(State(state): State<AppState>) -> Json<Value> {
    let postgres = match postgres_health_check(&state.pool).await {
        Ok(()) => json!({"status": "healthy", "message": "Connected"}),
        Err(e) => json!({"status": "unhealthy", "message": e.to_string()}),
    };
    let healthy = postgres["status"] == "healthy";

    Json(json!({
        "status": if healthy { "healthy" } else { "degraded" },
        "service": "vendora-supplier-api",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "checks": { "postgres": postgres }
    }))
}
