//! Stats handler.

use axum::{extract::State, response::Json};

use vendora_models::SupplierStats;

use crate::error::ApiResult;
use crate::AppState;

/// GET /api/v1/suppliers/stats
pub async fn get_stats(State(state): State<AppState>) -> ApiResult<Json<SupplierStats>> {
    let stats = state.service.stats().await?;
    Ok(Json(stats))
}
