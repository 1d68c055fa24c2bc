//! Supplier CRUD and listing handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use vendora_models::{ListQuery, SortField, SortOrder, Supplier, SupplierDraft, SupplierPatch, SupplierStats};
use vendora_utils::VendoraError;

use crate::error::ApiResult;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub search: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,
    pub tag: Option<String>,
    pub part: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

impl ListParams {
    fn into_query(self) -> Result<ListQuery, VendoraError> {
        let sort_by = match self.sort_by.as_deref().map(str::trim) {
            None | Some("") => SortField::default(),
            Some(value) => value
                .parse()
                .map_err(|message: String| VendoraError::validation("sort_by", message))?,
        };
        let sort_order = match self.sort_order.as_deref().map(str::trim) {
            None | Some("") => SortOrder::default(),
            Some(value) => value
                .parse()
                .map_err(|message: String| VendoraError::validation("sort_order", message))?,
        };
        Ok(ListQuery {
            search: self.search,
            status: self.status,
            category: self.category,
            tag: self.tag,
            part: self.part,
            sort_by,
            sort_order,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub suppliers: Vec<Supplier>,
    pub stats: SupplierStats,
}

/// GET /api/v1/suppliers
pub async fn list_suppliers(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<ListResponse>> {
    let query = params.into_query()?;
    let (suppliers, stats) = state.service.list(query).await?;
    Ok(Json(ListResponse { suppliers, stats }))
}

#[derive(Debug, Serialize)]
pub struct SupplierEnvelope {
    pub message: String,
    pub supplier: Supplier,
}

/// POST /api/v1/suppliers
pub async fn create_supplier(
    State(state): State<AppState>,
    Json(draft): Json<SupplierDraft>,
) -> ApiResult<(StatusCode, Json<SupplierEnvelope>)> {
    let supplier = state.service.create(draft).await?;
    Ok((
        StatusCode::CREATED,
        Json(SupplierEnvelope {
            message: "Supplier created successfully".to_string(),
            supplier,
        }),
    ))
}

#[derive(Debug, Serialize)]
pub struct SupplierBody {
    pub supplier: Supplier,
}

/// GET /api/v1/suppliers/:id
pub async fn get_supplier(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SupplierBody>> {
    let supplier = state.service.get(id).await?;
    Ok(Json(SupplierBody { supplier }))
}

/// PUT /api/v1/suppliers/:id
pub async fn update_supplier(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<SupplierPatch>,
) -> ApiResult<Json<SupplierEnvelope>> {
    let supplier = state.service.update(id, patch).await?;
    Ok(Json(SupplierEnvelope {
        message: "Supplier updated successfully".to_string(),
        supplier,
    }))
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// DELETE /api/v1/suppliers/:id
pub async fn delete_supplier(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    state.service.delete(id).await?;
    Ok(Json(MessageResponse {
        message: "Supplier deleted successfully".to_string(),
    }))
}
