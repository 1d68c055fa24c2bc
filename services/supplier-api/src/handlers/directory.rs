//! Category and tag directory handlers.
//!
//! The directories are projections over the live supplier collection;
//! rename and delete cascade across every holder and report how many
//! records the pass rewrote.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};

use vendora_models::DirectoryEntry;

use crate::error::ApiResult;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct AddRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct RenameRequest {
    pub new_name: String,
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<DirectoryEntry>,
}

#[derive(Debug, Serialize)]
pub struct TagsResponse {
    pub tags: Vec<DirectoryEntry>,
}

#[derive(Debug, Serialize)]
pub struct EntryResponse {
    pub message: String,
    pub entry: DirectoryEntry,
}

#[derive(Debug, Serialize)]
pub struct CascadeResponse {
    pub message: String,
    pub updated: u64,
}

/// GET /api/v1/suppliers/categories
pub async fn list_categories(State(state): State<AppState>) -> ApiResult<Json<CategoriesResponse>> {
    let categories = state.service.categories().await?;
    Ok(Json(CategoriesResponse { categories }))
}

/// POST /api/v1/suppliers/categories
pub async fn add_category(
    State(state): State<AppState>,
    Json(request): Json<AddRequest>,
) -> ApiResult<(StatusCode, Json<EntryResponse>)> {
    let entry = state.service.add_category(&request.name).await?;
    Ok((
        StatusCode::CREATED,
        Json(EntryResponse {
            message: "Category added successfully".to_string(),
            entry,
        }),
    ))
}

/// PUT /api/v1/suppliers/categories/:name
pub async fn rename_category(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(request): Json<RenameRequest>,
) -> ApiResult<Json<CascadeResponse>> {
    let updated = state.service.rename_category(&name, &request.new_name).await?;
    Ok(Json(CascadeResponse {
        message: "Category renamed successfully".to_string(),
        updated,
    }))
}

/// DELETE /api/v1/suppliers/categories/:name
pub async fn delete_category(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<CascadeResponse>> {
    let updated = state.service.delete_category(&name).await?;
    Ok(Json(CascadeResponse {
        message: "Category deleted successfully".to_string(),
        updated,
    }))
}

/// GET /api/v1/suppliers/tags
pub async fn list_tags(State(state): State<AppState>) -> ApiResult<Json<TagsResponse>> {
    let tags = state.service.tags().await?;
    Ok(Json(TagsResponse { tags }))
}

/// POST /api/v1/suppliers/tags
pub async fn add_tag(
    State(state): State<AppState>,
    Json(request): Json<AddRequest>,
) -> ApiResult<(StatusCode, Json<EntryResponse>)> {
    let entry = state.service.add_tag(&request.name).await?;
    Ok((
        StatusCode::CREATED,
        Json(EntryResponse {
            message: "Tag added successfully".to_string(),
            entry,
        }),
    ))
}

/// PUT /api/v1/suppliers/tags/:name
pub async fn rename_tag(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(request): Json<RenameRequest>,
) -> ApiResult<Json<CascadeResponse>> {
    let updated = state.service.rename_tag(&name, &request.new_name).await?;
    Ok(Json(CascadeResponse {
        message: "Tag renamed successfully".to_string(),
        updated,
    }))
}

/// DELETE /api/v1/suppliers/tags/:name
pub async fn delete_tag(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<CascadeResponse>> {
    let updated = state.service.delete_tag(&name).await?;
    Ok(Json(CascadeResponse {
        message: "Tag deleted successfully".to_string(),
        updated,
    }))
}
