use axum::{
    routing::{get, put},
    Router,
};

use crate::{handlers::*, AppState};

pub fn create_api_routes() -> Router<AppState> {
    Router::new()
        .route("/health/detailed", get(detailed_health_check))
        .route("/suppliers", get(list_suppliers).post(create_supplier))
        .route("/suppliers/stats", get(get_stats))
        .route(
            "/suppliers/categories",
            get(list_categories).post(add_category),
        )
        .route(
            "/suppliers/categories/:name",
            put(rename_category).delete(delete_category),
        )
        .route("/suppliers/tags", get(list_tags).post(add_tag))
        .route("/suppliers/tags/:name", put(rename_tag).delete(delete_tag))
        .route(
            "/suppliers/:id",
            get(get_supplier).put(update_supplier).delete(delete_supplier),
        )
}
