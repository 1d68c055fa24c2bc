use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method},
    response::Json,
    routing::get,
    serve, Router,
};
use serde_json::json;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use vendora_database::{initialize_database, PostgresPool};
use vendora_utils::{init_logging, AppConfig};

mod error;
mod handlers;
mod middleware;
mod routes;
mod service;

use middleware::request_id_middleware;
use service::SupplierService;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = AppConfig::load().unwrap_or_else(|_| {
        eprintln!("Failed to load configuration, using defaults");
        AppConfig::default()
    });

    // Initialize logging
    init_logging(&config.logging)?;
    info!("Starting Vendora Supplier Directory API");

    // Connect and migrate the database
    let db_config = vendora_database::DatabaseConfig {
        postgres_url: config.database.postgres_url.clone(),
        max_connections: config.database.max_connections,
        connection_timeout: Duration::from_secs(config.database.connection_timeout_seconds),
    };
    let pool = initialize_database(&db_config).await?;
    info!("Database connection established");

    // Build application router
    let app = create_app(pool, &config);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    let listener = TcpListener::bind(&addr).await?;
    info!("Supplier API listening on {}", addr);

    serve(listener, app).await?;

    Ok(())
}

fn create_app(pool: PostgresPool, config: &AppConfig) -> Router {
    let state = AppState {
        service: SupplierService::new(pool.clone()),
        pool,
        config: config.clone(),
    };

    Router::new()
        // Health check and metrics endpoints
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        // API routes
        .nest("/api/v1", routes::create_api_routes())
        // Middleware stack
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
                )
                .layer(DefaultBodyLimit::max(config.server.max_request_size))
                .layer(axum::middleware::from_fn(request_id_middleware)),
        )
        .with_state(state)
}

#[derive(Clone)]
pub struct AppState {
    pub service: SupplierService,
    pub pool: PostgresPool,
    pub config: AppConfig,
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "service": "vendora-supplier-api",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn metrics_handler() -> String {
    use prometheus::TextEncoder;

    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    encoder
        .encode_to_string(&metric_families)
        .unwrap_or_else(|_| "Error encoding metrics".to_string())
}
