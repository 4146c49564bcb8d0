use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method},
    response::Json,
    routing::get,
    serve, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use trimflow_utils::{init_logging, AppConfig};

mod error;
mod handlers;
mod middleware;
mod routes;
mod store;

use middleware::request_id_middleware;
use store::SpecRepository;

/// Workflow documents keyed by workflow id. Lost on restart.
pub type WorkflowStore = Arc<RwLock<HashMap<String, Value>>>;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub workflows: WorkflowStore,
    pub specs: SpecRepository,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            workflows: Arc::new(RwLock::new(HashMap::new())),
            specs: SpecRepository::new(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load().unwrap_or_else(|_| {
        eprintln!("Failed to load configuration, using defaults");
        AppConfig::default()
    });

    init_logging(&config.logging)?;
    info!("Starting Trimflow spec API");

    let addr = config.bind_address();
    let app = create_app(AppState::new(config));

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Spec API listening on {}", addr);

    serve(listener, app).await?;

    Ok(())
}

pub fn create_app(state: AppState) -> Router {
    let max_request_size = state.config.server.max_request_size;

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", routes::create_api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods([Method::GET, Method::POST, Method::DELETE])
                        .allow_headers([header::CONTENT_TYPE])
                        .expose_headers([header::CONTENT_DISPOSITION]),
                )
                .layer(DefaultBodyLimit::max(max_request_size))
                .layer(axum::middleware::from_fn(request_id_middleware)),
        )
        .with_state(state)
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "trimflow-spec-api",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}
