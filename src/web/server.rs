//! HTTP server for the JSON API.

use super::{categories, projects, todos};
use crate::db::Database;
use crate::score::ScoreConfig;
use axum::routing::{get, put};
use axum::{Json, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct ApiServer {
    db: Arc<Database>,
    /// Fixed scoring constants used by ranked list responses.
    score_config: ScoreConfig,
}

impl ApiServer {
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            db,
            score_config: ScoreConfig::default(),
        }
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    pub fn score_config(&self) -> &ScoreConfig {
        &self.score_config
    }
}

#[derive(serde::Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Assemble the full route table.
pub fn build_router(state: ApiServer) -> Router {
    // Open CORS so a local UI on another port can talk to the API.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/todos", get(todos::list).post(todos::create))
        .route(
            "/api/todos/{id}",
            get(todos::get_one)
                .put(todos::update)
                .patch(todos::patch)
                .delete(todos::remove),
        )
        .route(
            "/api/categories",
            get(categories::list).post(categories::create),
        )
        .route(
            "/api/categories/{name}",
            get(categories::get_one)
                .put(categories::update)
                .delete(categories::remove),
        )
        .route(
            "/api/projects",
            get(projects::list).post(projects::create),
        )
        .route(
            "/api/projects/{id}",
            put(projects::update).delete(projects::remove),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server on the specified port and serve until shutdown.
pub async fn start_server(db: Arc<Database>, port: u16) -> anyhow::Result<()> {
    let app = build_router(ApiServer::new(db));

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("API server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
