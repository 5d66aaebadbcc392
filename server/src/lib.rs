//! HTTP front end for the GLEIF registry proxy.
//! Routes: `GET /health`, `GET /`, `GET /lei-records`, `GET /lei-records/{lei}`,
//! `GET /lei-records/fuzzy-completions`, `GET /countries`.

use std::sync::Arc;

use axum::{routing::get, Router};
use gleif_core::Registry;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod error;
pub mod handlers;

pub use config::{Config, ConfigError};
pub use error::ApiError;

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<dyn Registry>,
}

impl AppState {
    pub fn new(registry: Arc<dyn Registry>) -> Self {
        Self { registry }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/lei-records", get(handlers::list_lei_records))
        .route(
            "/lei-records/fuzzy-completions",
            get(handlers::fuzzy_completions),
        )
        .route("/lei-records/{lei}", get(handlers::get_lei_record))
        .route("/countries", get(handlers::list_countries))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    axum::serve(listener, app(state)).await
}
