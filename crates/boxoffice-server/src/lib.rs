//! Boxoffice Server - Movie Revenue Predictor
//!
//! Serves the prediction form and a small JSON API over the shared,
//! read-only [`RevenuePredictor`].

pub mod http;
pub mod page;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use thiserror::Error;
use tower_http::trace::TraceLayer;

use boxoffice_core::{BoxofficeConfig, BoxofficeError, RevenuePredictor};

/// Errors that stop the server
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] BoxofficeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shared application state
///
/// Built once at startup and never mutated, so handlers read it without
/// locking.
pub struct AppState {
    pub predictor: RevenuePredictor,
    pub config: BoxofficeConfig,
}

impl AppState {
    pub fn new(predictor: RevenuePredictor, config: BoxofficeConfig) -> Self {
        Self { predictor, config }
    }

    /// Load the model artifact named in `config`
    ///
    /// A missing or invalid artifact is logged and leaves the predictor in
    /// the unavailable state; the server still starts.
    pub fn from_config(config: BoxofficeConfig) -> Self {
        let predictor = RevenuePredictor::from_config(&config);
        Self::new(predictor, config)
    }
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Form
        .route("/", get(http::show_form))
        .route("/", post(http::submit_form))
        // JSON API
        .route("/api/predict", post(http::predict))
        .route("/api/choices", get(http::list_choices))
        // System endpoints
        .route("/status", get(http::get_status))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server
pub async fn serve(addr: &str, state: Arc<AppState>) -> Result<(), ServerError> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Boxoffice server listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
