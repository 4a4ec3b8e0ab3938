//! # Formcraft - JSON form definition authoring
//!
//! Hosts the Formcraft authoring UI: a JSON editor pane that validates a form
//! definition on every keystroke next to a live, interactive preview of the
//! form. Validation and rendering rules live in `formcraft-core`; this crate
//! serves the compiled UI and exposes the same validator over HTTP and CLI.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use formcraft::config::Settings;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::new()?;
//!     let listener = tokio::net::TcpListener::bind(settings.address()).await?;
//!     axum::serve(listener, formcraft::create_app()).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Endpoints
//!
//! - `/health`, `/health/ready`, `/health/live`
//! - `/api/schema/sample`, `/api/schema/validate`, `/api/schema/format`
//! - everything else: the embedded single-page UI

pub mod adapters;
pub mod cli;
pub mod commands;
pub mod config;

use crate::adapters::health_handler::HealthHandler;
use crate::adapters::schema_handler;
use crate::adapters::ui_handler::UIHandler;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Creates the Axum application router with all endpoints configured.
pub fn create_app() -> Router {
    let health_handler = Arc::new(HealthHandler::new(UIHandler::is_available()));

    let health_router = Router::new()
        .route("/health", get({
            let handler = health_handler.clone();
            move || {
                let h = handler.clone();
                async move { h.health().await }
            }
        }))
        .route("/health/ready", get({
            let handler = health_handler.clone();
            move || {
                let h = handler.clone();
                async move { h.ready().await }
            }
        }))
        .route("/health/live", get({
            let handler = health_handler.clone();
            move || {
                let h = handler.clone();
                async move { h.live().await }
            }
        }));

    let api_router = Router::new()
        .route("/schema/sample", get(schema_handler::sample))
        .route("/schema/validate", post(schema_handler::validate))
        .route("/schema/format", post(schema_handler::format));

    health_router
        .nest("/api", api_router)
        // UI endpoint (catch-all for the single page app)
        .fallback(UIHandler::serve)
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
}
