//! Voice-navigation gateway: relays chat turns to a local Ollama model and turns
//! spoken browser commands into structured function calls.

pub mod api;
pub mod config;
pub mod connectors;
pub mod core;
pub mod metrics;
pub mod observability;
pub mod routing;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn app(state: routing::AppState) -> Router {
    Router::new()
        .route("/", get(api::health::health_check))
        .route("/chat", post(api::chat::chat))
        .route("/parse-command", post(api::command::parse_command))
        .route("/metrics", get(metrics::metrics_handler))
        .with_state(state)
        // any origin, method and header; credentials allowed
        .layer(CorsLayer::very_permissive())
        .layer(TraceLayer::new_for_http())
}
