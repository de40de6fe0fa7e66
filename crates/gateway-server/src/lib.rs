//! The Request Router (spec §4.1): wires the Translator, Stream Adapter,
//! and Upstream Client behind the four Ollama-compatible endpoints plus
//! the liveness probe and the optional model-management stubs. Exposed as
//! a library, separate from the `gateway-server` binary's `main`, so
//! black-box tests in `tests/` can drive the full `axum::Router` against a
//! fake `UpstreamClient` without spawning a real process.

pub mod correlation;
pub mod error;
pub mod handlers;
pub mod json_extractor;
pub mod state;
pub mod stream_body;
pub mod timings;
pub mod validate;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

pub use state::AppState;

/// Assembles the full route table (spec §6 External Interfaces): the four
/// translated endpoints, the liveness probe, and the optional
/// model-management stubs that only need a static success body.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/tags", get(handlers::tags::tags))
        .route("/api/generate", post(handlers::generate::generate))
        .route("/api/chat", post(handlers::chat::chat))
        .route("/api/embeddings", post(handlers::embed::embed))
        .route("/api/embed", post(handlers::embed::embed))
        .route("/health", get(handlers::stubs::health))
        .route("/api/version", get(handlers::stubs::version))
        .route("/api/pull", post(handlers::stubs::status_ok))
        .route("/api/push", post(handlers::stubs::status_ok))
        .route("/api/delete", post(handlers::stubs::status_ok))
        .route("/api/show", post(handlers::stubs::status_ok))
        .route("/api/copy", post(handlers::stubs::status_ok))
        .route("/api/create", post(handlers::stubs::status_ok))
        .route("/api/ps", get(handlers::stubs::status_ok))
        .layer(axum::middleware::from_fn(correlation::correlation_layer))
        .layer(cors)
        .with_state(state)
}
