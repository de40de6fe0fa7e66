//! `GET /health` plus the optional model-management endpoints named in
//! spec §1/§6 (`/api/pull`, `/api/push`, `/api/delete`, `/api/show`,
//! `/api/copy`, `/api/create`, `/api/ps`, `/api/version`), which this
//! gateway doesn't implement (no local model storage) but still answers
//! with the static success-shaped bodies real Ollama clients expect so
//! they don't treat a 404 as a hard failure. Grounded on
//! `gglib-proxy::ollama_handlers`'s `ollama_pull`/`ollama_delete` stubs,
//! generalized from a 404-with-guidance shape to the plain
//! `{"status":"success"}` body spec §6 specifies.

use axum::response::IntoResponse;
use axum::Json;

use gateway_core::wire::{HealthBody, StatusBody, VersionBody};

const GATEWAY_VERSION: &str = env!("CARGO_PKG_VERSION");

pub async fn health() -> impl IntoResponse {
    Json(HealthBody::default())
}

pub async fn status_ok() -> impl IntoResponse {
    Json(StatusBody { status: "success".to_string() })
}

pub async fn version() -> impl IntoResponse {
    Json(VersionBody { version: GATEWAY_VERSION.to_string() })
}
