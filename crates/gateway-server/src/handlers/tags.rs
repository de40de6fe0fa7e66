//! `GET /api/tags` (spec §4.1, §4.2.1).

use std::sync::Arc;

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;

use gateway_translate::translate_tags;

use crate::error::AppError;
use crate::state::AppState;

pub async fn tags(State(state): State<Arc<AppState>>) -> Result<Response, AppError> {
    let models = state.upstream.list_models().await?;
    let body = translate_tags(&models);

    Ok((
        [(header::CACHE_CONTROL, "public, max-age=300")],
        Json(body),
    )
        .into_response())
}
