//! `POST /api/embeddings` and `POST /api/embed` (spec §4.1, §4.2.4) — both
//! paths share one handler since spec §4.1 calls their behavior identical.

use std::sync::Arc;

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;

use gateway_translate::{build_embed_response, translate_embed};

use crate::error::AppError;
use crate::json_extractor::Json as ValidatedJson;
use crate::state::AppState;
use crate::validate::validate_embed;

pub async fn embed(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<gateway_core::wire::EmbedRequest>,
) -> Result<Response, AppError> {
    validate_embed(&req)?;

    let params = translate_embed(&req);
    let result = state.upstream.embed(&params).await?;
    let body = build_embed_response(result.embedding);

    Ok(Json(body).into_response())
}
