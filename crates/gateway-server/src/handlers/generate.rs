//! `POST /api/generate` (spec §4.1, §4.2.2, §4.2.5, §4.3).

use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;

use gateway_stream::{adapt_stream, FrameKind};
use gateway_translate::{build_generate_response, translate_generate};

use crate::error::AppError;
use crate::json_extractor::Json as ValidatedJson;
use crate::state::AppState;
use crate::stream_body::ndjson_response;
use crate::timings::approximate as approximate_timings;
use crate::validate::validate_generate;

pub async fn generate(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<gateway_core::wire::GenerateRequest>,
) -> Result<Response, AppError> {
    validate_generate(&req)?;
    let params = translate_generate(&req);

    if req.stream {
        let chunks = state.upstream.chat_stream(&params).await?;
        let frames = adapt_stream(req.model.clone(), FrameKind::Generate, chunks);
        Ok(ndjson_response(req.model, FrameKind::Generate, frames))
    } else {
        let start = Instant::now();
        let result = state.upstream.chat(&params).await?;
        let timings = approximate_timings(start.elapsed());
        let body = build_generate_response(&req.model, &result, timings);
        Ok(Json(body).into_response())
    }
}
