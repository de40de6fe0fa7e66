//! Turns a `gateway_stream::OllamaFrame` sequence into the ndjson HTTP body
//! spec §4.3 "Framing" requires: one JSON object per line, `Content-Type:
//! application/x-ndjson`, no SSE prefix. Grounded on
//! `gglib-proxy::ollama_stream::stream_chat_response`'s
//! `Body::from_stream` + `content-type: application/x-ndjson` response,
//! generalized from an SSE-to-ndjson translator to one that frames
//! `OllamaFrame`s already built by `gateway-stream`.
//!
//! Mid-stream errors (spec §4.6 "For streaming endpoints...if the error
//! occurs mid-stream") become a synthetic terminal frame carrying an
//! `error` field rather than aborting the HTTP response, since the 200
//! status and ndjson headers are already committed by the time any bytes
//! have been written.

use axum::body::Body;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use futures::{Stream, StreamExt};

use gateway_core::error::GatewayError;
use gateway_stream::{FrameKind, OllamaFrame};
use gateway_translate::timestamp::rfc3339_now;

/// Builds the synthetic error terminal frame: `done=true`,
/// `done_reason="error"`, plus the `error` field neither `GenerateFrame` nor
/// `ChatFrame` carries on the happy path.
fn error_frame_line(model: &str, kind: FrameKind, err: &GatewayError) -> String {
    let created_at = rfc3339_now();
    let value = match kind {
        FrameKind::Generate => serde_json::json!({
            "model": model,
            "created_at": created_at,
            "response": "",
            "done": true,
            "done_reason": "error",
            "error": err.to_string(),
        }),
        FrameKind::Chat => serde_json::json!({
            "model": model,
            "created_at": created_at,
            "message": { "role": "assistant", "content": "" },
            "done": true,
            "done_reason": "error",
            "error": err.to_string(),
        }),
    };
    let mut line = value.to_string();
    line.push('\n');
    line
}

/// Converts the frame sequence into an infallible byte stream: any
/// mid-stream `GatewayError` is folded into one final ndjson line instead
/// of being propagated as a body error, since hyper has no way to carry a
/// mid-body failure back to an Ollama client that only understands frames.
fn ndjson_bytes(
    model: String,
    kind: FrameKind,
    frames: impl Stream<Item = Result<OllamaFrame, GatewayError>> + Send + 'static,
) -> impl Stream<Item = Result<Bytes, std::convert::Infallible>> {
    async_stream::stream! {
        futures::pin_mut!(frames);

        while let Some(item) = frames.next().await {
            match item {
                Ok(frame) => {
                    if let Ok(line) = frame.to_ndjson_line() {
                        yield Ok(Bytes::from(line));
                    }
                    if frame.is_terminal() {
                        return;
                    }
                }
                Err(err) => {
                    yield Ok(Bytes::from(error_frame_line(&model, kind, &err)));
                    return;
                }
            }
        }
    }
}

/// Builds the full ndjson HTTP response for a streaming `/api/generate` or
/// `/api/chat` call, once the upstream chunk stream has already been
/// opened successfully (a failure to open the stream at all is a
/// pre-stream error handled by the caller via the ordinary Error Mapper).
pub fn ndjson_response(
    model: String,
    kind: FrameKind,
    frames: impl Stream<Item = Result<OllamaFrame, GatewayError>> + Send + 'static,
) -> Response {
    let body = Body::from_stream(ndjson_bytes(model, kind, frames));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/x-ndjson")
        .body(body)
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gateway_core::upstream::{UpstreamChatChunk, UpstreamFinishReason, UpstreamUsage};
    use http_body_util::BodyExt;

    fn chunk(delta: &str) -> Result<UpstreamChatChunk, GatewayError> {
        Ok(UpstreamChatChunk { delta: delta.to_string(), finish_reason: None, usage: None })
    }

    fn terminal() -> Result<UpstreamChatChunk, GatewayError> {
        Ok(UpstreamChatChunk {
            delta: String::new(),
            finish_reason: Some(UpstreamFinishReason::Stop),
            usage: Some(UpstreamUsage { prompt_tokens: 1, completion_tokens: 1 }),
        })
    }

    #[tokio::test]
    async fn emits_newline_terminated_frames_ending_in_done_true() {
        let upstream = futures::stream::iter(vec![chunk("Hi"), terminal()]);
        let frames = gateway_stream::adapt_stream("m".to_string(), FrameKind::Generate, upstream);
        let response = ndjson_response("m".to_string(), FrameKind::Generate, frames);

        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/x-ndjson"
        );

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let text = String::from_utf8(body.to_vec()).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(text.ends_with('\n'));
        assert!(!text.ends_with("\n\n"));

        let last: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(last["done"], true);
    }

    #[tokio::test]
    async fn mid_stream_error_becomes_terminal_error_frame() {
        let upstream = futures::stream::iter(vec![
            chunk("partial"),
            Err::<UpstreamChatChunk, _>(GatewayError::UpstreamTransient),
        ]);
        let frames = gateway_stream::adapt_stream("m".to_string(), FrameKind::Chat, upstream);
        let response = ndjson_response("m".to_string(), FrameKind::Chat, frames);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let text = String::from_utf8(body.to_vec()).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        let last: serde_json::Value = serde_json::from_str(lines.last().unwrap()).unwrap();
        assert_eq!(last["done"], true);
        assert_eq!(last["done_reason"], "error");
        assert!(last["error"].is_string());
    }
}
