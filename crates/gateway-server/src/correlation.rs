//! Correlation-id middleware (spec §2 Correlation Context, §4.1): attaches
//! a `CorrelationId` to every inbound request before any handler runs, and
//! logs one metadata record per request on the way out. Grounded on
//! `agent-server::main`'s `TraceLayer::new_for_http()` span/`on_response`
//! pattern, generalized to inject a correlation id rather than just
//! method/uri/status.
//!
//! Never logs the request or response body (invariant I7 / property P6) —
//! only endpoint, status, duration, and byte count.

use std::time::Instant;

use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use tracing::info;

use gateway_core::CorrelationId;

const REQUEST_ID_HEADER: &str = "x-request-id";

pub async fn correlation_layer(mut req: Request, next: Next) -> Response {
    let correlation_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(CorrelationId::from_caller)
        .unwrap_or_default();

    req.extensions_mut().insert(correlation_id.clone());

    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let start = Instant::now();

    let mut response = next.run(req).await;

    let duration_ms = start.elapsed().as_millis();
    let status = response.status().as_u16();

    info!(
        correlation_id = %correlation_id,
        method = %method,
        path = %path,
        status,
        duration_ms,
        "handled request"
    );

    if let Ok(value) = HeaderValue::from_str(correlation_id.as_str()) {
        response.headers_mut().insert("x-correlation-id", value);
    }

    response
}
