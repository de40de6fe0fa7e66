//! The Error Mapper (spec §4.6): the single place a `GatewayError` becomes
//! an HTTP status code and an `ErrorBody`. Everywhere else in the pipeline
//! a failure is just a value, per spec §7's propagation policy. Grounded on
//! `fissio-server::error::AppError`'s `IntoResponse` impl, generalized from
//! three variants to the full taxonomy spec §4.6 names.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use gateway_core::error::GatewayError;
use gateway_core::wire::ErrorBody;

/// Newtype so this crate, not `gateway-core`, owns the HTTP mapping —
/// `GatewayError` itself stays framework-agnostic.
pub struct AppError(pub GatewayError);

impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        AppError(err)
    }
}

/// Maps a `GatewayError` onto `(StatusCode, error text)`, per the table in
/// spec §4.6.
pub fn status_and_message(err: &GatewayError) -> (StatusCode, String) {
    match err {
        GatewayError::RequestShape(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        GatewayError::Authentication => (StatusCode::UNAUTHORIZED, "unauthorized".to_string()),
        GatewayError::NotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
        GatewayError::RateLimit => (StatusCode::TOO_MANY_REQUESTS, "rate limit exceeded".to_string()),
        GatewayError::UpstreamTransient | GatewayError::UpstreamFatal => {
            (StatusCode::BAD_GATEWAY, "upstream error".to_string())
        }
        GatewayError::Timeout => (StatusCode::GATEWAY_TIMEOUT, "upstream timeout".to_string()),
        GatewayError::Cancelled => {
            (StatusCode::from_u16(499).unwrap_or(StatusCode::BAD_REQUEST), "client closed request".to_string())
        }
        GatewayError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string()),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = status_and_message(&self.0);
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_carries_model_id() {
        let (status, message) = status_and_message(&GatewayError::NotFound("gpt-9".to_string()));
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(message, "model 'gpt-9' not found");
    }

    #[test]
    fn rate_limit_maps_to_429() {
        let (status, message) = status_and_message(&GatewayError::RateLimit);
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(message, "rate limit exceeded");
    }

    #[test]
    fn timeout_maps_to_504() {
        let (status, _) = status_and_message(&GatewayError::Timeout);
        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    }

    #[test]
    fn cancelled_maps_to_499() {
        let (status, message) = status_and_message(&GatewayError::Cancelled);
        assert_eq!(status.as_u16(), 499);
        assert_eq!(message, "client closed request");
    }

    #[test]
    fn upstream_fatal_and_transient_both_surface_as_bad_gateway() {
        assert_eq!(status_and_message(&GatewayError::UpstreamFatal).0, StatusCode::BAD_GATEWAY);
        assert_eq!(status_and_message(&GatewayError::UpstreamTransient).0, StatusCode::BAD_GATEWAY);
    }
}
