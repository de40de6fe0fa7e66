use thiserror::Error;

/// The failure taxonomy named in the gateway's error-handling design: every
/// failure raised anywhere in the pipeline is one of these kinds. Only the
/// Error Mapper (in `gateway-server`) ever turns a `GatewayError` into an
/// HTTP status code and body; everywhere else it is just a value.
#[derive(Error, Debug, Clone)]
pub enum GatewayError {
    #[error("request shape error: {0}")]
    RequestShape(String),

    #[error("unauthorized")]
    Authentication,

    #[error("model '{0}' not found")]
    NotFound(String),

    #[error("rate limit exceeded")]
    RateLimit,

    #[error("upstream error")]
    UpstreamTransient,

    #[error("upstream error")]
    UpstreamFatal,

    #[error("upstream timeout")]
    Timeout,

    #[error("client closed request")]
    Cancelled,

    #[error("internal error")]
    Internal(String),
}

impl GatewayError {
    /// True for failure classes the Upstream Client's retry loop should
    /// attempt again: upstream 5xx, 429, connect error, read timeout.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GatewayError::UpstreamTransient | GatewayError::RateLimit | GatewayError::Timeout
        )
    }
}
