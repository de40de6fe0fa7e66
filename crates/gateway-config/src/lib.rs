//! Typed application configuration, built once at process startup from
//! environment variables and passed by reference into the Upstream Client
//! and Router. Never read from the environment again inside a request.

use std::env;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while loading configuration from the environment.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {value:?} ({reason})")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// The logging verbosity, mirrored onto `tracing_subscriber::EnvFilter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_uppercase().as_str() {
            "DEBUG" => Some(Self::Debug),
            "INFO" => Some(Self::Info),
            "WARNING" => Some(Self::Warning),
            "ERROR" => Some(Self::Error),
            "CRITICAL" => Some(Self::Critical),
            _ => None,
        }
    }

    /// The `tracing`/`EnvFilter` directive this level maps onto. `WARNING`
    /// and `CRITICAL` aren't native tracing levels; they collapse onto the
    /// nearest one tracing does support.
    pub fn as_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            LogLevel::Error => "error",
            LogLevel::Critical => "error",
        }
    }
}

/// Default request timeout (seconds) for unary upstream calls, per spec §4.4.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
/// Default deadline (seconds) bounding the entire lifetime of a streaming
/// upstream call, per spec §4.4 / §5. Not independently configurable via
/// the environment — only `REQUEST_TIMEOUT` is an external input.
pub const DEFAULT_STREAM_TIMEOUT_SECS: u64 = 300;
const DEFAULT_PORT: u16 = 11434;
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Application configuration, immutable after construction.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub api_base_url: String,
    pub port: u16,
    pub log_level: LogLevel,
    pub request_timeout: Duration,
    pub stream_timeout: Duration,
}

impl Config {
    /// Loads configuration from process environment variables, applying
    /// the defaults and validation ranges documented in spec §6. Does not
    /// consult `.env` itself — callers load that first (e.g. via
    /// `dotenvy::dotenv()`) so this function sees a flat environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var("OPENAI_API_KEY").map_err(|_| ConfigError::Missing("OPENAI_API_KEY"))?;
        if api_key.trim().is_empty() {
            return Err(ConfigError::Missing("OPENAI_API_KEY"));
        }

        let api_base_url = env::var("OPENAI_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let port = match env::var("PROXY_PORT") {
            Ok(raw) => {
                let parsed: u32 = raw.parse().map_err(|_| ConfigError::Invalid {
                    name: "PROXY_PORT",
                    value: raw.clone(),
                    reason: "not an integer".into(),
                })?;
                if parsed == 0 || parsed > 65535 {
                    return Err(ConfigError::Invalid {
                        name: "PROXY_PORT",
                        value: raw,
                        reason: "must be in range 1-65535".into(),
                    });
                }
                parsed as u16
            }
            Err(_) => DEFAULT_PORT,
        };

        let log_level = match env::var("LOG_LEVEL") {
            Ok(raw) => LogLevel::parse(&raw).ok_or_else(|| ConfigError::Invalid {
                name: "LOG_LEVEL",
                value: raw,
                reason: "expected one of DEBUG, INFO, WARNING, ERROR, CRITICAL".into(),
            })?,
            Err(_) => LogLevel::Info,
        };

        let request_timeout_secs = match env::var("REQUEST_TIMEOUT") {
            Ok(raw) => {
                let parsed: u64 = raw.parse().map_err(|_| ConfigError::Invalid {
                    name: "REQUEST_TIMEOUT",
                    value: raw.clone(),
                    reason: "not an integer".into(),
                })?;
                if parsed < 1 {
                    return Err(ConfigError::Invalid {
                        name: "REQUEST_TIMEOUT",
                        value: raw,
                        reason: "must be >= 1".into(),
                    });
                }
                parsed
            }
            Err(_) => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        Ok(Self {
            api_key,
            api_base_url,
            port,
            log_level,
            request_timeout: Duration::from_secs(request_timeout_secs),
            stream_timeout: Duration::from_secs(DEFAULT_STREAM_TIMEOUT_SECS),
        })
    }
}
