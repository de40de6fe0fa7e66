//! Core domain types shared across the gateway: wire shapes, the error
//! taxonomy, and the per-request correlation id.
//!
//! Nothing in this crate performs I/O; it exists so the translation,
//! streaming, and upstream-client crates can all speak the same vocabulary
//! without depending on each other.

pub mod correlation;
pub mod error;
pub mod upstream;
pub mod wire;

pub use correlation::CorrelationId;
pub use error::GatewayError;
