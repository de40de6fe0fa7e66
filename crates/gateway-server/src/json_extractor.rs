//! A `Json<T>` extractor whose rejection is `AppError`, not axum's own
//! plain-text rejection body. Spec §4.1 requires every 400 to carry
//! `ErrorBody`, including malformed or type-mismatched request bodies —
//! the bare `axum::Json` extractor escapes that contract on parse failure.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use gateway_core::error::GatewayError;

use crate::error::AppError;

pub struct Json<T>(pub T);

impl<T, S> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError(GatewayError::RequestShape(format!("invalid request body: {e}"))))?;

        let value = serde_json::from_slice(&bytes)
            .map_err(|e| AppError(GatewayError::RequestShape(format!("invalid request body: {e}"))))?;

        Ok(Json(value))
    }
}
