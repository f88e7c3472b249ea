//! Handler-boundary failures for the truncation gateway.
//!
//! Every variant answers `400 Bad Request` with an empty body. The variants exist so
//! logs and tests can tell causes apart; callers never can.

use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("request body could not be read: {0}")]
    BodyRead(#[from] BytesRejection),

    #[error("malformed request body: {0}")]
    MalformedBody(#[from] serde_json::Error),

    #[error("handler panicked: {0}")]
    Internal(String),
}

impl GatewayError {
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::BodyRead(_) => "body_read",
            GatewayError::MalformedBody(_) => "malformed_body",
            GatewayError::Internal(_) => "internal",
        }
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        warn!(target: "cadence::gateway", kind = self.kind(), "rejecting request: {}", self);
        self.status().into_response()
    }
}
