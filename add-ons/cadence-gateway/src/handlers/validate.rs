//! `POST /validate-audio-length`: run the truncation policy over one utterance.
//!
//! The body is taken as raw bytes and parsed here rather than through `Json`, so every
//! failure goes through [`GatewayError`] instead of axum's mixed 400/415/422 rejections.

use crate::error::GatewayError;
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::Json;
use cadence_core::{TruncationOutcome, TruncationRequest, TruncationResponse};
use tracing::debug;

pub async fn validate_audio_length(
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<TruncationResponse>, GatewayError> {
    let body = body?;
    let request = TruncationRequest::from_slice(&body)?;

    let outcome = TruncationOutcome::evaluate(&request.text, request.length);
    match &outcome {
        TruncationOutcome::Unchanged(_) => {
            debug!(target: "cadence::gateway", length = request.length, "within budget, text unchanged");
        }
        TruncationOutcome::Truncated { window, total_words, .. } => {
            debug!(
                target: "cadence::gateway",
                length = request.length,
                total_words = *total_words,
                "over budget, keeping words {}..{}",
                window.start,
                window.end
            );
        }
    }

    Ok(Json(TruncationResponse {
        text: outcome.into_text().into_owned(),
    }))
}
