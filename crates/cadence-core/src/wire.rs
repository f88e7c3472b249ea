//! Wire shapes for `POST /validate-audio-length`.

use serde::de::Error as _;
use serde::{Deserialize, Serialize};

/// Route served by the gateway and called by the hook.
pub const VALIDATE_PATH: &str = "/validate-audio-length";

/// Body sent by the hook. Both fields are optional on the wire.
///
/// `length` is the caller's estimate; the gateway only compares it against the budget.
/// `text` must be the exact text the estimate was computed from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TruncationRequest {
    #[serde(default)]
    pub length: f64,
    #[serde(default)]
    pub text: String,
}

impl TruncationRequest {
    pub fn new(length: f64, text: impl Into<String>) -> Self {
        Self {
            length,
            text: text.into(),
        }
    }

    /// Parse a request body. The top-level value must be a JSON object; arrays and
    /// scalars are rejected even though serde would map a sequence onto the struct.
    pub fn from_slice(body: &[u8]) -> serde_json::Result<Self> {
        let value: serde_json::Value = serde_json::from_slice(body)?;
        if !value.is_object() {
            return Err(serde_json::Error::custom("request body must be a JSON object"));
        }
        serde_json::from_value(value)
    }
}

/// Body returned by the gateway on success.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TruncationResponse {
    pub text: String,
}
