//! Error types for the Cadence voice side

use cadence_core::CoreError;
use thiserror::Error;

/// Result type alias for voice operations
pub type VoiceResult<T> = Result<T, VoiceError>;

/// Errors that can surface from a synthesis session.
///
/// Gateway failures are not here: the hook recovers from them locally (see [`ClientError`]).
#[derive(Error, Debug)]
pub enum VoiceError {
    #[error("TTS error: {0}")]
    Tts(String),

    #[error("Turn cancelled before synthesis")]
    Cancelled,

    #[error("Gateway client error: {0}")]
    Client(#[from] ClientError),

    #[error("Configuration error: {0}")]
    Config(#[from] CoreError),
}

/// Failures of one call to the truncation gateway.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP client could not be built: {0}")]
    Build(#[source] reqwest::Error),

    #[error("gateway did not answer in time")]
    Timeout,

    #[error("gateway unreachable: {0}")]
    Connect(#[source] reqwest::Error),

    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("gateway answered with status {0}")]
    Status(u16),

    #[error("gateway response could not be decoded: {0}")]
    Decode(#[source] reqwest::Error),
}

impl ClientError {
    /// Classify an error from sending the request.
    pub(crate) fn from_send(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else if err.is_connect() {
            ClientError::Connect(err)
        } else {
            ClientError::Transport(err)
        }
    }

    /// Classify an error from reading or decoding the response body.
    pub(crate) fn from_body(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else {
            ClientError::Decode(err)
        }
    }

    /// Short stable label for logs and outcomes.
    pub fn kind(&self) -> &'static str {
        match self {
            ClientError::Build(_) => "build",
            ClientError::Timeout => "timeout",
            ClientError::Connect(_) => "connect",
            ClientError::Transport(_) => "transport",
            ClientError::Status(_) => "status",
            ClientError::Decode(_) => "decode",
        }
    }
}
