pub mod validate;

pub use validate::validate_audio_length;

/// Liveness probe.
pub async fn health() -> &'static str {
    "OK"
}
