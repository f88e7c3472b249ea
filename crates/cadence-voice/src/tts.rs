//! Text-to-speech seam. The real engine lives outside this crate.

use crate::error::{VoiceError, VoiceResult};
use std::sync::Mutex;

/// Backend that turns text into audio bytes. Implement for the deployment's TTS engine.
pub trait TtsBackend: Send + Sync {
    /// Synthesize text to audio bytes. Return an empty vec to skip playback.
    fn synthesize(&self, text: &str) -> VoiceResult<Vec<u8>>;
}

/// Placeholder TTS: returns empty audio so nothing plays.
#[derive(Debug, Default)]
pub struct PlaceholderTts;

impl TtsBackend for PlaceholderTts {
    fn synthesize(&self, _text: &str) -> VoiceResult<Vec<u8>> {
        Ok(Vec::new())
    }
}

/// Keeps every text it was asked to speak and returns its UTF-8 bytes as "audio".
#[derive(Debug, Default)]
pub struct RecordingTts {
    spoken: Mutex<Vec<String>>,
}

impl RecordingTts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Texts synthesized so far, oldest first.
    pub fn spoken(&self) -> Vec<String> {
        self.spoken.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

impl TtsBackend for RecordingTts {
    fn synthesize(&self, text: &str) -> VoiceResult<Vec<u8>> {
        self.spoken
            .lock()
            .map_err(|e| VoiceError::Tts(e.to_string()))?
            .push(text.to_string());
        Ok(text.as_bytes().to_vec())
    }
}
