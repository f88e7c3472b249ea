//! Synthesis session, one per conversation. Wires the hook in front of TTS.
//!
//! Turns within a session are strictly sequential: a turn is drained, validated and
//! synthesized before the next one starts. Separate sessions share nothing but the
//! hook and run independently.

use crate::error::{VoiceError, VoiceResult};
use crate::hook::BeforeSynthesis;
use crate::input::TextInput;
use crate::tts::TtsBackend;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// One unit of pipeline work: the candidate text and the token that aborts it
/// (e.g. the user barged in).
#[derive(Debug)]
pub struct Turn {
    pub input: TextInput,
    pub cancel: CancellationToken,
}

impl Turn {
    pub fn new(input: impl Into<TextInput>) -> Self {
        Self {
            input: input.into(),
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_cancel(input: impl Into<TextInput>, cancel: CancellationToken) -> Self {
        Self {
            input: input.into(),
            cancel,
        }
    }
}

/// A turn that reached synthesis.
#[derive(Debug, Clone, PartialEq)]
pub struct SpokenTurn {
    /// 1-based index within the session.
    pub index: u64,
    pub text: String,
    pub audio: Vec<u8>,
}

pub struct SynthesisSession {
    id: String,
    hook: Arc<dyn BeforeSynthesis>,
    tts: Arc<dyn TtsBackend>,
    turn_lock: Mutex<()>,
    turns: AtomicU64,
}

impl SynthesisSession {
    pub fn new(id: impl Into<String>, hook: Arc<dyn BeforeSynthesis>, tts: Arc<dyn TtsBackend>) -> Self {
        Self {
            id: id.into(),
            hook,
            tts,
            turn_lock: Mutex::new(()),
            turns: AtomicU64::new(0),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Run one turn to completion.
    pub async fn speak(&self, input: impl Into<TextInput>) -> VoiceResult<SpokenTurn> {
        self.speak_turn(Turn::new(input)).await
    }

    /// Run one turn unless `turn.cancel` fires first. A cancelled turn never reaches TTS;
    /// the in-flight drain or gateway call is dropped.
    pub async fn speak_turn(&self, turn: Turn) -> VoiceResult<SpokenTurn> {
        let Turn { input, cancel } = turn;
        if cancel.is_cancelled() {
            return Err(VoiceError::Cancelled);
        }

        let _guard = tokio::select! {
            _ = cancel.cancelled() => return Err(VoiceError::Cancelled),
            guard = self.turn_lock.lock() => guard,
        };

        let text = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                info!(target: "cadence::voice", session = %self.id, "turn cancelled before synthesis");
                return Err(VoiceError::Cancelled);
            }
            text = self.hook.before_synthesis(input) => text,
        };

        let index = self.turns.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(target: "cadence::voice", session = %self.id, turn = index, chars = text.len(), "synthesizing");
        let audio = self.tts.synthesize(&text)?;
        Ok(SpokenTurn { index, text, audio })
    }

    /// Consume turns from the pipeline until the channel closes or `shutdown` fires.
    /// Cancelled turns and TTS failures are logged and skipped; the loop keeps going.
    pub async fn run<F>(
        &self,
        mut turns: mpsc::Receiver<Turn>,
        shutdown: CancellationToken,
        mut on_spoken: F,
    ) -> VoiceResult<()>
    where
        F: FnMut(SpokenTurn),
    {
        loop {
            let turn = tokio::select! {
                _ = shutdown.cancelled() => break,
                turn = turns.recv() => match turn {
                    Some(t) => t,
                    None => break,
                },
            };

            // Shutdown also drops the turn in flight.
            let result = tokio::select! {
                _ = shutdown.cancelled() => break,
                result = self.speak_turn(turn) => result,
            };

            match result {
                Ok(spoken) => on_spoken(spoken),
                Err(VoiceError::Cancelled) => continue,
                Err(e) => warn!(target: "cadence::voice", session = %self.id, "turn failed: {}", e),
            }
        }

        info!(target: "cadence::voice", session = %self.id, turns = self.turns.load(Ordering::SeqCst), "session ended");
        Ok(())
    }
}
