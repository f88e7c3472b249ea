//! # Cadence Core - speech budget primitives
//!
//! Shared by the truncation gateway and the voice-side hook so both ends agree on
//! how long an utterance is and what is kept when it runs long.
//!
//! ```text
//!   text ──► duration::estimate_duration ──► seconds
//!                                              │
//!   text + seconds ──► truncation::truncate_to_budget ──► kept text
//!                                              │
//!   kept text ──► pronunciation::PronunciationTable::apply ──► TTS-ready text
//! ```
//!
//! `BUDGET_SECS` and `WORDS_PER_MINUTE` are compile-time constants. The gateway and the
//! hook are deployed independently; changing either value means redeploying both.

pub mod config;
pub mod duration;
pub mod error;
pub mod pronunciation;
pub mod truncation;
pub mod wire;

pub use crate::config::{CadenceConfig, FallbackPolicy, GatewayConfig, VoiceConfig};
pub use duration::{count_words, estimate_duration, DurationEstimate, WORDS_PER_MINUTE, WORDS_PER_SECOND};
pub use error::{CoreError, CoreResult};
pub use pronunciation::{PronunciationEntry, PronunciationTable};
pub use truncation::{
    truncate_to_budget, TruncationOutcome, BUDGET_SECS, HALF_WINDOW, WINDOW_WORDS,
};
pub use wire::{TruncationRequest, TruncationResponse, VALIDATE_PATH};
