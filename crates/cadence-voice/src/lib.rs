//! # Cadence Voice - pre-synthesis gatekeeping
//!
//! Sits between the LLM turn and text-to-speech. Every turn's text is drained,
//! estimated, validated by the truncation gateway and rewritten for pronunciation
//! before a single byte is synthesized.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Synthesis Session                         │
//! │  ┌────────────┐   ┌────────────────────────────┐   ┌───────┐ │
//! │  │ TextInput  │ → │     PreSynthesisHook       │ → │  TTS  │ │
//! │  │ (stream)   │   │ drain → estimate → validate│   │       │ │
//! │  └────────────┘   │        → rewrite           │   └───────┘ │
//! │                   └─────────────┬──────────────┘             │
//! │                                 │ POST /validate-audio-length │
//! │                                 ▼                             │
//! │                        cadence-gateway                        │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod client;
pub mod error;
pub mod hook;
pub mod input;
pub mod session;
pub mod tts;

pub use client::GatewayClient;
pub use error::{ClientError, VoiceError, VoiceResult};
pub use hook::{BeforeSynthesis, HookOutcome, PreSynthesisHook, TextSource};
pub use input::TextInput;
pub use session::{SpokenTurn, SynthesisSession, Turn};
pub use tts::{PlaceholderTts, RecordingTts, TtsBackend};
