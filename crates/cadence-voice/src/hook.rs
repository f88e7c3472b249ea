//! **Pre-Synthesis Hook**: runs once per turn, right before text-to-speech.
//!
//! 1. Drain the candidate text (streamed fragments are concatenated in order).
//! 2. Estimate its spoken length locally.
//! 3. Ask the truncation gateway what to keep.
//! 4. Apply the pronunciation table.
//!
//! A failed gateway call never fails the turn: the hook logs it and falls back to the
//! drained text (or a local truncation, per [`FallbackPolicy`]), then still rewrites.

use crate::client::GatewayClient;
use crate::error::{ClientError, VoiceResult};
use crate::input::TextInput;
use async_trait::async_trait;
use cadence_core::{
    truncate_to_budget, CadenceConfig, DurationEstimate, FallbackPolicy, PronunciationTable, VoiceConfig,
};
use std::path::Path;
use tracing::{debug, warn};

/// Extension point the synthesis pipeline awaits before speaking a turn: text in, text out.
#[async_trait]
pub trait BeforeSynthesis: Send + Sync {
    async fn before_synthesis(&self, input: TextInput) -> String;
}

/// Where the text handed to synthesis came from.
#[derive(Debug, Clone, PartialEq)]
pub enum TextSource {
    Gateway,
    Fallback {
        policy: FallbackPolicy,
        /// [`ClientError::kind`] of the failed call.
        reason: &'static str,
    },
}

/// What happened during one hook run.
#[derive(Debug, Clone, PartialEq)]
pub struct HookOutcome {
    /// Text as drained, before validation.
    pub drained: String,
    pub estimate: DurationEstimate,
    pub source: TextSource,
    /// Final text for synthesis.
    pub text: String,
}

impl HookOutcome {
    pub fn used_fallback(&self) -> bool {
        matches!(self.source, TextSource::Fallback { .. })
    }
}

pub struct PreSynthesisHook {
    client: GatewayClient,
    pronunciations: PronunciationTable,
    fallback: FallbackPolicy,
}

impl PreSynthesisHook {
    pub fn new(client: GatewayClient, pronunciations: PronunciationTable, fallback: FallbackPolicy) -> Self {
        Self {
            client,
            pronunciations,
            fallback,
        }
    }

    pub fn from_config(config: &VoiceConfig) -> VoiceResult<Self> {
        Ok(Self::new(
            GatewayClient::from_config(config)?,
            config.pronunciation_table(),
            config.fallback,
        ))
    }

    /// Build from `CadenceConfig::load` (`CADENCE_CONFIG` file plus `CADENCE__*` env).
    pub fn load() -> VoiceResult<Self> {
        let config = CadenceConfig::load()?;
        Self::from_config(&config.voice)
    }

    pub fn load_from(path: &Path) -> VoiceResult<Self> {
        let config = CadenceConfig::load_from(path)?;
        Self::from_config(&config.voice)
    }

    pub fn fallback_policy(&self) -> FallbackPolicy {
        self.fallback
    }

    pub fn endpoint(&self) -> &str {
        self.client.endpoint()
    }

    /// Run all four steps and report how the final text was produced.
    pub async fn process(&self, input: TextInput) -> HookOutcome {
        let drained = input.drain().await;
        let estimate = DurationEstimate::of(&drained);
        debug!(
            target: "cadence::voice",
            words = estimate.words,
            seconds = estimate.seconds(),
            "estimated utterance"
        );

        let (validated, source) = match self.client.validate(estimate.seconds(), &drained).await {
            Ok(text) => (text, TextSource::Gateway),
            Err(err) => {
                warn!(
                    target: "cadence::voice",
                    kind = err.kind(),
                    fallback = ?self.fallback,
                    "gateway validation failed, using fallback: {}",
                    err
                );
                (self.fallback_text(&drained, estimate), self.fallback_source(&err))
            }
        };

        let text = self.pronunciations.apply(&validated);
        HookOutcome {
            drained,
            estimate,
            source,
            text,
        }
    }

    fn fallback_text(&self, drained: &str, estimate: DurationEstimate) -> String {
        match self.fallback {
            FallbackPolicy::Passthrough => drained.to_string(),
            FallbackPolicy::LocalTruncate => truncate_to_budget(drained, estimate.seconds()).into_owned(),
        }
    }

    fn fallback_source(&self, err: &ClientError) -> TextSource {
        TextSource::Fallback {
            policy: self.fallback,
            reason: err.kind(),
        }
    }
}

#[async_trait]
impl BeforeSynthesis for PreSynthesisHook {
    async fn before_synthesis(&self, input: TextInput) -> String {
        self.process(input).await.text
    }
}
