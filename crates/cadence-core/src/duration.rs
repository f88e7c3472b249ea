//! **Duration Estimator**: text to estimated spoken seconds at a fixed speaking rate.

use crate::truncation::BUDGET_SECS;
use once_cell::sync::Lazy;
use regex::Regex;

/// Average human speech rate.
pub const WORDS_PER_MINUTE: u32 = 180;

/// `WORDS_PER_MINUTE` expressed per second (3.0).
pub const WORDS_PER_SECOND: f64 = WORDS_PER_MINUTE as f64 / 60.0;

// Unicode-aware: letters, digits and underscore from any script.
static WORD_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").expect("static word regex"));

/// Number of maximal word-character runs in `text`. Punctuation-only tokens do not count.
pub fn count_words(text: &str) -> usize {
    WORD_RUN.find_iter(text).count()
}

/// Estimated spoken length of `text` in seconds. Empty text is 0.0.
pub fn estimate_duration(text: &str) -> f64 {
    count_words(text) as f64 / WORDS_PER_SECOND
}

/// Word count and derived seconds for one utterance, kept together for logging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurationEstimate {
    pub words: usize,
    pub seconds: f64,
}

impl DurationEstimate {
    pub fn of(text: &str) -> Self {
        let words = count_words(text);
        Self {
            words,
            seconds: words as f64 / WORDS_PER_SECOND,
        }
    }

    pub fn seconds(&self) -> f64 {
        self.seconds
    }

    /// True when the utterance would be cut by the truncation policy (strictly over budget).
    pub fn exceeds_budget(&self) -> bool {
        self.seconds > BUDGET_SECS
    }
}
