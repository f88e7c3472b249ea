//! **Truncation Policy**: keep the middle of an utterance that runs over budget.
//!
//! Over budget, the text is split on whitespace and a window of at most
//! [`WINDOW_WORDS`] words centered on `n / 2` is kept. Window bounds clamp to
//! `[0, n]`, so short texts yield a shorter window instead of an out-of-range slice.

use std::borrow::Cow;
use std::ops::Range;

/// Maximum spoken duration in seconds before truncation applies.
pub const BUDGET_SECS: f64 = 60.0;

/// Words kept around the midpoint when truncating.
pub const WINDOW_WORDS: usize = 60;

/// Words on either side of the midpoint.
pub const HALF_WINDOW: usize = WINDOW_WORDS / 2;

/// Result of running the policy over one utterance.
#[derive(Debug, Clone, PartialEq)]
pub enum TruncationOutcome<'a> {
    /// At or under budget; the original text, byte for byte.
    Unchanged(&'a str),
    /// Over budget; the kept word window and its bounds in the whitespace-split source.
    Truncated {
        text: String,
        window: Range<usize>,
        total_words: usize,
    },
}

impl<'a> TruncationOutcome<'a> {
    /// Apply the policy. `length` is the caller's estimate in seconds and only decides
    /// whether truncation happens; the window is computed from `text` itself.
    pub fn evaluate(text: &'a str, length: f64) -> Self {
        if length.is_nan() || length <= BUDGET_SECS {
            return TruncationOutcome::Unchanged(text);
        }

        let words: Vec<&str> = text.split_whitespace().collect();
        let window = centered_window(words.len());
        TruncationOutcome::Truncated {
            text: words[window.clone()].join(" "),
            window,
            total_words: words.len(),
        }
    }

    pub fn is_truncated(&self) -> bool {
        matches!(self, TruncationOutcome::Truncated { .. })
    }

    pub fn as_str(&self) -> &str {
        match self {
            TruncationOutcome::Unchanged(text) => text,
            TruncationOutcome::Truncated { text, .. } => text,
        }
    }

    pub fn into_text(self) -> Cow<'a, str> {
        match self {
            TruncationOutcome::Unchanged(text) => Cow::Borrowed(text),
            TruncationOutcome::Truncated { text, .. } => Cow::Owned(text),
        }
    }
}

/// Kept text for `text` given its estimated `length` in seconds.
pub fn truncate_to_budget(text: &str, length: f64) -> Cow<'_, str> {
    TruncationOutcome::evaluate(text, length).into_text()
}

/// `[mid - HALF_WINDOW, mid + HALF_WINDOW)` clamped to `[0, n]`.
fn centered_window(n: usize) -> Range<usize> {
    let mid = n / 2;
    let start = mid.saturating_sub(HALF_WINDOW);
    let end = (mid + HALF_WINDOW).min(n);
    start..end
}
