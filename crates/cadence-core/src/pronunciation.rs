//! Pronunciation rewrite applied to text after truncation, right before synthesis.
//!
//! Lookup is case-sensitive and whole-token: a whitespace-delimited token matches when
//! its core (leading/trailing ASCII punctuation stripped) equals a key. Punctuation and
//! the original whitespace are kept around the replacement.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Literal token → phonetic or spelled-out replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PronunciationTable {
    entries: BTreeMap<String, String>,
}

/// One configured rewrite. A record, not a map key: `config` lowercases keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PronunciationEntry {
    pub token: String,
    pub replacement: String,
}

impl PronunciationEntry {
    pub fn new(token: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            replacement: replacement.into(),
        }
    }
}

impl Default for PronunciationTable {
    fn default() -> Self {
        let mut table = Self::empty();
        table.insert("livekit", "<<l|aɪ|v|k|ɪ|t|>>");
        table
    }
}

impl PronunciationTable {
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, token: impl Into<String>, replacement: impl Into<String>) {
        self.entries.insert(token.into(), replacement.into());
    }

    /// Add every entry from `other`, overriding existing keys.
    pub fn extend(&mut self, other: impl IntoIterator<Item = (String, String)>) {
        self.entries.extend(other);
    }

    pub fn get(&self, token: &str) -> Option<&str> {
        self.entries.get(token).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rewrite every matching token in `text`.
    pub fn apply(&self, text: &str) -> String {
        if self.entries.is_empty() {
            return text.to_string();
        }

        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        while !rest.is_empty() {
            let ws_len = rest.len() - rest.trim_start().len();
            out.push_str(&rest[..ws_len]);
            rest = &rest[ws_len..];

            let token_len = rest.find(char::is_whitespace).unwrap_or(rest.len());
            let (token, tail) = rest.split_at(token_len);
            self.rewrite_token(token, &mut out);
            rest = tail;
        }
        out
    }

    fn rewrite_token(&self, token: &str, out: &mut String) {
        let core = token.trim_matches(|c: char| c.is_ascii_punctuation());
        match (core.is_empty(), self.entries.get(core)) {
            (false, Some(replacement)) => {
                let lead = token.len() - token.trim_start_matches(|c: char| c.is_ascii_punctuation()).len();
                out.push_str(&token[..lead]);
                out.push_str(replacement);
                out.push_str(&token[lead + core.len()..]);
            }
            _ => out.push_str(token),
        }
    }
}

impl FromIterator<(String, String)> for PronunciationTable {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
