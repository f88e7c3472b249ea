//! Candidate text for one synthesis turn: complete, or streamed as the LLM produces it.

use futures::stream::{BoxStream, Stream, StreamExt};
use std::fmt;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

/// Text handed to the hook. A streamed value is one-shot: draining consumes it.
pub enum TextInput {
    Complete(String),
    Streamed(BoxStream<'static, String>),
}

impl TextInput {
    pub fn streamed<S>(fragments: S) -> Self
    where
        S: Stream<Item = String> + Send + 'static,
    {
        TextInput::Streamed(fragments.boxed())
    }

    /// Fragments pushed by a producer task; the stream ends when every sender is dropped.
    pub fn from_receiver(rx: mpsc::Receiver<String>) -> Self {
        Self::streamed(ReceiverStream::new(rx))
    }

    /// Consume every fragment and concatenate them in arrival order.
    /// Suspends until the producer finishes.
    pub async fn drain(self) -> String {
        match self {
            TextInput::Complete(text) => text,
            TextInput::Streamed(fragments) => fragments.collect::<String>().await,
        }
    }
}

impl From<String> for TextInput {
    fn from(text: String) -> Self {
        TextInput::Complete(text)
    }
}

impl From<&str> for TextInput {
    fn from(text: &str) -> Self {
        TextInput::Complete(text.to_string())
    }
}

impl fmt::Debug for TextInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextInput::Complete(text) => f.debug_tuple("Complete").field(text).finish(),
            TextInput::Streamed(_) => f.write_str("Streamed(..)"),
        }
    }
}
