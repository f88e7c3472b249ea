//! Example: pre-synthesis hook against a running gateway.
//!
//! Start the gateway first (`cargo run -p cadence-gateway`), then run this example.
//! It streams a long "LLM answer" token by token through a synthesis session and
//! logs what would be spoken. With the gateway down, the fallback path is shown instead.

use cadence_voice::{PreSynthesisHook, RecordingTts, SynthesisSession, TextInput, Turn};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,cadence=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let hook = Arc::new(PreSynthesisHook::load()?);
    info!("Gateway: {} (fallback: {:?})", hook.endpoint(), hook.fallback_policy());

    let tts = Arc::new(RecordingTts::new());
    let session = SynthesisSession::new("demo", hook, tts.clone());

    let (turn_tx, turn_rx) = mpsc::channel(4);

    // Turn 1: short and complete.
    turn_tx.send(Turn::new("Hi, thanks for calling. This demo runs on livekit.")).await?;

    // Turn 2: a 240-word answer streamed token by token (80 seconds at 180 wpm).
    let (frag_tx, frag_rx) = mpsc::channel(16);
    turn_tx.send(Turn::new(TextInput::from_receiver(frag_rx))).await?;
    tokio::spawn(async move {
        for i in 0..240 {
            tokio::time::sleep(Duration::from_millis(2)).await;
            if frag_tx.send(format!("word{} ", i)).await.is_err() {
                break;
            }
        }
    });
    drop(turn_tx);

    session
        .run(turn_rx, CancellationToken::new(), |spoken| {
            info!(
                "Turn {} -> {} words: {}",
                spoken.index,
                spoken.text.split_whitespace().count(),
                spoken.text
            );
        })
        .await?;

    info!("Spoke {} turn(s)", tts.spoken().len());
    Ok(())
}
