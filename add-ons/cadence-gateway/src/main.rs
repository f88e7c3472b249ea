//! Cadence gateway binary. Config-driven via `CadenceConfig` (`config/cadence.toml` + `CADENCE__*`).

use cadence_core::{CadenceConfig, BUDGET_SECS, VALIDATE_PATH};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("[cadence-gateway] .env not loaded: {} (using system environment)", e);
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match CadenceConfig::load() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Config load failed: {}", e);
            std::process::exit(1);
        }
    };
    let addr = match config.gateway.socket_addr() {
        Ok(a) => a,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("Bind {} failed: {}", addr, e);
            std::process::exit(1);
        }
    };
    tracing::info!(
        "cadence-gateway listening on {} (POST {}, budget {}s)",
        addr,
        VALIDATE_PATH,
        BUDGET_SECS
    );

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Ctrl+C handler failed: {}", e);
            std::future::pending::<()>().await;
        }
        tracing::info!("Shutdown initiated (Ctrl+C received)");
    };

    if let Err(e) = cadence_gateway::serve(listener, shutdown).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
    tracing::info!("Graceful shutdown complete");
}
