//! Cadence configuration loaded from TOML and environment.
//!
//! Precedence: environment (`CADENCE__*`, `__` separator) > file (`CADENCE_CONFIG` path,
//! default `config/cadence`) > built-in defaults. The speech budget and speaking rate are
//! not configurable; they are constants in [`crate::truncation`] and [`crate::duration`].
//!
//! | Env | Default | Description |
//! |-----|---------|-------------|
//! | CADENCE__GATEWAY__BIND_ADDR | 127.0.0.1:8000 | Address the truncation gateway listens on. |
//! | CADENCE__VOICE__GATEWAY_URL | http://127.0.0.1:8000 | Base URL the hook posts to. |
//! | CADENCE__VOICE__TIMEOUT_MS | 5000 | Bound on one validate call. |
//! | CADENCE__VOICE__FALLBACK | passthrough | `passthrough` \| `local_truncate` when the gateway fails. |

use crate::error::{CoreError, CoreResult};
use crate::pronunciation::{PronunciationEntry, PronunciationTable};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

const DEFAULT_CONFIG_PATH: &str = "config/cadence";

/// What the hook speaks when the gateway cannot be reached or answers badly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// The drained text, unmodified.
    #[default]
    Passthrough,
    /// The same truncation policy the gateway runs, computed locally.
    LocalTruncate,
}

/// Settings for the `cadence-gateway` binary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    pub bind_addr: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8000".to_string(),
        }
    }
}

impl GatewayConfig {
    pub fn socket_addr(&self) -> CoreResult<SocketAddr> {
        self.bind_addr
            .trim()
            .parse()
            .map_err(|e: std::net::AddrParseError| CoreError::InvalidValue {
                field: "gateway.bind_addr",
                reason: e.to_string(),
            })
    }
}

/// Settings for the voice-side pre-synthesis hook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceConfig {
    /// Gateway base URL without the route (e.g. http://127.0.0.1:8000).
    pub gateway_url: String,
    /// Upper bound on one validate call, connect included.
    pub timeout_ms: u64,
    #[serde(default)]
    pub fallback: FallbackPolicy,
    /// Extra pronunciation entries merged over the built-in table, in order.
    /// `[[voice.pronunciations]]` records with `token` and `replacement`.
    #[serde(default)]
    pub pronunciations: Vec<PronunciationEntry>,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            gateway_url: "http://127.0.0.1:8000".to_string(),
            timeout_ms: 5_000,
            fallback: FallbackPolicy::default(),
            pronunciations: Vec::new(),
        }
    }
}

impl VoiceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Built-in table with configured entries layered on top.
    pub fn pronunciation_table(&self) -> PronunciationTable {
        let mut table = PronunciationTable::default();
        for entry in &self.pronunciations {
            table.insert(entry.token.as_str(), entry.replacement.as_str());
        }
        table
    }
}

/// Root configuration shared by the gateway binary and the voice demo.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CadenceConfig {
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub voice: VoiceConfig,
}

impl CadenceConfig {
    /// Load from `CADENCE_CONFIG` (or `config/cadence`) and `CADENCE__*` environment variables.
    pub fn load() -> CoreResult<Self> {
        let path = std::env::var("CADENCE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(Path::new(&path))
    }

    /// Load with an explicit file path. A missing file is not an error; defaults apply.
    pub fn load_from(path: &Path) -> CoreResult<Self> {
        let defaults = GatewayConfig::default();
        let voice = VoiceConfig::default();
        let builder = config::Config::builder()
            .set_default("gateway.bind_addr", defaults.bind_addr)?
            .set_default("voice.gateway_url", voice.gateway_url)?
            .set_default("voice.timeout_ms", voice.timeout_ms as i64)?
            .set_default("voice.fallback", "passthrough")?;

        let builder = if path.exists() {
            builder.add_source(config::File::from(path))
        } else {
            // `config/cadence` resolves `config/cadence.toml` when present.
            builder.add_source(config::File::with_name(&path.to_string_lossy()).required(false))
        };

        let built = builder
            .add_source(config::Environment::with_prefix("CADENCE").separator("__"))
            .build()?;

        let cfg: CadenceConfig = built.try_deserialize()?;
        cfg.validate()?;
        tracing::debug!(
            target: "cadence::config",
            path = %path.display(),
            bind_addr = %cfg.gateway.bind_addr,
            gateway_url = %cfg.voice.gateway_url,
            "configuration loaded"
        );
        Ok(cfg)
    }

    fn validate(&self) -> CoreResult<()> {
        self.gateway.socket_addr()?;
        if self.voice.timeout_ms == 0 {
            return Err(CoreError::InvalidValue {
                field: "voice.timeout_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.voice.gateway_url.trim().is_empty() {
            return Err(CoreError::InvalidValue {
                field: "voice.gateway_url",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
