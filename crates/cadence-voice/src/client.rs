//! HTTP client for the truncation gateway.

use crate::error::ClientError;
use cadence_core::{TruncationRequest, TruncationResponse, VoiceConfig, VALIDATE_PATH};
use std::time::Duration;
use tracing::debug;

/// Posts `{length, text}` to `{base_url}/validate-audio-length` with a bounded timeout.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    endpoint: String,
    http: reqwest::Client,
}

impl GatewayClient {
    /// `base_url` without the route (e.g. http://127.0.0.1:8000). `timeout` covers the whole call.
    pub fn new(base_url: impl AsRef<str>, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ClientError::Build)?;
        Ok(Self {
            endpoint: format!("{}{}", base_url.as_ref().trim_end_matches('/'), VALIDATE_PATH),
            http,
        })
    }

    pub fn from_config(config: &VoiceConfig) -> Result<Self, ClientError> {
        Self::new(&config.gateway_url, config.timeout())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Ask the gateway what to speak for `text`, whose estimate is `length` seconds.
    pub async fn validate(&self, length: f64, text: &str) -> Result<String, ClientError> {
        let request = TruncationRequest::new(length, text);
        let res = self
            .http
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(ClientError::from_send)?;

        let status = res.status();
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }

        let body: TruncationResponse = res.json().await.map_err(ClientError::from_body)?;
        debug!(
            target: "cadence::voice",
            sent_bytes = text.len(),
            kept_bytes = body.text.len(),
            "gateway validated utterance"
        );
        Ok(body.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_base_and_route() {
        let client = GatewayClient::new("http://gate:8000/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.endpoint(), "http://gate:8000/validate-audio-length");
    }

    #[test]
    fn from_config_uses_gateway_url() {
        let config = VoiceConfig {
            gateway_url: "http://10.0.0.2:9000".to_string(),
            ..VoiceConfig::default()
        };
        let client = GatewayClient::from_config(&config).unwrap();
        assert_eq!(client.endpoint(), "http://10.0.0.2:9000/validate-audio-length");
    }
}
