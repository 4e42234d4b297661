//! Vision analyzer configuration

use secrecy::SecretString;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Vision analyzer configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Vision model endpoint URL
    pub endpoint: String,

    /// API key for the vision model provider
    pub api_key: SecretString,

    /// Model identifier sent with each request
    #[serde(default = "default_model")]
    pub model: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate analyzer configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        use secrecy::ExposeSecret;

        if self.endpoint.is_empty() || url::Url::parse(&self.endpoint).is_err() {
            return Err(ValidationError::InvalidAnalyzerEndpoint);
        }
        if self.api_key.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("AI_API_KEY"));
        }
        Ok(())
    }
}

fn default_model() -> String {
    "vision-large".to_string()
}

fn default_timeout() -> u64 {
    120
}
