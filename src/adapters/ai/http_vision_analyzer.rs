//! HTTP vision-model implementation of ImageAnalyzer.

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::Deserialize;

use crate::config::AiConfig;
use crate::ports::{AnalysisReport, AnalysisRequest, AnalyzerError, ImageAnalyzer};

/// Prompt sent with every analysis request.
const ANALYSIS_PROMPT: &str =
    "Describe the content of this image in detail, including notable objects, \
     text, and composition.";

/// Vision-model analyzer speaking a JSON-over-HTTP protocol.
pub struct HttpVisionAnalyzer {
    client: reqwest::Client,
    config: AiConfig,
}

/// Provider response body.
#[derive(Debug, Deserialize)]
struct AnalyzeResponseBody {
    analysis: String,
    model: Option<String>,
}

impl HttpVisionAnalyzer {
    /// Creates an analyzer bound by the configured request timeout.
    pub fn new(config: AiConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .expect("HTTP client construction");
        Self { client, config }
    }

    fn request_body(&self, image_data: &str) -> serde_json::Value {
        serde_json::json!({
            "model": self.config.model,
            "image": image_data,
            "prompt": ANALYSIS_PROMPT,
        })
    }
}

#[async_trait]
impl ImageAnalyzer for HttpVisionAnalyzer {
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisReport, AnalyzerError> {
        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&self.request_body(&request.image_data))
            .send()
            .await
            .map_err(|e| AnalyzerError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AnalyzerError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let body: AnalyzeResponseBody = response
            .json()
            .await
            .map_err(|e| AnalyzerError::InvalidResponse(e.to_string()))?;

        Ok(AnalysisReport {
            summary: body.analysis,
            model: body.model.unwrap_or_else(|| self.config.model.clone()),
        })
    }
}
