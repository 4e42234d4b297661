//! Image analyzer port.
//!
//! Abstracts the external vision-model collaborator that performs the paid
//! analysis. The gate decides whether the call may run; this port only
//! runs it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Port for the external paid image-analysis call.
#[async_trait]
pub trait ImageAnalyzer: Send + Sync {
    /// Analyze one image and return the report.
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisReport, AnalyzerError>;
}

/// One analysis invocation.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    /// Image payload as a data URL or base64 string, opaque to this layer.
    pub image_data: String,
}

/// Result of a completed analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Human-readable analysis text.
    pub summary: String,
    /// Model that produced the report.
    pub model: String,
}

/// Failures of the analysis provider.
#[derive(Debug, Clone, Error)]
pub enum AnalyzerError {
    #[error("Analyzer request failed: {0}")]
    Http(String),

    #[error("Analyzer returned status {status}: {message}")]
    Provider { status: u16, message: String },

    #[error("Analyzer response could not be parsed: {0}")]
    InvalidResponse(String),
}
