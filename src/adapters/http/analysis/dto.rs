//! HTTP DTOs for the analysis endpoint.

use serde::{Deserialize, Serialize};

use crate::application::handlers::analysis::AnalyzeImageResult;

/// Request to run the paid analysis for an order.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeRequest {
    pub order_no: String,
    /// Image payload as a data URL or base64 string.
    pub image_data: String,
}

/// Response carrying the analysis report.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResponse {
    pub success: bool,
    pub order_no: String,
    pub summary: String,
    pub model: String,
}

impl From<AnalyzeImageResult> for AnalysisResponse {
    fn from(result: AnalyzeImageResult) -> Self {
        Self {
            success: true,
            order_no: result.order_no,
            summary: result.summary,
            model: result.model,
        }
    }
}
