//! Mock ImageAnalyzer for tests and local development.

use async_trait::async_trait;

use crate::ports::{AnalysisReport, AnalysisRequest, AnalyzerError, ImageAnalyzer};

/// Analyzer returning a canned report, or a canned failure.
#[derive(Debug, Default)]
pub struct MockAnalyzer {
    fail: bool,
}

impl MockAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mock that fails every call, for exercising error paths.
    pub fn failing() -> Self {
        Self { fail: true }
    }
}

#[async_trait]
impl ImageAnalyzer for MockAnalyzer {
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisReport, AnalyzerError> {
        if self.fail {
            return Err(AnalyzerError::Provider {
                status: 500,
                message: "mock failure".to_string(),
            });
        }
        Ok(AnalysisReport {
            summary: format!("Mock analysis of {} bytes of image data.", request.image_data.len()),
            model: "mock".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_a_canned_report() {
        let report = MockAnalyzer::new()
            .analyze(AnalysisRequest {
                image_data: "abcd".to_string(),
            })
            .await
            .unwrap();

        assert!(report.summary.contains("4 bytes"));
        assert_eq!(report.model, "mock");
    }

    #[tokio::test]
    async fn failing_mock_fails() {
        let result = MockAnalyzer::failing()
            .analyze(AnalysisRequest {
                image_data: "abcd".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AnalyzerError::Provider { .. })));
    }
}
