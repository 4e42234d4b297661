//! Axum router configuration for the analysis endpoint.

use axum::routing::post;
use axum::Router;

use super::handlers::{analyze, AnalysisAppState};

/// Create the analysis API router.
///
/// # Routes
/// - `POST /` - Consume a paid order and run the analysis
pub fn analysis_routes() -> Router<AnalysisAppState> {
    Router::new().route("/", post(analyze))
}
