//! Ports: trait boundaries between the application core and the adapters.

mod image_analyzer;
mod order_store;

pub use image_analyzer::{AnalysisReport, AnalysisRequest, AnalyzerError, ImageAnalyzer};
pub use order_store::{OrderStore, TransitionPatch};
