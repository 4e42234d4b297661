//! Analysis handlers: the paid-consumption gate and the analysis call.

mod analyze_image;
mod consume_order;

pub use analyze_image::{AnalyzeImageCommand, AnalyzeImageHandler, AnalyzeImageResult};
pub use consume_order::{ConsumeForAnalysisCommand, ConsumeForAnalysisHandler};
