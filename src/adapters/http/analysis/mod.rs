//! Analysis HTTP module.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::AnalysisAppState;
pub use routes::analysis_routes;
