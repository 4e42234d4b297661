//! HTTP adapter: routers, handlers, DTOs.

pub mod analysis;
pub mod error;
pub mod payment;

use axum::http::HeaderValue;
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use analysis::AnalysisAppState;
pub use payment::PaymentAppState;

/// Assembles the full application router.
///
/// Mounts the payment module at `/api/payment`, the analysis module at
/// `/api/analysis`, plus a health probe, with tracing and CORS layers.
pub fn app_router(
    payment_state: PaymentAppState,
    analysis_state: AnalysisAppState,
    cors_origins: Vec<String>,
) -> Router {
    Router::new()
        .nest(
            "/api/payment",
            payment::payment_routes().with_state(payment_state),
        )
        .nest(
            "/api/analysis",
            analysis::analysis_routes().with_state(analysis_state),
        )
        .route("/api/health", get(health))
        .layer(cors_layer(&cors_origins))
        .layer(TraceLayer::new_for_http())
}

/// GET /api/health - Service liveness probe
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }
    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(parsed))
        .allow_methods(Any)
        .allow_headers(Any)
}
