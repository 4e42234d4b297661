//! HTTP handlers for the analysis endpoint.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::response::IntoResponse;

use crate::application::handlers::analysis::{AnalyzeImageCommand, AnalyzeImageHandler};
use crate::ports::{ImageAnalyzer, OrderStore};

use super::super::error::ApiError;
use super::dto::{AnalysisResponse, AnalyzeRequest};

/// Shared state for the analysis module.
#[derive(Clone)]
pub struct AnalysisAppState {
    pub order_store: Arc<dyn OrderStore>,
    pub analyzer: Arc<dyn ImageAnalyzer>,
}

impl AnalysisAppState {
    pub fn analyze_handler(&self) -> AnalyzeImageHandler {
        AnalyzeImageHandler::new(self.order_store.clone(), self.analyzer.clone())
    }
}

/// POST /api/analysis - Consume a paid order and run the analysis
///
/// Responds 402 if the order is unpaid, 409 if already consumed, and 404
/// if unknown, all before the analyzer is ever invoked.
pub async fn analyze(
    State(state): State<AnalysisAppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.analyze_handler();
    let result = handler
        .handle(AnalyzeImageCommand {
            order_no: request.order_no,
            image_data: request.image_data,
        })
        .await?;

    Ok(Json(AnalysisResponse::from(result)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAnalyzer;
    use crate::adapters::memory::InMemoryOrderStore;
    use crate::domain::foundation::ClientId;
    use crate::domain::order::{Order, OrderStatus, PayMethod};
    use crate::ports::TransitionPatch;
    use axum::http::StatusCode;
    use rust_decimal_macros::dec;

    fn test_state() -> AnalysisAppState {
        AnalysisAppState {
            order_store: Arc::new(InMemoryOrderStore::new()),
            analyzer: Arc::new(MockAnalyzer::new()),
        }
    }

    async fn seed_order(state: &AnalysisAppState, order_no: &str, status: OrderStatus) {
        let order = Order::create(
            order_no,
            ClientId::new("u1").unwrap(),
            dec!(0.50),
            PayMethod::Alipay,
        );
        state.order_store.insert(&order).await.unwrap();
        if status != OrderStatus::Pending {
            state
                .order_store
                .compare_and_transition(
                    order_no,
                    OrderStatus::Pending,
                    OrderStatus::Paid,
                    TransitionPatch::default(),
                )
                .await
                .unwrap();
        }
        if status == OrderStatus::Analyzed {
            state
                .order_store
                .compare_and_transition(
                    order_no,
                    OrderStatus::Paid,
                    OrderStatus::Analyzed,
                    TransitionPatch::default(),
                )
                .await
                .unwrap();
        }
    }

    fn request(order_no: &str) -> AnalyzeRequest {
        AnalyzeRequest {
            order_no: order_no.to_string(),
            image_data: "data:image/png;base64,AAAA".to_string(),
        }
    }

    #[tokio::test]
    async fn paid_order_gets_a_report() {
        let state = test_state();
        seed_order(&state, "20260219120000123", OrderStatus::Paid).await;

        let result = analyze(State(state), Json(request("20260219120000123"))).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn pending_order_is_payment_required() {
        let state = test_state();
        seed_order(&state, "20260219120000123", OrderStatus::Pending).await;

        let err = analyze(State(state), Json(request("20260219120000123")))
            .await
            .err()
            .unwrap();

        assert_eq!(err.status(), StatusCode::PAYMENT_REQUIRED);
    }

    #[tokio::test]
    async fn consumed_order_is_conflict() {
        let state = test_state();
        seed_order(&state, "20260219120000123", OrderStatus::Analyzed).await;

        let err = analyze(State(state), Json(request("20260219120000123")))
            .await
            .err()
            .unwrap();

        assert_eq!(err.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn unknown_order_is_not_found() {
        let state = test_state();

        let err = analyze(State(state), Json(request("20260219999999999")))
            .await
            .err()
            .unwrap();

        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }
}
