//! AnalyzeImageHandler - Command handler running the paid analysis.
//!
//! Consumes the order through the gate first, then invokes the analyzer.
//! If the analyzer fails after the gate consumed the order, the
//! consumption stays durable: the invariant is at-most-once redemption,
//! and reopening the order would reopen the double-spend window.

use std::sync::Arc;

use crate::domain::order::OrderError;
use crate::ports::{AnalysisRequest, ImageAnalyzer, OrderStore};

use super::{ConsumeForAnalysisCommand, ConsumeForAnalysisHandler};

/// Command to analyze one image against a paid order.
#[derive(Debug, Clone)]
pub struct AnalyzeImageCommand {
    pub order_no: String,
    /// Image payload, opaque to this layer (data URL or base64).
    pub image_data: String,
}

/// Result of a completed analysis.
#[derive(Debug, Clone)]
pub struct AnalyzeImageResult {
    pub order_no: String,
    pub client_id: String,
    pub summary: String,
    pub model: String,
}

/// Handler orchestrating gate and analyzer.
pub struct AnalyzeImageHandler {
    gate: ConsumeForAnalysisHandler,
    analyzer: Arc<dyn ImageAnalyzer>,
}

impl AnalyzeImageHandler {
    pub fn new(store: Arc<dyn OrderStore>, analyzer: Arc<dyn ImageAnalyzer>) -> Self {
        Self {
            gate: ConsumeForAnalysisHandler::new(store),
            analyzer,
        }
    }

    pub async fn handle(&self, cmd: AnalyzeImageCommand) -> Result<AnalyzeImageResult, OrderError> {
        if cmd.image_data.is_empty() {
            return Err(OrderError::validation("image_data", "image payload is required"));
        }

        let snapshot = self
            .gate
            .handle(ConsumeForAnalysisCommand {
                order_no: cmd.order_no.clone(),
            })
            .await?;

        let report = self
            .analyzer
            .analyze(AnalysisRequest {
                image_data: cmd.image_data,
            })
            .await
            .map_err(|e| {
                tracing::error!(order_no = %cmd.order_no, error = %e, "analysis failed after consumption");
                OrderError::Analyzer(e.to_string())
            })?;

        Ok(AnalyzeImageResult {
            order_no: cmd.order_no,
            client_id: snapshot.client_id.to_string(),
            summary: report.summary,
            model: report.model,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ClientId, DomainError};
    use crate::domain::order::{Order, OrderStatus, PayMethod};
    use crate::ports::{AnalysisReport, AnalyzerError, TransitionPatch};
    use async_trait::async_trait;
    use rust_decimal_macros::dec;
    use std::sync::Mutex;

    struct MockOrderStore {
        orders: Mutex<Vec<Order>>,
    }

    impl MockOrderStore {
        fn with_order(order: Order) -> Self {
            Self {
                orders: Mutex::new(vec![order]),
            }
        }

        fn get(&self, order_no: &str) -> Option<Order> {
            self.orders
                .lock()
                .unwrap()
                .iter()
                .find(|o| o.order_no == order_no)
                .cloned()
        }
    }

    #[async_trait]
    impl OrderStore for MockOrderStore {
        async fn insert(&self, order: &Order) -> Result<(), DomainError> {
            self.orders.lock().unwrap().push(order.clone());
            Ok(())
        }

        async fn find_by_order_no(&self, order_no: &str) -> Result<Option<Order>, DomainError> {
            Ok(self.get(order_no))
        }

        async fn find_by_client(&self, client_id: &ClientId) -> Result<Vec<Order>, DomainError> {
            Ok(self
                .orders
                .lock()
                .unwrap()
                .iter()
                .filter(|o| &o.client_id == client_id)
                .cloned()
                .collect())
        }

        async fn compare_and_transition(
            &self,
            order_no: &str,
            expected: OrderStatus,
            next: OrderStatus,
            _patch: TransitionPatch,
        ) -> Result<bool, DomainError> {
            let mut orders = self.orders.lock().unwrap();
            match orders
                .iter_mut()
                .find(|o| o.order_no == order_no && o.status == expected)
            {
                Some(order) => {
                    order.status = next;
                    Ok(true)
                }
                None => Ok(false),
            }
        }
    }

    struct MockAnalyzer {
        fail: bool,
    }

    #[async_trait]
    impl ImageAnalyzer for MockAnalyzer {
        async fn analyze(
            &self,
            _request: AnalysisRequest,
        ) -> Result<AnalysisReport, AnalyzerError> {
            if self.fail {
                return Err(AnalyzerError::Provider {
                    status: 500,
                    message: "upstream down".to_string(),
                });
            }
            Ok(AnalysisReport {
                summary: "A cat on a windowsill.".to_string(),
                model: "vision-large".to_string(),
            })
        }
    }

    fn paid_order() -> Order {
        let mut order = Order::create(
            "20260219120000123",
            ClientId::new("u1").unwrap(),
            dec!(0.50),
            PayMethod::Alipay,
        );
        order.status = OrderStatus::Paid;
        order
    }

    fn command() -> AnalyzeImageCommand {
        AnalyzeImageCommand {
            order_no: "20260219120000123".to_string(),
            image_data: "data:image/png;base64,iVBORw0KGgo=".to_string(),
        }
    }

    #[tokio::test]
    async fn analyzes_a_paid_order_and_consumes_it() {
        let store = Arc::new(MockOrderStore::with_order(paid_order()));
        let handler = AnalyzeImageHandler::new(store.clone(), Arc::new(MockAnalyzer { fail: false }));

        let result = handler.handle(command()).await.unwrap();

        assert_eq!(result.client_id, "u1");
        assert_eq!(result.summary, "A cat on a windowsill.");
        assert_eq!(
            store.get("20260219120000123").unwrap().status,
            OrderStatus::Analyzed
        );
    }

    #[tokio::test]
    async fn unpaid_order_never_reaches_the_analyzer() {
        let mut order = paid_order();
        order.status = OrderStatus::Pending;
        let store = Arc::new(MockOrderStore::with_order(order));
        let handler = AnalyzeImageHandler::new(store, Arc::new(MockAnalyzer { fail: true }));

        // The failing analyzer would error if called; NotPaid proves the
        // gate rejected first.
        let result = handler.handle(command()).await;
        assert!(matches!(result, Err(OrderError::NotPaid(_))));
    }

    #[tokio::test]
    async fn empty_image_payload_is_rejected_before_the_gate() {
        let store = Arc::new(MockOrderStore::with_order(paid_order()));
        let handler = AnalyzeImageHandler::new(store.clone(), Arc::new(MockAnalyzer { fail: false }));

        let result = handler
            .handle(AnalyzeImageCommand {
                order_no: "20260219120000123".to_string(),
                image_data: String::new(),
            })
            .await;

        assert!(matches!(result, Err(OrderError::Validation { .. })));
        // Gate did not run; the order is still consumable.
        assert_eq!(
            store.get("20260219120000123").unwrap().status,
            OrderStatus::Paid
        );
    }

    #[tokio::test]
    async fn analyzer_failure_keeps_the_consumption_durable() {
        let store = Arc::new(MockOrderStore::with_order(paid_order()));
        let handler = AnalyzeImageHandler::new(store.clone(), Arc::new(MockAnalyzer { fail: true }));

        let result = handler.handle(command()).await;

        assert!(matches!(result, Err(OrderError::Analyzer(_))));
        assert_eq!(
            store.get("20260219120000123").unwrap().status,
            OrderStatus::Analyzed
        );
    }

    #[tokio::test]
    async fn second_analysis_attempt_is_already_consumed() {
        let store = Arc::new(MockOrderStore::with_order(paid_order()));
        let handler = AnalyzeImageHandler::new(store, Arc::new(MockAnalyzer { fail: false }));

        handler.handle(command()).await.unwrap();
        let result = handler.handle(command()).await;

        assert!(matches!(result, Err(OrderError::AlreadyConsumed(_))));
    }
}
