//! GetOrderStatusHandler - Query handler for order status polling.

use std::sync::Arc;

use crate::domain::order::{OrderError, OrderStatus};
use crate::ports::OrderStore;

/// Query for one order's current status.
#[derive(Debug, Clone)]
pub struct GetOrderStatusQuery {
    pub order_no: String,
}

/// Client-facing view of an order's status.
#[derive(Debug, Clone)]
pub struct OrderStatusView {
    pub order_no: String,
    pub status: OrderStatus,
    pub client_id: String,
}

/// Handler for status polling.
pub struct GetOrderStatusHandler {
    store: Arc<dyn OrderStore>,
}

impl GetOrderStatusHandler {
    pub fn new(store: Arc<dyn OrderStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: GetOrderStatusQuery) -> Result<OrderStatusView, OrderError> {
        let order = self
            .store
            .find_by_order_no(&query.order_no)
            .await?
            .ok_or_else(|| OrderError::NotFound(query.order_no.clone()))?;

        Ok(OrderStatusView {
            order_no: order.order_no,
            status: order.status,
            client_id: order.client_id.to_string(),
        })
    }
}
