//! HTTP DTOs for payment endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::payment::OrderStatusView;
use crate::domain::order::{Order, OrderStatus, PayMethod};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to create a checkout.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCheckoutRequest {
    /// Opaque per-browser client identifier.
    pub client_id: String,
    /// Payment channel; defaults server-side when absent.
    #[serde(default)]
    pub pay_method: Option<String>,
}

/// Query for listing a client's orders.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientOrdersQuery {
    pub client_id: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response for a created checkout.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutResponse {
    pub success: bool,
    /// Signed provider redirect URL.
    pub url: String,
    pub order_no: String,
}

/// Response for a status poll.
#[derive(Debug, Clone, Serialize)]
pub struct OrderStatusResponse {
    pub success: bool,
    pub order_no: String,
    pub status: OrderStatus,
    pub client_id: String,
}

impl From<OrderStatusView> for OrderStatusResponse {
    fn from(view: OrderStatusView) -> Self {
        Self {
            success: true,
            order_no: view.order_no,
            status: view.status,
            client_id: view.client_id,
        }
    }
}

/// One order in a client listing.
#[derive(Debug, Clone, Serialize)]
pub struct OrderSummaryResponse {
    pub order_no: String,
    pub status: OrderStatus,
    pub pay_method: PayMethod,
    pub amount: String,
    /// Creation time (ISO 8601).
    pub created_at: String,
}

impl From<Order> for OrderSummaryResponse {
    fn from(order: Order) -> Self {
        Self {
            order_no: order.order_no,
            status: order.status,
            pay_method: order.pay_method,
            amount: order.amount.to_string(),
            created_at: order.created_at.to_rfc3339(),
        }
    }
}

/// Response for a client order listing.
#[derive(Debug, Clone, Serialize)]
pub struct ClientOrdersResponse {
    pub success: bool,
    pub orders: Vec<OrderSummaryResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ClientId;
    use rust_decimal_macros::dec;

    #[test]
    fn checkout_request_defaults_pay_method() {
        let request: CreateCheckoutRequest =
            serde_json::from_str(r#"{"client_id": "u1"}"#).unwrap();
        assert_eq!(request.client_id, "u1");
        assert!(request.pay_method.is_none());
    }

    #[test]
    fn status_response_serializes_snake_case_status() {
        let response = OrderStatusResponse {
            success: true,
            order_no: "20260219120000123".to_string(),
            status: OrderStatus::Paid,
            client_id: "u1".to_string(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"status\":\"paid\""));
        assert!(json.contains("\"success\":true"));
    }

    #[test]
    fn order_summary_renders_decimal_amount_exactly() {
        let order = Order::create(
            "20260219120000123",
            ClientId::new("u1").unwrap(),
            dec!(0.50),
            PayMethod::Wxpay,
        );
        let summary = OrderSummaryResponse::from(order);
        assert_eq!(summary.amount, "0.50");
        assert_eq!(summary.pay_method, PayMethod::Wxpay);
    }
}
