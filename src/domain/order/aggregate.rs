//! Order aggregate.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ClientId, OrderId, Timestamp};

use super::{OrderStatus, PayMethod};

/// One checkout attempt.
///
/// `order_no` and `amount` are immutable once created; `status` only moves
/// forward through the conditional-update primitive on the store. Provider
/// echo fields (`provider_trade_no`, `provider_status_text`) are filled by
/// the webhook's `pending -> paid` transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub order_no: String,
    pub provider_trade_no: Option<String>,
    pub client_id: ClientId,
    pub amount: Decimal,
    pub pay_method: PayMethod,
    pub provider_status_text: Option<String>,
    pub status: OrderStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Order {
    /// Creates a new pending order at the given fixed amount.
    pub fn create(
        order_no: impl Into<String>,
        client_id: ClientId,
        amount: Decimal,
        pay_method: PayMethod,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id: OrderId::new(),
            order_no: order_no.into(),
            provider_trade_no: None,
            client_id,
            amount,
            pay_method,
            provider_status_text: None,
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the paid analysis may still be redeemed.
    pub fn is_consumable(&self) -> bool {
        self.status == OrderStatus::Paid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn test_order() -> Order {
        Order::create(
            "20260219120000123",
            ClientId::new("u1").unwrap(),
            dec!(0.50),
            PayMethod::Alipay,
        )
    }

    #[test]
    fn create_starts_pending_with_no_provider_echo() {
        let order = test_order();
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(order.provider_trade_no.is_none());
        assert!(order.provider_status_text.is_none());
        assert_eq!(order.created_at, order.updated_at);
    }

    #[test]
    fn create_keeps_the_given_amount() {
        let order = test_order();
        assert_eq!(order.amount, dec!(0.50));
    }

    #[test]
    fn only_paid_orders_are_consumable() {
        let mut order = test_order();
        assert!(!order.is_consumable());

        order.status = OrderStatus::Paid;
        assert!(order.is_consumable());

        order.status = OrderStatus::Analyzed;
        assert!(!order.is_consumable());
    }
}
