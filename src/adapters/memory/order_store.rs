//! In-memory implementation of OrderStore.
//!
//! The map mutex is held across the check-and-set of
//! `compare_and_transition`, so concurrent callers observe the same
//! winner-takes-it semantics as the SQL conditional update.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::{ClientId, DomainError, ErrorCode, Timestamp};
use crate::domain::order::{Order, OrderStatus};
use crate::ports::{OrderStore, TransitionPatch};

/// In-memory OrderStore keyed by order number.
#[derive(Default)]
pub struct InMemoryOrderStore {
    orders: Mutex<HashMap<String, Order>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored orders (test helper).
    pub fn len(&self) -> usize {
        self.orders.lock().unwrap().len()
    }

    /// Whether the store is empty (test helper).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn insert(&self, order: &Order) -> Result<(), DomainError> {
        let mut orders = self.orders.lock().unwrap();
        if orders.contains_key(&order.order_no) {
            return Err(DomainError::new(
                ErrorCode::DuplicateOrderNo,
                "Order number already exists",
            ));
        }
        orders.insert(order.order_no.clone(), order.clone());
        Ok(())
    }

    async fn find_by_order_no(&self, order_no: &str) -> Result<Option<Order>, DomainError> {
        Ok(self.orders.lock().unwrap().get(order_no).cloned())
    }

    async fn find_by_client(&self, client_id: &ClientId) -> Result<Vec<Order>, DomainError> {
        let orders = self.orders.lock().unwrap();
        let mut matching: Vec<Order> = orders
            .values()
            .filter(|o| &o.client_id == client_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching)
    }

    async fn compare_and_transition(
        &self,
        order_no: &str,
        expected: OrderStatus,
        next: OrderStatus,
        patch: TransitionPatch,
    ) -> Result<bool, DomainError> {
        let mut orders = self.orders.lock().unwrap();
        let order = match orders.get_mut(order_no) {
            Some(order) if order.status == expected => order,
            _ => return Ok(false),
        };

        order.status = next;
        if let Some(trade_no) = patch.provider_trade_no {
            order.provider_trade_no = Some(trade_no);
        }
        if let Some(text) = patch.provider_status_text {
            order.provider_status_text = Some(text);
        }
        if let Some(method) = patch.pay_method {
            order.pay_method = method;
        }
        order.updated_at = Timestamp::now();

        Ok(true)
    }
}
