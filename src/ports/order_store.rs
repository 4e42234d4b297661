//! Order store port.
//!
//! Defines the contract for persisting orders and for the single
//! concurrency-control primitive of the whole subsystem: the conditional
//! status transition. Callers never mutate status any other way; mutual
//! exclusion under concurrent webhook redelivery and concurrent analysis
//! requests is delegated entirely to this one atomic conditional write.

use async_trait::async_trait;

use crate::domain::foundation::{ClientId, DomainError};
use crate::domain::order::{Order, OrderStatus, PayMethod};

/// Fields applied alongside a status transition.
///
/// The `pending -> paid` transition records the provider echo; the
/// `paid -> analyzed` transition applies an empty patch. `None` fields
/// leave the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransitionPatch {
    pub provider_trade_no: Option<String>,
    pub provider_status_text: Option<String>,
    pub pay_method: Option<PayMethod>,
}

/// Repository port for order persistence.
///
/// Implementations must ensure:
/// - a unique constraint on `order_no`, surfacing duplicates as
///   `ErrorCode::DuplicateOrderNo` from `insert`
/// - `compare_and_transition` executes as one atomic conditional write
/// - `updated_at` is touched on every applied transition
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Insert a newly created order.
    ///
    /// # Errors
    ///
    /// - `DuplicateOrderNo` if the order number already exists
    /// - `DatabaseError` on persistence failure
    async fn insert(&self, order: &Order) -> Result<(), DomainError>;

    /// Find an order by its merchant order number.
    ///
    /// Returns `None` if not found.
    async fn find_by_order_no(&self, order_no: &str) -> Result<Option<Order>, DomainError>;

    /// List a client's orders, most recent first.
    ///
    /// Backed by the `(client_id, status)` index; used for status polling
    /// and reporting.
    async fn find_by_client(&self, client_id: &ClientId) -> Result<Vec<Order>, DomainError>;

    /// Atomically move an order from `expected` to `next` status, applying
    /// `patch`, only if the stored status still equals `expected`.
    ///
    /// Returns whether the transition applied. A `false` return means the
    /// order is missing or another caller won the race; it is not an error.
    async fn compare_and_transition(
        &self,
        order_no: &str,
        expected: OrderStatus,
        next: OrderStatus,
        patch: TransitionPatch,
    ) -> Result<bool, DomainError>;
}
