//! ConsumeForAnalysisHandler - the gate in front of the paid analysis.
//!
//! Redeems a paid order exactly once. Under concurrent duplicate requests
//! for the same order, exactly one caller gets the snapshot; every other
//! caller sees AlreadyConsumed and must not run the paid action.

use std::sync::Arc;

use crate::domain::order::{Order, OrderError, OrderStatus};
use crate::ports::{OrderStore, TransitionPatch};

/// Command to consume a paid order for analysis.
#[derive(Debug, Clone)]
pub struct ConsumeForAnalysisCommand {
    pub order_no: String,
}

/// Handler performing the `paid -> analyzed` transition.
pub struct ConsumeForAnalysisHandler {
    store: Arc<dyn OrderStore>,
}

impl ConsumeForAnalysisHandler {
    pub fn new(store: Arc<dyn OrderStore>) -> Self {
        Self { store }
    }

    /// Consumes the order, returning the snapshot read before mutation.
    ///
    /// The snapshot carries the `client_id` and provider echo for the
    /// downstream analysis call.
    pub async fn handle(&self, cmd: ConsumeForAnalysisCommand) -> Result<Order, OrderError> {
        let order = self
            .store
            .find_by_order_no(&cmd.order_no)
            .await?
            .ok_or_else(|| OrderError::NotFound(cmd.order_no.clone()))?;

        match order.status {
            OrderStatus::Analyzed => return Err(OrderError::AlreadyConsumed(cmd.order_no)),
            OrderStatus::Pending => return Err(OrderError::NotPaid(cmd.order_no)),
            OrderStatus::Paid => {}
        }

        let applied = self
            .store
            .compare_and_transition(
                &cmd.order_no,
                OrderStatus::Paid,
                OrderStatus::Analyzed,
                TransitionPatch::default(),
            )
            .await?;

        if applied {
            tracing::info!(order_no = %cmd.order_no, "order consumed for analysis");
            Ok(order)
        } else {
            // A concurrent caller redeemed the order between our read and
            // the conditional write.
            Err(OrderError::AlreadyConsumed(cmd.order_no))
        }
    }
}
