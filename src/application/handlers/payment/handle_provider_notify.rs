//! HandleProviderNotifyHandler - Command handler for the provider's
//! asynchronous payment notification.
//!
//! The provider redelivers a notification until it reads the exact success
//! token, and the parameters may be forged, so the decision ladder matters:
//! forged or inconsistent input is rejected, while legitimate duplicates
//! are always acknowledged as success to stop redelivery.

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::PaymentConfig;
use crate::domain::order::{OrderError, OrderStatus};
use crate::domain::payment::{signature, ProviderNotify};
use crate::ports::{OrderStore, TransitionPatch};

/// Command carrying the raw notification parameters (query or form).
#[derive(Debug, Clone)]
pub struct HandleProviderNotifyCommand {
    pub params: HashMap<String, String>,
}

/// Accepted notification outcomes. All of these answer the success token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyOutcome {
    /// This delivery performed the `pending -> paid` transition.
    Applied,
    /// The order was already past `pending`, or a concurrent delivery won
    /// the transition race. Acknowledged without mutation.
    Duplicate,
    /// The provider reported a non-success status. Acknowledged without
    /// mutation so the provider does not keep retrying it.
    IgnoredStatus,
}

/// Handler for provider payment notifications.
pub struct HandleProviderNotifyHandler {
    store: Arc<dyn OrderStore>,
    payment: PaymentConfig,
}

impl HandleProviderNotifyHandler {
    pub fn new(store: Arc<dyn OrderStore>, payment: PaymentConfig) -> Self {
        Self { store, payment }
    }

    pub async fn handle(
        &self,
        cmd: HandleProviderNotifyCommand,
    ) -> Result<NotifyOutcome, OrderError> {
        // 1. Verify the signature before trusting any field. Do not log the
        //    parameters themselves.
        if !signature::verify(&cmd.params, &self.payment.secret) {
            tracing::warn!("notification rejected: signature verification failed");
            return Err(OrderError::SignatureMismatch);
        }

        let notify = ProviderNotify::from_params(&cmd.params)
            .map_err(|e| OrderError::validation("out_trade_no", e.to_string()))?;

        // 2. Non-success statuses are acknowledged without any state change.
        if !notify.is_success() {
            tracing::info!(
                order_no = %notify.order_no,
                trade_status = %notify.trade_status,
                "non-success notification acknowledged"
            );
            return Ok(NotifyOutcome::IgnoredStatus);
        }

        // 3. The order must exist.
        let order = self
            .store
            .find_by_order_no(&notify.order_no)
            .await?
            .ok_or_else(|| {
                tracing::warn!(order_no = %notify.order_no, "notification for unknown order");
                OrderError::NotFound(notify.order_no.clone())
            })?;

        // 4. Already processed: acknowledge immediately, with no further
        //    checks or mutation. Re-verifying amounts here would reopen a
        //    window for double-applied side effects.
        if order.status != OrderStatus::Pending {
            tracing::debug!(order_no = %order.order_no, status = %order.status, "duplicate notification");
            return Ok(NotifyOutcome::Duplicate);
        }

        // 5. Reconcile the reported amount against the stored one exactly.
        let reported = notify
            .amount
            .ok_or_else(|| OrderError::validation("money", "missing or unparseable amount"))?;
        if reported != order.amount {
            tracing::warn!(
                order_no = %order.order_no,
                stored = %order.amount,
                reported = %reported,
                "notification rejected: amount mismatch"
            );
            return Err(OrderError::AmountMismatch {
                order_no: order.order_no,
                stored: order.amount,
                reported,
            });
        }

        // 6. The conditional transition; losing the race to a concurrent
        //    delivery is still a successful acknowledgment.
        let patch = TransitionPatch {
            provider_trade_no: notify.provider_trade_no.clone(),
            provider_status_text: Some(notify.trade_status.clone()),
            pay_method: notify.pay_method,
        };
        let applied = self
            .store
            .compare_and_transition(
                &notify.order_no,
                OrderStatus::Pending,
                OrderStatus::Paid,
                patch,
            )
            .await?;

        if applied {
            tracing::info!(order_no = %notify.order_no, "order marked paid");
            Ok(NotifyOutcome::Applied)
        } else {
            tracing::debug!(order_no = %notify.order_no, "lost transition race to concurrent delivery");
            Ok(NotifyOutcome::Duplicate)
        }
    }
}
