//! CreateCheckoutHandler - Command handler for starting a checkout.

use std::collections::HashMap;
use std::sync::Arc;

use url::Url;

use crate::config::PaymentConfig;
use crate::domain::foundation::{ClientId, ErrorCode};
use crate::domain::order::{Order, OrderError, OrderNoGenerator, PayMethod};
use crate::domain::payment::signature;
use crate::ports::OrderStore;

/// How many fresh order numbers to try before giving up on creation.
const MAX_ORDER_NO_ATTEMPTS: u32 = 3;

/// Command to create a checkout and build the provider redirect.
#[derive(Debug, Clone)]
pub struct CreateCheckoutCommand {
    /// Opaque per-browser client identifier.
    pub client_id: String,
    /// Requested payment channel; defaults when absent.
    pub pay_method: Option<String>,
}

/// Result of a created checkout.
#[derive(Debug, Clone)]
pub struct CreateCheckoutResult {
    pub order_no: String,
    pub redirect_url: String,
}

/// Handler for checkout creation.
///
/// Generates the merchant order number, inserts the pending order at the
/// configured fixed amount, and assembles the signed provider redirect URL.
/// The only side effect is the single insert.
pub struct CreateCheckoutHandler {
    store: Arc<dyn OrderStore>,
    generator: OrderNoGenerator,
    payment: PaymentConfig,
}

impl CreateCheckoutHandler {
    pub fn new(store: Arc<dyn OrderStore>, payment: PaymentConfig) -> Self {
        Self {
            store,
            generator: OrderNoGenerator::new(),
            payment,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateCheckoutCommand,
    ) -> Result<CreateCheckoutResult, OrderError> {
        let client_id = ClientId::new(cmd.client_id)
            .map_err(|e| OrderError::validation("client_id", e.to_string()))?;

        let pay_method = match cmd.pay_method.as_deref() {
            None | Some("") => PayMethod::default(),
            Some(raw) => PayMethod::from_wire(raw)
                .ok_or_else(|| OrderError::InvalidPayMethod(raw.to_string()))?,
        };

        let order = self.insert_with_fresh_order_no(client_id, pay_method).await?;
        let redirect_url = self.build_redirect_url(&order)?;

        tracing::info!(order_no = %order.order_no, pay_method = %pay_method, "checkout created");

        Ok(CreateCheckoutResult {
            order_no: order.order_no,
            redirect_url,
        })
    }

    /// Inserts a pending order, regenerating the order number on collision.
    ///
    /// The store's uniqueness constraint is the real collision guard; the
    /// bounded retry only smooths over the 1-in-900 same-second case.
    async fn insert_with_fresh_order_no(
        &self,
        client_id: ClientId,
        pay_method: PayMethod,
    ) -> Result<Order, OrderError> {
        for attempt in 1..=MAX_ORDER_NO_ATTEMPTS {
            let order_no = self.generator.next();
            let order = Order::create(order_no, client_id.clone(), self.payment.amount, pay_method);

            match self.store.insert(&order).await {
                Ok(()) => return Ok(order),
                Err(err) if err.code == ErrorCode::DuplicateOrderNo => {
                    tracing::debug!(attempt, "order number collision, regenerating");
                }
                Err(err) => return Err(err.into()),
            }
        }

        Err(OrderError::OrderNoExhausted)
    }

    /// Builds the signed redirect URL to the provider gateway.
    fn build_redirect_url(&self, order: &Order) -> Result<String, OrderError> {
        let params: HashMap<String, String> = [
            ("pid", self.payment.merchant_id.clone()),
            ("type", order.pay_method.as_wire().to_string()),
            ("out_trade_no", order.order_no.clone()),
            ("notify_url", self.payment.notify_url.clone()),
            ("return_url", self.payment.return_url.clone()),
            ("name", self.payment.product_name.clone()),
            ("money", order.amount.to_string()),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect();

        let sig = signature::sign(&params, &self.payment.secret);

        let mut url = Url::parse(&self.payment.gateway_url)
            .map_err(|e| OrderError::validation("gateway_url", e.to_string()))?;
        {
            let mut query = url.query_pairs_mut();
            for key in [
                "pid",
                "type",
                "out_trade_no",
                "notify_url",
                "return_url",
                "name",
                "money",
            ] {
                query.append_pair(key, &params[key]);
            }
            query.append_pair(signature::SIGN_FIELD, &sig);
            query.append_pair(signature::SIGN_TYPE_FIELD, signature::SIGN_TYPE);
        }

        Ok(url.to_string())
    }
}
