//! Parsed provider payment notification.

use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::domain::foundation::ValidationError;
use crate::domain::order::PayMethod;

/// Provider status string that marks a completed payment.
pub const TRADE_SUCCESS: &str = "TRADE_SUCCESS";

/// Acknowledgment body that stops provider redelivery.
///
/// The provider retries a notification until it reads exactly this token,
/// so every handled-or-harmless outcome must answer with it.
pub const SUCCESS_TOKEN: &str = "success";

/// Acknowledgment body for rejected (forged or inconsistent) notifications.
pub const FAIL_TOKEN: &str = "fail";

/// Typed view over the raw notification parameters.
///
/// Only `out_trade_no` is required at parse time; the webhook handler
/// checks the remaining fields in its own order so that non-success
/// notifications can be acknowledged without a full payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderNotify {
    /// Our merchant order number (`out_trade_no`).
    pub order_no: String,
    /// The provider's own trade number (`trade_no`), when present.
    pub provider_trade_no: Option<String>,
    /// Reported amount (`money`), if present and parseable.
    pub amount: Option<Decimal>,
    /// Raw provider status string (`trade_status`).
    pub trade_status: String,
    /// Payment channel echo (`type`), when recognized.
    pub pay_method: Option<PayMethod>,
}

impl ProviderNotify {
    /// Parses the provider's query/form parameters.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` when `out_trade_no` is missing or empty;
    /// without it there is nothing to correlate the notification against.
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, ValidationError> {
        let order_no = params
            .get("out_trade_no")
            .filter(|value| !value.is_empty())
            .ok_or_else(|| ValidationError::empty_field("out_trade_no"))?
            .clone();

        let provider_trade_no = params
            .get("trade_no")
            .filter(|value| !value.is_empty())
            .cloned();

        let amount = params
            .get("money")
            .and_then(|value| value.parse::<Decimal>().ok());

        let trade_status = params.get("trade_status").cloned().unwrap_or_default();

        let pay_method = params
            .get("type")
            .and_then(|value| PayMethod::from_wire(value));

        Ok(Self {
            order_no,
            provider_trade_no,
            amount,
            trade_status,
            pay_method,
        })
    }

    /// Whether the provider reports the payment as completed.
    pub fn is_success(&self) -> bool {
        self.trade_status == TRADE_SUCCESS
    }
}
