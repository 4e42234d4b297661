//! Order operation error taxonomy.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::foundation::DomainError;

/// Errors surfaced by checkout, webhook, and analysis-gate operations.
#[derive(Debug, Clone, Error)]
pub enum OrderError {
    /// No order exists for the given order number.
    #[error("Order '{0}' not found")]
    NotFound(String),

    /// The requested payment method is not a recognized channel.
    #[error("Unrecognized pay method '{0}'")]
    InvalidPayMethod(String),

    /// Order number generation kept colliding with stored orders.
    #[error("Could not allocate a unique order number")]
    OrderNoExhausted,

    /// The order has not reached `paid`; the analysis cannot run.
    #[error("Order '{0}' has not been paid")]
    NotPaid(String),

    /// The paid analysis for this order was already redeemed.
    #[error("Order '{0}' has already been consumed")]
    AlreadyConsumed(String),

    /// The notification signature did not verify against the shared secret.
    #[error("Notification signature verification failed")]
    SignatureMismatch,

    /// The notification reported a different amount than the order holds.
    #[error("Amount mismatch for order '{order_no}': stored {stored}, reported {reported}")]
    AmountMismatch {
        order_no: String,
        stored: Decimal,
        reported: Decimal,
    },

    /// Request input failed validation.
    #[error("Validation failed for '{field}': {message}")]
    Validation { field: String, message: String },

    /// The storage backend failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// The analysis provider failed after the order was consumed.
    #[error("Analyzer error: {0}")]
    Analyzer(String),
}

impl OrderError {
    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        OrderError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Stable machine-readable code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            OrderError::NotFound(_) => "ORDER_NOT_FOUND",
            OrderError::InvalidPayMethod(_) => "INVALID_PAY_METHOD",
            OrderError::OrderNoExhausted => "ORDER_NO_EXHAUSTED",
            OrderError::NotPaid(_) => "NOT_PAID",
            OrderError::AlreadyConsumed(_) => "ALREADY_CONSUMED",
            OrderError::SignatureMismatch => "SIGNATURE_MISMATCH",
            OrderError::AmountMismatch { .. } => "AMOUNT_MISMATCH",
            OrderError::Validation { .. } => "VALIDATION_FAILED",
            OrderError::Storage(_) => "STORAGE_ERROR",
            OrderError::Analyzer(_) => "ANALYZER_ERROR",
        }
    }
}

impl From<DomainError> for OrderError {
    fn from(err: DomainError) -> Self {
        OrderError::Storage(err.to_string())
    }
}
