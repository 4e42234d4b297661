//! Order status state machine.

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Payment lifecycle status of an order.
///
/// Strictly monotonic: `Pending -> Paid -> Analyzed`. No transition skips
/// a state or moves backward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Created, awaiting the provider's payment notification.
    Pending,

    /// Payment confirmed by a verified webhook. The analysis has not
    /// been redeemed yet.
    Paid,

    /// The paid analysis has been consumed. Terminal.
    Analyzed,
}

impl OrderStatus {
    /// Wire/storage representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Paid => "paid",
            OrderStatus::Analyzed => "analyzed",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl StateMachine for OrderStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use OrderStatus::*;
        matches!((self, target), (Pending, Paid) | (Paid, Analyzed))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use OrderStatus::*;
        match self {
            Pending => vec![Paid],
            Paid => vec![Analyzed],
            Analyzed => vec![],
        }
    }
}
