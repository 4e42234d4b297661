//! Payment method selection.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Payment channel offered by the aggregator provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayMethod {
    #[default]
    Alipay,
    Wxpay,
}

impl PayMethod {
    /// Wire value used in provider requests and notifications.
    pub fn as_wire(&self) -> &'static str {
        match self {
            PayMethod::Alipay => "alipay",
            PayMethod::Wxpay => "wxpay",
        }
    }

    /// Parses the provider wire value.
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "alipay" => Some(PayMethod::Alipay),
            "wxpay" => Some(PayMethod::Wxpay),
            _ => None,
        }
    }
}

impl fmt::Display for PayMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_wire())
    }
}
