//! Payment provider configuration

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use super::error::ValidationError;

/// Payment provider configuration.
///
/// Carries everything needed to build a signed redirect to the aggregator
/// gateway and to verify its asynchronous notifications. Constructed once
/// at startup and passed into the payment handlers explicitly.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Merchant identifier assigned by the provider
    pub merchant_id: String,

    /// Shared signing secret for outbound and inbound requests
    pub secret: String,

    /// Provider gateway submit URL the client is redirected to
    pub gateway_url: String,

    /// Our asynchronous notification (webhook) URL
    pub notify_url: String,

    /// Where the provider sends the browser after payment
    pub return_url: String,

    /// Product name shown on the provider's checkout page
    #[serde(default = "default_product_name")]
    pub product_name: String,

    /// Fixed price of one analysis, in the provider's settlement currency
    #[serde(default = "default_amount")]
    pub amount: Decimal,
}

impl PaymentConfig {
    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.merchant_id.is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT_MERCHANT_ID"));
        }
        if self.secret.is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT_SECRET"));
        }
        if url::Url::parse(&self.gateway_url).is_err() {
            return Err(ValidationError::InvalidGatewayUrl);
        }
        if url::Url::parse(&self.notify_url).is_err() || url::Url::parse(&self.return_url).is_err()
        {
            return Err(ValidationError::InvalidCallbackUrl);
        }
        if self.amount <= Decimal::ZERO {
            return Err(ValidationError::InvalidOrderAmount);
        }
        Ok(())
    }
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            merchant_id: String::new(),
            secret: String::new(),
            gateway_url: String::new(),
            notify_url: String::new(),
            return_url: String::new(),
            product_name: default_product_name(),
            amount: default_amount(),
        }
    }
}

fn default_product_name() -> String {
    "AI Image Analysis".to_string()
}

fn default_amount() -> Decimal {
    dec!(0.50)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> PaymentConfig {
        PaymentConfig {
            merchant_id: "1001".to_string(),
            secret: "test-signing-secret".to_string(),
            gateway_url: "https://pay.example.com/submit.php".to_string(),
            notify_url: "https://api.example.com/api/payment/notify".to_string(),
            return_url: "https://app.example.com/paid".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn default_amount_is_fifty_cents() {
        let config = PaymentConfig::default();
        assert_eq!(config.amount, dec!(0.50));
    }

    #[test]
    fn validation_accepts_complete_config() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn validation_rejects_missing_merchant_id() {
        let config = PaymentConfig {
            merchant_id: String::new(),
            ..valid_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validation_rejects_missing_secret() {
        let config = PaymentConfig {
            secret: String::new(),
            ..valid_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validation_rejects_relative_gateway_url() {
        let config = PaymentConfig {
            gateway_url: "/submit.php".to_string(),
            ..valid_config()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidGatewayUrl)
        ));
    }

    #[test]
    fn validation_rejects_zero_amount() {
        let config = PaymentConfig {
            amount: Decimal::ZERO,
            ..valid_config()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidOrderAmount)
        ));
    }
}
