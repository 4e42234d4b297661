//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Pool size exceeds maximum allowed (100)")]
    PoolSizeTooLarge,

    #[error("Payment gateway URL is not a valid absolute URL")]
    InvalidGatewayUrl,

    #[error("Order amount must be positive")]
    InvalidOrderAmount,

    #[error("Callback URL is not a valid absolute URL")]
    InvalidCallbackUrl,

    #[error("Analyzer endpoint is not a valid absolute URL")]
    InvalidAnalyzerEndpoint,
}
