use std::io;
use thiserror::Error;

/// Custom error type for the APE monitoring engine
#[derive(Error, Debug)]
pub enum ApeError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unknown metric kind: {0}")]
    InvalidMetricKind(String),

    #[error("Unknown report category: {0}")]
    InvalidCategory(String),

    #[error("No delivery destination configured for {0}")]
    MissingDeliveryTarget(String),

    #[error("Report delivery failed: {0}")]
    Delivery(String),

    #[error("Runtime error: {0}")]
    Runtime(String),
}

/// Result type alias for the APE monitoring engine
pub type Result<T> = std::result::Result<T, ApeError>;

impl ApeError {
    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        ApeError::Config(msg.into())
    }

    pub fn invalid_metric_kind<S: Into<String>>(tag: S) -> Self {
        ApeError::InvalidMetricKind(tag.into())
    }

    pub fn invalid_category<S: Into<String>>(name: S) -> Self {
        ApeError::InvalidCategory(name.into())
    }

    pub fn missing_delivery_target<S: Into<String>>(what: S) -> Self {
        ApeError::MissingDeliveryTarget(what.into())
    }

    /// Create a delivery error
    pub fn delivery<S: Into<String>>(msg: S) -> Self {
        ApeError::Delivery(msg.into())
    }

    pub fn runtime<S: Into<String>>(msg: S) -> Self {
        ApeError::Runtime(msg.into())
    }
}
