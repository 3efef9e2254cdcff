use crate::domain::model::{ChargeError, DeliveryError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShopError {
    #[error("no cookie in stock")]
    OutOfStock,

    #[error("your card was declined")]
    CardDeclined {
        amount_in_cents: u64,
        #[source]
        source: ChargeError,
    },

    #[error("your email receipt could not be sent")]
    ReceiptUndelivered {
        amount_in_cents: u64,
        #[source]
        source: DeliveryError,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

pub type Result<T> = std::result::Result<T, ShopError>;

/// Which purchase step failed. Callers branch on this instead of the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseErrorKind {
    OutOfStock,
    Charge,
    Delivery,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Stock,
    Payment,
    Notification,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ShopError {
    /// Purchase failure kind, `None` for configuration and system errors.
    pub fn kind(&self) -> Option<PurchaseErrorKind> {
        match self {
            ShopError::OutOfStock => Some(PurchaseErrorKind::OutOfStock),
            ShopError::CardDeclined { .. } => Some(PurchaseErrorKind::Charge),
            ShopError::ReceiptUndelivered { .. } => Some(PurchaseErrorKind::Delivery),
            _ => None,
        }
    }

    /// True when the card was charged even though the call returned an error.
    pub fn charge_applied(&self) -> bool {
        matches!(self, ShopError::ReceiptUndelivered { .. })
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ShopError::OutOfStock => ErrorCategory::Stock,
            ShopError::CardDeclined { .. } => ErrorCategory::Payment,
            ShopError::ReceiptUndelivered { .. } => ErrorCategory::Notification,
            ShopError::ConfigError { .. }
            | ShopError::MissingConfigError { .. }
            | ShopError::InvalidConfigValueError { .. }
            | ShopError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            ShopError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // money moved, only the notification is missing
            ShopError::ReceiptUndelivered { .. } => ErrorSeverity::Medium,
            ShopError::OutOfStock | ShopError::CardDeclined { .. } => ErrorSeverity::High,
            _ => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ShopError::OutOfStock => {
                "Apologize to the customer and try again once stock is replenished".to_string()
            }
            ShopError::CardDeclined { .. } => {
                "Ask the customer for another payment method; nothing was charged".to_string()
            }
            ShopError::ReceiptUndelivered { amount_in_cents, .. } => format!(
                "The card was charged {} cents; tell the customer no receipt email will arrive",
                amount_in_cents
            ),
            ShopError::MissingConfigError { field } => {
                format!("Add the '{}' setting to the configuration", field)
            }
            ShopError::InvalidConfigValueError { field, .. }
            | ShopError::ConfigValidationError { field, .. } => {
                format!("Fix the '{}' setting and run again", field)
            }
            ShopError::ConfigError { .. } => "Check the configuration file".to_string(),
            ShopError::IoError(_) => "Check that the file exists and is readable".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ShopError::OutOfStock
            | ShopError::CardDeclined { .. }
            | ShopError::ReceiptUndelivered { .. } => self.to_string(),
            ShopError::IoError(e) => format!("Could not read a file: {}", e),
            other => format!("Configuration problem: {}", other),
        }
    }
}
