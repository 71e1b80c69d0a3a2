use thiserror::Error;

/// Failures reported by a purchase provider. Carried through the service unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Purchase cancelled by user")]
    Cancelled,

    #[error("Payment declined: {reason}")]
    PaymentDeclined { reason: String },

    #[error("Store unreachable: {message}")]
    Network { message: String },

    #[error("Purchases are not allowed on this device")]
    NotAllowed,

    #[error("Purchase provider error: {message}")]
    Other { message: String },
}

#[derive(Error, Debug)]
pub enum EntitlementError {
    #[error("Unable to activate {product_id}: product unavailable")]
    ProductUnavailable { product_id: String },

    #[error("Purchase provider failure: {0}")]
    ProviderFailure(#[from] ProviderError),

    #[error("Store error: {message}")]
    StoreError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Catalogue,
    Purchase,
    Storage,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EntitlementError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EntitlementError::ProductUnavailable { .. } => ErrorCategory::Catalogue,
            EntitlementError::ProviderFailure(_) => ErrorCategory::Purchase,
            EntitlementError::StoreError { .. }
            | EntitlementError::IoError(_)
            | EntitlementError::SerializationError(_) => ErrorCategory::Storage,
            EntitlementError::ConfigError { .. }
            | EntitlementError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // the user backed out, nothing went wrong
            EntitlementError::ProviderFailure(ProviderError::Cancelled) => ErrorSeverity::Low,
            EntitlementError::ProviderFailure(ProviderError::Network { .. }) => {
                ErrorSeverity::Medium
            }
            EntitlementError::ProviderFailure(_) | EntitlementError::ProductUnavailable { .. } => {
                ErrorSeverity::High
            }
            EntitlementError::StoreError { .. }
            | EntitlementError::IoError(_)
            | EntitlementError::SerializationError(_)
            | EntitlementError::ConfigError { .. }
            | EntitlementError::InvalidConfigValueError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            EntitlementError::ProductUnavailable { product_id } => format!(
                "Check that '{}' is listed in the store catalogue and try again later",
                product_id
            ),
            EntitlementError::ProviderFailure(err) => match err {
                ProviderError::Cancelled => "No action needed".to_string(),
                ProviderError::PaymentDeclined { .. } => {
                    "Verify the payment method on the store account".to_string()
                }
                ProviderError::Network { .. } => {
                    "Check network connectivity and retry".to_string()
                }
                ProviderError::NotAllowed => {
                    "Enable in-app purchases in device restrictions".to_string()
                }
                ProviderError::Other { .. } => "Retry the operation later".to_string(),
            },
            EntitlementError::StoreError { .. }
            | EntitlementError::IoError(_)
            | EntitlementError::SerializationError(_) => {
                "Check that the defaults file is readable, writable and valid JSON".to_string()
            }
            EntitlementError::ConfigError { .. }
            | EntitlementError::InvalidConfigValueError { .. } => {
                "Fix the configuration file and run again".to_string()
            }
        }
    }

    /// Process exit code for a command that ended with this error.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    /// Marker shown in front of the user message; low severity outcomes are not failures.
    pub fn status_marker(&self) -> &'static str {
        match self.severity() {
            ErrorSeverity::Low => "ℹ️",
            _ => "❌",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EntitlementError::ProductUnavailable { .. } => {
                "Unable to activate Pro: the upgrade is not available right now".to_string()
            }
            EntitlementError::ProviderFailure(ProviderError::Cancelled) => {
                "Purchase cancelled".to_string()
            }
            EntitlementError::ProviderFailure(err) => format!("Purchase failed: {}", err),
            EntitlementError::StoreError { .. }
            | EntitlementError::IoError(_)
            | EntitlementError::SerializationError(_) => {
                format!("Could not access saved settings: {}", self)
            }
            EntitlementError::ConfigError { message } => {
                format!("Configuration problem: {}", message)
            }
            EntitlementError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration problem in '{}': {}", field, reason)
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, EntitlementError>;
