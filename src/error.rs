use crate::domain::response::GatewayAction;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("Invalid output model")]
    InvalidOutputModel,
    #[error("{action} action can not be performed.")]
    ActionNotAllowed { action: GatewayAction },
    #[error("Gateway error: {0}")]
    GatewayError(String),
    #[error("Mail error: {0}")]
    MailError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[cfg(feature = "storage-rocksdb")]
    #[error("Storage error: {0}")]
    StorageError(#[from] rocksdb::Error),
    #[error("Internal error: {0}")]
    InternalError(Box<dyn std::error::Error + Send + Sync>),
}

impl PaymentError {
    /// Errors that abort the current operation and are shown to the merchant
    /// or customer as-is.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            PaymentError::InvalidOutputModel | PaymentError::ActionNotAllowed { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, PaymentError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(PaymentError::InvalidOutputModel, true)]
    #[case(PaymentError::ActionNotAllowed { action: GatewayAction::Void }, true)]
    #[case(PaymentError::GatewayError("timeout".to_string()), false)]
    #[case(PaymentError::MailError("Invalid sender data".to_string()), false)]
    #[case(PaymentError::ConfigError("bad toml".to_string()), false)]
    fn test_is_user_facing(#[case] error: PaymentError, #[case] expected: bool) {
        assert_eq!(error.is_user_facing(), expected);
    }

    #[test]
    fn test_action_not_allowed_message() {
        let error = PaymentError::ActionNotAllowed {
            action: GatewayAction::Capture,
        };
        assert_eq!(error.to_string(), "Capture action can not be performed.");
    }
}
