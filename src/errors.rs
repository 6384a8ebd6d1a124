use std::result::Result as StdResult;

use thiserror::Error;
use uuid::Uuid;

/// Error type shared by the period engine, the overview service, and storage backends.
#[derive(Debug, Error)]
pub enum BudgetError {
    #[error("User not found: {0}")]
    UserNotFound(Uuid),
    #[error("Invalid amount for `{field}`: {value:?}")]
    InvalidAmount { field: String, value: String },
    #[error("Amount overflow while {0}")]
    AmountOverflow(String),
    #[error("Invalid period: {0}")]
    InvalidPeriod(String),
    #[error("Persistence error: {0}")]
    StorageError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = StdResult<T, BudgetError>;

impl BudgetError {
    pub fn invalid_amount(field: impl Into<String>, value: impl Into<String>) -> Self {
        BudgetError::InvalidAmount {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn overflow(context: impl Into<String>) -> Self {
        BudgetError::AmountOverflow(context.into())
    }

    /// True for failures caused by the request itself rather than the system.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            BudgetError::UserNotFound(_)
                | BudgetError::InvalidAmount { .. }
                | BudgetError::InvalidPeriod(_)
        )
    }
}

impl From<std::io::Error> for BudgetError {
    fn from(err: std::io::Error) -> Self {
        BudgetError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for BudgetError {
    fn from(err: serde_json::Error) -> Self {
        BudgetError::StorageError(err.to_string())
    }
}
