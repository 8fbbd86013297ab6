use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub title: String,
    pub description: String,
}

#[derive(Error, Debug, Clone, Serialize, PartialEq)]
pub enum SettlementError {
    /// A primary strategy could not produce a usable plan
    #[error("Strategy {strategy} failed: {reason}")]
    StrategyFailed { strategy: String, reason: String },

    /// The fallback strategy failed, nothing left to try
    #[error("Fallback settlement failed: {0}")]
    FallbackFailed(String),

    /// Creditor and debtor totals differ by more than the tolerance
    #[error("Unbalanced input: credits {credits} do not match debits {debits}")]
    UnbalancedInput { credits: f64, debits: f64 },

    #[error("Request body is required")]
    MissingBody,

    /// Generic input validation error with detailed field information
    #[error("Invalid input for field `{0}`: {1:?}")]
    InvalidInput(String, FieldError),

    #[error("Internal server error: {0}")]
    InternalServerError(String),

    #[error("Logging error: {0}")]
    LoggingError(String),
}

impl SettlementError {
    pub fn strategy_failed(strategy: &str, reason: impl Into<String>) -> Self {
        SettlementError::StrategyFailed {
            strategy: strategy.to_string(),
            reason: reason.into(),
        }
    }
}
