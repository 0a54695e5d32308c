use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoanAdvisorError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl LoanAdvisorError {
    pub(crate) fn invalid(field: &str, reason: &str) -> Self {
        LoanAdvisorError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Arithmetic on `field` left the decimal range.
    pub(crate) fn overflow(field: &str) -> Self {
        Self::invalid(field, "Value is too large to compute.")
    }
}

impl From<serde_json::Error> for LoanAdvisorError {
    fn from(e: serde_json::Error) -> Self {
        LoanAdvisorError::SerializationError(e.to_string())
    }
}
