use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoanError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Financial impossibility: {0}")]
    FinancialImpossibility(String),

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl LoanError {
    pub(crate) fn invalid(field: &str, reason: &str) -> Self {
        LoanError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// The bare human-readable message, without the variant prefix.
    pub fn reason(&self) -> String {
        match self {
            LoanError::InvalidInput { reason, .. } => reason.clone(),
            LoanError::FinancialImpossibility(msg) | LoanError::SerializationError(msg) => {
                msg.clone()
            }
            LoanError::DivisionByZero { context } => format!("division by zero in {context}"),
        }
    }
}

impl From<serde_json::Error> for LoanError {
    fn from(e: serde_json::Error) -> Self {
        LoanError::SerializationError(e.to_string())
    }
}
