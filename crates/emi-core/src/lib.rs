pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "emi")]
pub mod loan;

pub use error::LoanError;
pub use types::*;

/// Standard result type for all loan operations
pub type LoanResult<T> = Result<T, LoanError>;
