pub mod error;
pub mod types;

#[cfg(feature = "amortization")]
pub mod amortization;

#[cfg(feature = "eligibility")]
pub mod eligibility;

#[cfg(feature = "interpretation")]
pub mod interpretation;

#[cfg(feature = "validation")]
pub mod validation;

#[cfg(feature = "contact")]
pub mod contact;

#[cfg(feature = "intake")]
pub mod intake;

pub use error::LoanAdvisorError;
pub use types::*;

/// Standard result type for all loan-advisor operations
pub type LoanAdvisorResult<T> = Result<T, LoanAdvisorError>;
