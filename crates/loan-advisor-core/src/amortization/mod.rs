pub mod comparison;
pub mod installment;
pub mod planning;

pub use installment::{compute_installment, compute_max_principal, LoanQuote, LoanQuoteInput};
