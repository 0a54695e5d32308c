//! Rule-based reading of free-text chat answers.

pub mod amount;
pub mod keywords;
pub mod purpose;

pub use amount::{parse_amount, AmountParseError, AmountUnit, ParsedAmount};
pub use keywords::{classify_employment, detect_loan_type, match_employment_type, LoanTypeMatch};
pub use purpose::{follow_up_question, FollowUpTopic, LoanPurpose};
