//! Conversational intake: the assistant's question sequence, interpretation
//! of each free-text answer, and conversion of the finished conversation into
//! an [`AffordabilityProfile`].
//!
//! The session is plain data so a stateless caller can round-trip it as JSON
//! between answers.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::eligibility::AffordabilityProfile;
use crate::interpretation::{
    classify_employment, detect_loan_type, follow_up_question, match_employment_type,
    parse_amount, AmountParseError, FollowUpTopic, LoanPurpose, LoanTypeMatch,
};
use crate::types::*;
use crate::validation::sanitize_input;
use crate::{LoanAdvisorError, LoanAdvisorResult};

pub const COMPLETION_MESSAGE: &str =
    "Thank you! I have all the basic information. Now let's proceed to detailed assessment.";

// ---------------------------------------------------------------------------
// Questions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntakeField {
    Name,
    Email,
    Phone,
    Pan,
    MonthlyIncome,
    EmploymentType,
    LoanAmount,
    LoanPurpose,
}

impl IntakeField {
    pub const SEQUENCE: [IntakeField; 8] = [
        IntakeField::Name,
        IntakeField::Email,
        IntakeField::Phone,
        IntakeField::Pan,
        IntakeField::MonthlyIncome,
        IntakeField::EmploymentType,
        IntakeField::LoanAmount,
        IntakeField::LoanPurpose,
    ];

    pub fn question(&self) -> &'static str {
        match self {
            IntakeField::Name => {
                "Hi! I'm your FiNNGUARD assistant. Let's start with your full name as per PAN card."
            }
            IntakeField::Email => {
                "Great! Now, please provide your email address for communication."
            }
            IntakeField::Phone => "What's your mobile number?",
            IntakeField::Pan => "Please enter your PAN number (format: ABCDE1234F)",
            IntakeField::MonthlyIncome => "What's your monthly gross income in rupees?",
            IntakeField::EmploymentType => "Are you Salaried or Self-Employed?",
            IntakeField::LoanAmount => "How much loan amount are you looking for?",
            IntakeField::LoanPurpose => "What's the purpose of this loan?",
        }
    }

    /// Suggested replies for select-style questions.
    pub fn options(&self) -> Vec<&'static str> {
        match self {
            IntakeField::EmploymentType => [
                EmploymentType::Salaried,
                EmploymentType::SelfEmployed,
                EmploymentType::BusinessOwner,
            ]
            .iter()
            .map(EmploymentType::label)
            .collect(),
            IntakeField::LoanPurpose => LoanPurpose::ALL.iter().map(LoanPurpose::label).collect(),
            _ => Vec::new(),
        }
    }

    fn follow_up_topic(&self) -> Option<FollowUpTopic> {
        match self {
            IntakeField::MonthlyIncome => Some(FollowUpTopic::MonthlyIncome),
            IntakeField::LoanAmount => Some(FollowUpTopic::LoanAmount),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    pub field: IntakeField,
    pub question: String,
    pub options: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IntakeStep {
    Ask(Prompt),
    Complete { message: String },
}

// ---------------------------------------------------------------------------
// Answers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntakeError {
    #[error(transparent)]
    Amount(#[from] AmountParseError),
    #[error("{0}")]
    Rejected(&'static str),
    #[error("All questions have already been answered")]
    AlreadyComplete,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InterpretedAnswer {
    Amount(Money),
    Text(String),
}

/// Read one answer for `field`. Amounts go through shorthand parsing and
/// the range checks; employment answers are normalised where recognised.
/// Other answers are sanitized and stored as typed.
pub fn interpret_answer(field: IntakeField, text: &str) -> Result<InterpretedAnswer, IntakeError> {
    match field {
        IntakeField::MonthlyIncome => {
            let amount = parse_amount(text)?.value;
            match income_range_error(amount) {
                Some(reason) => Err(IntakeError::Rejected(reason)),
                None => Ok(InterpretedAnswer::Amount(amount)),
            }
        }
        IntakeField::LoanAmount => {
            let amount = parse_amount(text)?.value;
            match loan_amount_range_error(amount) {
                Some(reason) => Err(IntakeError::Rejected(reason)),
                None => Ok(InterpretedAnswer::Amount(amount)),
            }
        }
        IntakeField::EmploymentType => Ok(InterpretedAnswer::Text(
            match_employment_type(text.trim()).to_string(),
        )),
        _ => Ok(InterpretedAnswer::Text(sanitize_input(text))),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeAnswers {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub pan: Option<String>,
    pub monthly_income: Option<Money>,
    pub employment_type: Option<String>,
    pub loan_amount: Option<Money>,
    pub loan_purpose: Option<String>,
}

impl IntakeAnswers {
    fn store(&mut self, field: IntakeField, answer: InterpretedAnswer) {
        match (field, answer) {
            (IntakeField::MonthlyIncome, InterpretedAnswer::Amount(v)) => {
                self.monthly_income = Some(v)
            }
            (IntakeField::LoanAmount, InterpretedAnswer::Amount(v)) => self.loan_amount = Some(v),
            (IntakeField::Name, InterpretedAnswer::Text(t)) => self.name = Some(t),
            (IntakeField::Email, InterpretedAnswer::Text(t)) => self.email = Some(t),
            (IntakeField::Phone, InterpretedAnswer::Text(t)) => self.phone = Some(t),
            (IntakeField::Pan, InterpretedAnswer::Text(t)) => self.pan = Some(t),
            (IntakeField::EmploymentType, InterpretedAnswer::Text(t)) => {
                self.employment_type = Some(t)
            }
            (IntakeField::LoanPurpose, InterpretedAnswer::Text(t)) => self.loan_purpose = Some(t),
            _ => {}
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeSession {
    pub answers: IntakeAnswers,
    /// Index into [`IntakeField::SEQUENCE`] of the question awaiting a reply.
    pub position: usize,
    /// First loan type recognised in any answer; later matches are ignored.
    pub detected_loan_type: Option<LoanTypeMatch>,
}

impl IntakeSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_field(&self) -> Option<IntakeField> {
        IntakeField::SEQUENCE.get(self.position).copied()
    }

    pub fn is_complete(&self) -> bool {
        self.position >= IntakeField::SEQUENCE.len()
    }

    /// The next question, reworded for the detected loan purpose when a
    /// purpose-specific wording exists.
    pub fn current_step(&self) -> IntakeStep {
        let Some(field) = self.current_field() else {
            return IntakeStep::Complete {
                message: COMPLETION_MESSAGE.to_string(),
            };
        };
        let follow_up = match (&self.detected_loan_type, field.follow_up_topic()) {
            (Some(m), Some(topic)) => follow_up_question(m.purpose, topic),
            _ => None,
        };
        IntakeStep::Ask(Prompt {
            field,
            question: follow_up.unwrap_or(field.question()).to_string(),
            options: field.options().into_iter().map(String::from).collect(),
        })
    }

    /// Record a reply to the current question. A rejected answer does not
    /// advance the session, so the same question is asked again.
    pub fn answer(&mut self, text: &str) -> Result<IntakeStep, IntakeError> {
        let field = self.current_field().ok_or(IntakeError::AlreadyComplete)?;

        if self.detected_loan_type.is_none() {
            if let Some(m) = detect_loan_type(text) {
                tracing::debug!(purpose = %m.purpose, keyword = %m.matched_keyword, "loan type detected");
                self.answers.loan_purpose = Some(m.purpose.label().to_string());
                self.detected_loan_type = Some(m);
            }
        }

        let interpreted = interpret_answer(field, text)?;
        self.answers.store(field, interpreted);
        self.position += 1;
        Ok(self.current_step())
    }

    /// Affordability inputs gathered so far. Needs income, employment and a
    /// recognisable purpose.
    pub fn to_profile(&self) -> LoanAdvisorResult<AffordabilityProfile> {
        let a = &self.answers;
        let monthly_income = a
            .monthly_income
            .ok_or_else(|| LoanAdvisorError::invalid("monthly_income", "Not answered yet."))?;

        let employment_answer = a.employment_type.as_deref().unwrap_or_default();
        let employment_type = EmploymentType::from_label(employment_answer)
            .or_else(|| classify_employment(employment_answer))
            .ok_or_else(|| {
                LoanAdvisorError::invalid("employment_type", "Employment type not recognised.")
            })?;

        let purpose_answer = a.loan_purpose.as_deref().unwrap_or_default();
        let loan_type = LoanPurpose::from_label(purpose_answer)
            .or_else(|| detect_loan_type(purpose_answer).map(|m| m.purpose))
            .map(|p| p.loan_type())
            .ok_or_else(|| LoanAdvisorError::invalid("loan_purpose", "Loan purpose not recognised."))?;

        Ok(AffordabilityProfile {
            monthly_income,
            monthly_expenses: Money::ZERO,
            existing_obligations: Money::ZERO,
            employment_type,
            loan_type,
            requested_amount: a.loan_amount,
            credit_score: None,
            tenure_months: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn run(answers: &[&str]) -> IntakeSession {
        let mut s = IntakeSession::new();
        for a in answers {
            s.answer(a).unwrap();
        }
        s
    }

    #[test]
    fn test_first_question() {
        let s = IntakeSession::new();
        match s.current_step() {
            IntakeStep::Ask(p) => {
                assert_eq!(p.field, IntakeField::Name);
                assert!(p.question.starts_with("Hi! I'm your FiNNGUARD assistant."));
                assert!(p.options.is_empty());
            }
            other => panic!("unexpected step {other:?}"),
        }
    }

    #[test]
    fn test_full_conversation() {
        let s = run(&[
            "Anita Rao",
            "anita@example.com",
            "98765 43210",
            "ABCDE1234F",
            "1.2 lakh",
            "I work for a bank",
            "50 lakh",
            "Home Purchase",
        ]);
        assert!(s.is_complete());
        assert_eq!(s.answers.monthly_income, Some(dec!(120_000)));
        assert_eq!(s.answers.employment_type.as_deref(), Some("Salaried"));
        assert_eq!(s.answers.loan_amount, Some(dec!(5_000_000)));
        assert_eq!(
            s.current_step(),
            IntakeStep::Complete {
                message: COMPLETION_MESSAGE.to_string()
            }
        );

        let profile = s.to_profile().unwrap();
        assert_eq!(profile.loan_type, LoanType::Home);
        assert_eq!(profile.employment_type, EmploymentType::Salaried);
        assert_eq!(profile.requested_amount, Some(dec!(5_000_000)));
    }

    #[test]
    fn test_rejected_amount_keeps_position() {
        let mut s = run(&["Anita Rao", "anita@example.com", "9876543210", "ABCDE1234F"]);
        let err = s.answer("5000").unwrap_err();
        assert_eq!(err.to_string(), "Minimum income should be ₹10,000");
        assert_eq!(s.current_field(), Some(IntakeField::MonthlyIncome));

        let err = s.answer("lots").unwrap_err();
        assert_eq!(err.to_string(), "Please enter a valid number");
    }

    #[test]
    fn test_detection_latches_and_rewords_questions() {
        let mut s = run(&["Anita Rao", "anita@example.com", "9876543210", "ABCDE1234F"]);
        // income answer mentions a car; a later business mention is ignored
        let step = s.answer("80000, saving for a car").unwrap();
        let detected = s.detected_loan_type.clone().unwrap();
        assert_eq!(detected.purpose, LoanPurpose::CarPurchase);
        assert_eq!(s.answers.loan_purpose.as_deref(), Some("Car Purchase"));
        assert!(matches!(step, IntakeStep::Ask(ref p) if p.field == IntakeField::EmploymentType));

        let step = s.answer("business owner").unwrap();
        assert_eq!(
            s.detected_loan_type.as_ref().map(|m| m.purpose),
            Some(LoanPurpose::CarPurchase)
        );
        match step {
            IntakeStep::Ask(p) => {
                assert_eq!(p.field, IntakeField::LoanAmount);
                assert_eq!(p.question, "What is the on-road price of the car you want to buy?");
            }
            other => panic!("unexpected step {other:?}"),
        }
    }

    #[test]
    fn test_answer_after_completion() {
        let mut s = IntakeSession {
            position: IntakeField::SEQUENCE.len(),
            ..IntakeSession::default()
        };
        assert_eq!(s.answer("hello"), Err(IntakeError::AlreadyComplete));
    }

    #[test]
    fn test_profile_needs_income() {
        let s = run(&["Anita Rao"]);
        assert!(s.to_profile().is_err());
    }

    #[test]
    fn test_session_round_trips_as_json() {
        let s = run(&["Anita Rao", "anita@example.com"]);
        let json = serde_json::to_string(&s).unwrap();
        let back: IntakeSession = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn test_interpret_answer_sanitizes_text() {
        assert_eq!(
            interpret_answer(IntakeField::Name, "  <b>Anita</b> "),
            Ok(InterpretedAnswer::Text("bAnita/b".into()))
        );
    }
}
