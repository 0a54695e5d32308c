#![cfg(feature = "intake")]

use loan_advisor_core::eligibility::{assess_affordability, LendingPolicy};
use loan_advisor_core::intake::{IntakeField, IntakeSession, IntakeStep, COMPLETION_MESSAGE};
use loan_advisor_core::interpretation::LoanPurpose;
use loan_advisor_core::{EmploymentType, LoanType};
use rust_decimal_macros::dec;

#[test]
fn test_conversation_feeds_affordability() {
    let mut session = IntakeSession::new();
    let answers = [
        "Ravi Kumar",
        "ravi@example.com",
        "9123456789",
        "PQRST6789K",
        "75k",
        "Freelance consultant",
        "8 lakh",
        "Need it for my business expansion",
    ];
    let mut last = session.current_step();
    for answer in answers {
        last = session.answer(answer).unwrap();
    }
    assert_eq!(
        last,
        IntakeStep::Complete {
            message: COMPLETION_MESSAGE.to_string()
        }
    );

    let profile = session.to_profile().unwrap();
    assert_eq!(profile.monthly_income, dec!(75_000));
    assert_eq!(profile.employment_type, EmploymentType::SelfEmployed);
    assert_eq!(profile.loan_type, LoanType::Business);
    assert_eq!(profile.requested_amount, Some(dec!(800_000)));

    let verdict = assess_affordability(&profile, &LendingPolicy::standard()).unwrap();
    assert!(verdict.result.max_loan_amount > dec!(0));
}

#[test]
fn test_purpose_mentioned_early_rewords_income_question() {
    let mut session = IntakeSession::new();
    for answer in ["Meera", "meera@example.com", "9988776655"] {
        session.answer(answer).unwrap();
    }
    let step = session.answer("ABCDE1234F, looking to buy a house").unwrap();
    assert_eq!(
        session.detected_loan_type.as_ref().map(|m| m.purpose),
        Some(LoanPurpose::HomePurchase)
    );
    match step {
        IntakeStep::Ask(prompt) => {
            assert_eq!(prompt.field, IntakeField::MonthlyIncome);
            assert_eq!(
                prompt.question,
                "What is your monthly household income including spouse income if applicable?"
            );
        }
        other => panic!("unexpected step {other:?}"),
    }
}

#[test]
fn test_select_questions_offer_options() {
    assert_eq!(
        IntakeField::EmploymentType.options(),
        vec!["Salaried", "Self-Employed", "Business Owner"]
    );
    assert_eq!(IntakeField::LoanPurpose.options().len(), 7);
    assert!(IntakeField::Phone.options().is_empty());
}
