use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Deserialize;

use loan_advisor_core::amortization::{self, LoanQuoteInput};
use loan_advisor_core::contact::ContactConfig;
use loan_advisor_core::eligibility::{self, LendingPolicy};
use loan_advisor_core::intake::{IntakeSession, IntakeStep};
use loan_advisor_core::{interpretation, validation};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Caller-supplied policy JSON, or the preset when absent.
fn policy_or(policy_json: Option<String>, preset: fn() -> LendingPolicy) -> NapiResult<LendingPolicy> {
    let policy = match policy_json {
        Some(json) => serde_json::from_str::<LendingPolicy>(&json).map_err(to_napi_error)?,
        None => preset(),
    };
    policy.validate().map_err(to_napi_error)?;
    Ok(policy)
}

// ---------------------------------------------------------------------------
// Amortization
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_installment(input_json: String) -> NapiResult<String> {
    let input: LoanQuoteInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = amortization::installment::quote_loan(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[derive(Deserialize)]
struct MaxPrincipalInput {
    max_installment: rust_decimal::Decimal,
    annual_rate_percent: rust_decimal::Decimal,
    tenure_months: u32,
}

#[napi]
pub fn compute_max_principal(input_json: String) -> NapiResult<String> {
    let input: MaxPrincipalInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let principal = amortization::compute_max_principal(
        input.max_installment,
        input.annual_rate_percent,
        input.tenure_months,
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&serde_json::json!({
        "max_principal": loan_advisor_core::round_currency(principal),
    }))
    .map_err(to_napi_error)
}

#[napi]
pub fn compare_offers(input_json: String) -> NapiResult<String> {
    let input: amortization::comparison::OfferComparisonInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = amortization::comparison::compare_offers(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn business_roi(input_json: String) -> NapiResult<String> {
    let input: amortization::planning::BusinessRoiInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = amortization::planning::business_roi(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn savings_vs_loan(input_json: String) -> NapiResult<String> {
    let input: amortization::planning::SavingsVsLoanInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = amortization::planning::savings_vs_loan(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Eligibility
// ---------------------------------------------------------------------------

#[napi]
pub fn assess_affordability(input_json: String, policy_json: Option<String>) -> NapiResult<String> {
    let profile: eligibility::AffordabilityProfile =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let policy = policy_or(policy_json, LendingPolicy::standard)?;
    let output = eligibility::assess_affordability(&profile, &policy).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn quick_check(input_json: String) -> NapiResult<String> {
    let input: eligibility::quick_check::QuickCheckInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = eligibility::quick_check::quick_check(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn detailed_assessment(input_json: String) -> NapiResult<String> {
    let input: eligibility::quick_check::DetailedAssessmentInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = eligibility::quick_check::detailed_assessment(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn budget_snapshot(input_json: String, policy_json: Option<String>) -> NapiResult<String> {
    let input: eligibility::budget::BudgetInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let policy = policy_or(policy_json, LendingPolicy::calculator_suite)?;
    let output = eligibility::budget::budget_snapshot(&input, &policy).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn score_lead(lead_json: String) -> NapiResult<String> {
    let lead: eligibility::LeadRecord = serde_json::from_str(&lead_json).map_err(to_napi_error)?;
    serde_json::to_string(&eligibility::score_lead(&lead)).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Interpretation and validation
// ---------------------------------------------------------------------------

#[napi]
pub fn parse_amount(text: String) -> NapiResult<String> {
    let parsed = interpretation::parse_amount(&text).map_err(to_napi_error)?;
    serde_json::to_string(&parsed).map_err(to_napi_error)
}

/// `"null"` when no loan purpose is recognised.
#[napi]
pub fn detect_loan_type(text: String) -> NapiResult<String> {
    serde_json::to_string(&interpretation::detect_loan_type(&text)).map_err(to_napi_error)
}

#[napi]
pub fn match_employment_type(text: String) -> String {
    interpretation::match_employment_type(&text).to_string()
}

#[napi]
pub fn validate_field(field: String, value: String) -> NapiResult<String> {
    let field: validation::FormField =
        serde_json::from_value(serde_json::Value::String(field)).map_err(to_napi_error)?;
    serde_json::to_string(&validation::validate_field(field, &value)).map_err(to_napi_error)
}

#[napi]
pub fn sanitize_input(input: String) -> String {
    validation::sanitize_input(&input)
}

// ---------------------------------------------------------------------------
// Chat intake
// ---------------------------------------------------------------------------

/// Apply one answer to a session (a fresh one when `session_json` is absent)
/// and return the updated session with the next step. A rejected answer is
/// reported in `error` and leaves the question unchanged.
#[napi]
pub fn intake_answer(session_json: Option<String>, answer: String) -> NapiResult<String> {
    let mut session = match session_json {
        Some(json) => serde_json::from_str::<IntakeSession>(&json).map_err(to_napi_error)?,
        None => IntakeSession::new(),
    };
    let (step, error) = match session.answer(&answer) {
        Ok(step) => (step, None),
        Err(e) => (session.current_step(), Some(e.to_string())),
    };
    let profile = match step {
        IntakeStep::Complete { .. } => Some(session.to_profile().map_err(to_napi_error)?),
        IntakeStep::Ask(_) => None,
    };
    serde_json::to_string(&serde_json::json!({
        "session": session,
        "step": step,
        "error": error,
        "profile": profile,
    }))
    .map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Contact
// ---------------------------------------------------------------------------

#[napi]
pub fn whatsapp_link(message: String, contact_json: Option<String>) -> NapiResult<String> {
    let contact = match contact_json {
        Some(json) => serde_json::from_str::<ContactConfig>(&json).map_err(to_napi_error)?,
        None => ContactConfig::default(),
    };
    Ok(contact.whatsapp_link(&message))
}

#[napi]
pub fn format_inr(amount: String) -> NapiResult<String> {
    let value: rust_decimal::Decimal = amount.trim().parse().map_err(to_napi_error)?;
    Ok(loan_advisor_core::contact::format_inr(value))
}
