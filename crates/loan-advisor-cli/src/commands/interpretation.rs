use clap::{Args, ValueEnum};
use serde_json::Value;

use loan_advisor_core::interpretation::{detect_loan_type, match_employment_type, parse_amount};
use loan_advisor_core::validation::{validate_field, FormField};

/// Arguments for reading a typed amount ("2.5 lakh", "50k")
#[derive(Args)]
pub struct ParseAmountArgs {
    /// Amount as typed
    pub text: String,
}

/// Arguments for loan-purpose detection
#[derive(Args)]
pub struct DetectLoanTypeArgs {
    /// Free-text answer
    pub text: String,
}

/// Arguments for employment matching
#[derive(Args)]
pub struct MatchEmploymentArgs {
    /// Free-text answer
    pub text: String,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FieldArg {
    Pan,
    Phone,
    Email,
    Name,
    Income,
    LoanAmount,
}

impl From<FieldArg> for FormField {
    fn from(arg: FieldArg) -> Self {
        match arg {
            FieldArg::Pan => FormField::Pan,
            FieldArg::Phone => FormField::Phone,
            FieldArg::Email => FormField::Email,
            FieldArg::Name => FormField::Name,
            FieldArg::Income => FormField::Income,
            FieldArg::LoanAmount => FormField::LoanAmount,
        }
    }
}

/// Arguments for form-field validation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ValidateArgs {
    /// Field to validate
    #[arg(long, value_enum)]
    pub field: FieldArg,

    /// Value as entered
    pub value: String,
}

pub fn run_parse_amount(args: ParseAmountArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let parsed = parse_amount(&args.text)?;
    Ok(serde_json::json!({ "result": parsed }))
}

pub fn run_detect_loan_type(args: DetectLoanTypeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let detected = detect_loan_type(&args.text);
    Ok(serde_json::json!({
        "result": {
            "detected": detected.is_some(),
            "purpose": detected.as_ref().map(|m| m.purpose.label()),
            "confidence": detected.as_ref().map(|m| m.confidence),
            "matched_keyword": detected.as_ref().map(|m| m.matched_keyword.as_str()),
        }
    }))
}

pub fn run_match_employment(args: MatchEmploymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    Ok(serde_json::json!({
        "result": { "employment_type": match_employment_type(&args.text) }
    }))
}

pub fn run_validate(args: ValidateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let outcome = validate_field(args.field.into(), &args.value);
    Ok(serde_json::json!({ "result": outcome }))
}
