use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use loan_advisor_core::eligibility::budget::{budget_snapshot, BudgetInput};
use loan_advisor_core::eligibility::lead_scoring::{
    FinancialInfo, LoanDetails, PersonalInfo, Preferences,
};
use loan_advisor_core::eligibility::quick_check::{
    detailed_assessment, quick_check, DetailedAssessmentInput, QuickCheckInput,
};
use loan_advisor_core::eligibility::{
    assess_affordability, score_lead, AffordabilityProfile, LeadRecord,
};
use loan_advisor_core::{EmploymentType, LoanType, Months};

use super::Context;
use crate::input;
use crate::input::policy::PolicyPreset;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum EmploymentArg {
    Salaried,
    SelfEmployed,
    BusinessOwner,
}

impl From<EmploymentArg> for EmploymentType {
    fn from(arg: EmploymentArg) -> Self {
        match arg {
            EmploymentArg::Salaried => EmploymentType::Salaried,
            EmploymentArg::SelfEmployed => EmploymentType::SelfEmployed,
            EmploymentArg::BusinessOwner => EmploymentType::BusinessOwner,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LoanTypeArg {
    Home,
    Car,
    Personal,
    Business,
    PropertyBacked,
}

impl From<LoanTypeArg> for LoanType {
    fn from(arg: LoanTypeArg) -> Self {
        match arg {
            LoanTypeArg::Home => LoanType::Home,
            LoanTypeArg::Car => LoanType::Car,
            LoanTypeArg::Personal => LoanType::Personal,
            LoanTypeArg::Business => LoanType::Business,
            LoanTypeArg::PropertyBacked => LoanType::PropertyBacked,
        }
    }
}

/// Arguments for a full affordability assessment
#[derive(Args)]
pub struct EligibilityArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Gross monthly income
    #[arg(long)]
    pub income: Option<Decimal>,

    /// Monthly living expenses
    #[arg(long, default_value = "0")]
    pub expenses: Decimal,

    /// Installments already being paid
    #[arg(long, default_value = "0")]
    pub obligations: Decimal,

    #[arg(long, value_enum, default_value = "salaried")]
    pub employment: EmploymentArg,

    #[arg(long, value_enum, default_value = "home")]
    pub loan_type: LoanTypeArg,

    /// Requested loan amount
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// Bureau credit score
    #[arg(long)]
    pub credit_score: Option<u32>,

    /// Tenure in months (defaults to the product tenure)
    #[arg(long)]
    pub tenure_months: Option<Months>,
}

/// Arguments for the quick eligibility check
#[derive(Args)]
pub struct QuickCheckArgs {
    /// Path to JSON input file
    #[arg(long)]
    pub input: Option<String>,

    #[arg(long)]
    pub income: Option<Decimal>,

    #[arg(long)]
    pub amount: Option<Decimal>,

    #[arg(long, value_enum, default_value = "salaried")]
    pub employment: EmploymentArg,

    /// Credit band as shown on the form ("750-799", "800+", "Below 600")
    #[arg(long, default_value = "")]
    pub credit_band: String,
}

/// Arguments for the detailed eligibility assessment
#[derive(Args)]
pub struct DetailedAssessmentArgs {
    /// Path to JSON input file
    #[arg(long)]
    pub input: Option<String>,

    #[arg(long)]
    pub income: Option<Decimal>,

    #[arg(long, default_value = "0")]
    pub obligations: Decimal,

    #[arg(long, value_enum, default_value = "salaried")]
    pub employment: EmploymentArg,

    #[arg(long)]
    pub amount: Option<Decimal>,

    #[arg(long)]
    pub tenure_months: Option<Months>,
}

/// Arguments for the budget snapshot
#[derive(Args)]
pub struct BudgetArgs {
    /// Path to JSON input file
    #[arg(long)]
    pub input: Option<String>,

    #[arg(long)]
    pub income: Option<Decimal>,

    #[arg(long, default_value = "0")]
    pub expenses: Decimal,

    /// Existing EMIs
    #[arg(long, default_value = "0")]
    pub existing_emi: Decimal,

    #[arg(long, value_enum, default_value = "home")]
    pub loan_type: LoanTypeArg,
}

/// Arguments for lead scoring
#[derive(Args)]
pub struct ScoreLeadArgs {
    /// Path to JSON lead record (camelCase, as posted by the lead form)
    #[arg(long)]
    pub input: Option<String>,

    #[arg(long, default_value = "")]
    pub name: String,

    #[arg(long, default_value = "")]
    pub phone: String,

    /// Monthly income as typed
    #[arg(long, default_value = "")]
    pub income: String,

    /// Loan amount as typed
    #[arg(long, default_value = "")]
    pub amount: String,

    #[arg(long, default_value = "")]
    pub employment: String,

    /// Credit score band
    #[arg(long, default_value = "")]
    pub credit_score: String,

    /// high, medium or low
    #[arg(long, default_value = "medium")]
    pub urgency: String,
}

pub fn profile_from_args(args: &EligibilityArgs) -> Result<AffordabilityProfile, Box<dyn std::error::Error>> {
    Ok(AffordabilityProfile {
        monthly_income: args.income.ok_or("--income is required (or provide --input)")?,
        monthly_expenses: args.expenses,
        existing_obligations: args.obligations,
        employment_type: args.employment.into(),
        loan_type: args.loan_type.into(),
        requested_amount: args.amount,
        credit_score: args.credit_score,
        tenure_months: args.tenure_months,
    })
}

pub fn run_eligibility(args: EligibilityArgs, ctx: &Context) -> Result<Value, Box<dyn std::error::Error>> {
    let profile = match input::read_input::<AffordabilityProfile>(args.input.as_deref())? {
        Some(v) => v,
        None => profile_from_args(&args)?,
    };
    let policy = ctx.policy(PolicyPreset::Standard)?;
    let result = assess_affordability(&profile, &policy)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_quick_check(args: QuickCheckArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let from_file = input::read_input::<QuickCheckInput>(args.input.as_deref())?;
    let qc = match from_file {
        Some(v) => v,
        None => QuickCheckInput {
            monthly_income: args.income.ok_or("--income is required (or provide --input)")?,
            loan_amount: args.amount.ok_or("--amount is required (or provide --input)")?,
            employment_type: args.employment.into(),
            credit_band: args.credit_band,
        },
    };
    let result = quick_check(&qc)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_detailed_assessment(
    args: DetailedAssessmentArgs,
) -> Result<Value, Box<dyn std::error::Error>> {
    let da = match input::read_input::<DetailedAssessmentInput>(args.input.as_deref())? {
        Some(v) => v,
        None => DetailedAssessmentInput {
            monthly_income: args.income.ok_or("--income is required (or provide --input)")?,
            monthly_obligations: args.obligations,
            employment_type: args.employment.into(),
            loan_amount: args.amount.ok_or("--amount is required (or provide --input)")?,
            tenure_months: args.tenure_months,
        },
    };
    let result = detailed_assessment(&da)?;
    Ok(serde_json::to_value(result)?)
}

pub fn budget_from_args(args: &BudgetArgs) -> Result<BudgetInput, Box<dyn std::error::Error>> {
    Ok(BudgetInput {
        monthly_income: args.income.ok_or("--income is required (or provide --input)")?,
        monthly_expenses: args.expenses,
        existing_emi: args.existing_emi,
        loan_type: args.loan_type.into(),
    })
}

pub fn run_budget(args: BudgetArgs, ctx: &Context) -> Result<Value, Box<dyn std::error::Error>> {
    let budget = match input::read_input::<BudgetInput>(args.input.as_deref())? {
        Some(v) => v,
        None => budget_from_args(&args)?,
    };
    let policy = ctx.policy(PolicyPreset::CalculatorSuite)?;
    let result = budget_snapshot(&budget, &policy)?;
    Ok(serde_json::to_value(result)?)
}

pub fn lead_from_args(args: ScoreLeadArgs) -> LeadRecord {
    LeadRecord {
        personal_info: PersonalInfo {
            name: args.name,
            phone: args.phone,
            ..PersonalInfo::default()
        },
        loan_details: LoanDetails {
            amount: args.amount,
            ..LoanDetails::default()
        },
        financial_info: FinancialInfo {
            income: args.income,
            employment: args.employment,
            credit_score: args.credit_score,
            ..FinancialInfo::default()
        },
        preferences: Preferences {
            urgency: args.urgency,
            ..Preferences::default()
        },
    }
}

pub fn run_score_lead(args: ScoreLeadArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let from_file = input::read_input::<LeadRecord>(args.input.as_deref())?;
    let lead = match from_file {
        Some(v) => v,
        None => lead_from_args(args),
    };
    let score = score_lead(&lead);
    Ok(serde_json::json!({ "result": score }))
}
