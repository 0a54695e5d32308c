use clap::Args;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use loan_advisor_core::amortization::comparison::{compare_offers, OfferComparisonInput};
use loan_advisor_core::amortization::installment::quote_loan;
use loan_advisor_core::amortization::planning::{
    business_roi, savings_vs_loan, BusinessRoiInput, SavingsVsLoanInput,
};
use loan_advisor_core::amortization::{compute_max_principal, LoanQuoteInput};
use loan_advisor_core::{round_currency, Months};

use crate::input;

/// Arguments for an EMI quote
#[derive(Args)]
pub struct EmiArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan principal in rupees
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (8.5 = 8.5%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Tenure in months
    #[arg(long)]
    pub tenure_months: Option<Months>,
}

/// Arguments for the largest affordable principal
#[derive(Args)]
pub struct MaxPrincipalArgs {
    /// Path to JSON input file
    #[arg(long)]
    pub input: Option<String>,

    /// Largest installment the borrower can pay
    #[arg(long)]
    pub max_installment: Option<Decimal>,

    /// Annual interest rate in percent
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Tenure in months
    #[arg(long)]
    pub tenure_months: Option<Months>,
}

#[derive(Deserialize)]
struct MaxPrincipalInput {
    max_installment: Decimal,
    annual_rate_percent: Decimal,
    tenure_months: Months,
}

/// Arguments for comparing lender offers
#[derive(Args)]
pub struct CompareArgs {
    /// Path to JSON input file (amount, tenure_months, offers)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan amount
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// Tenure in months
    #[arg(long)]
    pub tenure_months: Option<Months>,
}

/// Arguments for business loan ROI
#[derive(Args)]
pub struct BusinessRoiArgs {
    /// Path to JSON input file
    #[arg(long)]
    pub input: Option<String>,

    #[arg(long)]
    pub loan_amount: Option<Decimal>,

    /// Annual interest rate in percent
    #[arg(long)]
    pub rate: Option<Decimal>,

    #[arg(long)]
    pub tenure_years: Option<u32>,

    #[arg(long)]
    pub monthly_revenue: Option<Decimal>,

    /// Net profit margin in percent of revenue
    #[arg(long)]
    pub profit_margin: Option<Decimal>,
}

/// Arguments for saving up versus borrowing
#[derive(Args)]
pub struct SavingsVsLoanArgs {
    /// Path to JSON input file
    #[arg(long)]
    pub input: Option<String>,

    #[arg(long)]
    pub target_amount: Option<Decimal>,

    #[arg(long, default_value = "0")]
    pub current_savings: Decimal,

    #[arg(long)]
    pub monthly_savings: Option<Decimal>,

    /// Annual loan rate in percent
    #[arg(long)]
    pub rate: Option<Decimal>,

    #[arg(long)]
    pub tenure_years: Option<u32>,
}

pub fn run_emi(args: EmiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let quote_input = match input::read_input::<LoanQuoteInput>(args.input.as_deref())? {
        Some(v) => v,
        None => LoanQuoteInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate_percent: args.rate.ok_or("--rate is required (or provide --input)")?,
            tenure_months: args
                .tenure_months
                .ok_or("--tenure-months is required (or provide --input)")?,
        },
    };
    let result = quote_loan(&quote_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_max_principal(args: MaxPrincipalArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mp = match input::read_input::<MaxPrincipalInput>(args.input.as_deref())? {
        Some(v) => v,
        None => MaxPrincipalInput {
            max_installment: args
                .max_installment
                .ok_or("--max-installment is required (or provide --input)")?,
            annual_rate_percent: args.rate.ok_or("--rate is required (or provide --input)")?,
            tenure_months: args
                .tenure_months
                .ok_or("--tenure-months is required (or provide --input)")?,
        },
    };
    let principal = compute_max_principal(mp.max_installment, mp.annual_rate_percent, mp.tenure_months)?;
    Ok(serde_json::json!({
        "result": {
            "max_principal": round_currency(principal).to_string(),
            "max_installment": mp.max_installment.to_string(),
            "annual_rate_percent": mp.annual_rate_percent.to_string(),
            "tenure_months": mp.tenure_months,
        },
        "methodology": "Annuity inverse of the reducing-balance EMI",
    }))
}

pub fn run_compare(args: CompareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let cmp = match input::read_input::<OfferComparisonInput>(args.input.as_deref())? {
        Some(v) => v,
        None => OfferComparisonInput {
            amount: args.amount.ok_or("--amount is required (or provide --input)")?,
            tenure_months: args
                .tenure_months
                .ok_or("--tenure-months is required (or provide --input)")?,
            offers: Vec::new(),
        },
    };
    let result = compare_offers(&cmp)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_business_roi(args: BusinessRoiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let roi = match input::read_input::<BusinessRoiInput>(args.input.as_deref())? {
        Some(v) => v,
        None => BusinessRoiInput {
            loan_amount: args
                .loan_amount
                .ok_or("--loan-amount is required (or provide --input)")?,
            annual_rate_percent: args.rate.ok_or("--rate is required (or provide --input)")?,
            tenure_years: args
                .tenure_years
                .ok_or("--tenure-years is required (or provide --input)")?,
            monthly_revenue: args
                .monthly_revenue
                .ok_or("--monthly-revenue is required (or provide --input)")?,
            profit_margin_percent: args
                .profit_margin
                .ok_or("--profit-margin is required (or provide --input)")?,
        },
    };
    let result = business_roi(&roi)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_savings_vs_loan(args: SavingsVsLoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let svl = match input::read_input::<SavingsVsLoanInput>(args.input.as_deref())? {
        Some(v) => v,
        None => SavingsVsLoanInput {
            target_amount: args
                .target_amount
                .ok_or("--target-amount is required (or provide --input)")?,
            current_savings: args.current_savings,
            monthly_savings: args
                .monthly_savings
                .ok_or("--monthly-savings is required (or provide --input)")?,
            loan_rate_percent: args.rate.ok_or("--rate is required (or provide --input)")?,
            loan_tenure_years: args
                .tenure_years
                .ok_or("--tenure-years is required (or provide --input)")?,
        },
    };
    let result = savings_vs_loan(&svl)?;
    Ok(serde_json::to_value(result)?)
}
