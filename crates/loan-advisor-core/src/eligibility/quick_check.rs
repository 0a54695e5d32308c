//! Preliminary eligibility checks run before a full application.
//!
//! Both checks price a 20-year loan on gross-income FOIR and attach a lender
//! panel. The quick check prices from the declared credit band and ignores
//! obligations; the detailed assessment uses the applicant's obligations and
//! tenure at the headline rate.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::affordability::{assess_affordability, AffordabilityProfile, EligibilityVerdict};
use super::credit::{representative_score, CreditBand, DEFAULT_REPRESENTATIVE_SCORE};
use super::policy::{LendingPolicy, ProductTerms};
use crate::{types::*, LoanAdvisorError, LoanAdvisorResult};

pub const PRELIMINARY_TENURE_MONTHS: Months = 240;
const HEADLINE_RATE: Percent = dec!(8.5);
const COMING_SOON: &str = "Coming Soon";

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuickCheckInput {
    pub monthly_income: Money,
    pub loan_amount: Money,
    pub employment_type: EmploymentType,
    /// Band label as picked on the form ("750+", "700-749", ...).
    #[serde(default)]
    pub credit_band: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedAssessmentInput {
    pub monthly_income: Money,
    #[serde(default)]
    pub monthly_obligations: Money,
    pub employment_type: EmploymentType,
    pub loan_amount: Money,
    #[serde(default)]
    pub tenure_months: Option<Months>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LenderRecommendation {
    pub name: String,
    pub rate_percent: Percent,
    pub amount: Money,
    pub features: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EligibilityReport {
    #[serde(flatten)]
    pub verdict: EligibilityVerdict,
    pub credit_score: u32,
    pub lender_recommendations: Vec<LenderRecommendation>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

pub fn quick_check(input: &QuickCheckInput) -> LoanAdvisorResult<ComputationOutput<EligibilityReport>> {
    check_ranges(input.monthly_income, input.loan_amount)?;

    let band = CreditBand::parse(&input.credit_band);
    let rate = band.quick_check_rate();
    let policy = preliminary_policy("quick_check", rate);
    let profile = AffordabilityProfile {
        monthly_income: input.monthly_income,
        monthly_expenses: Decimal::ZERO,
        existing_obligations: Decimal::ZERO,
        employment_type: input.employment_type,
        loan_type: LoanType::Home,
        requested_amount: Some(input.loan_amount),
        credit_score: None,
        tenure_months: Some(PRELIMINARY_TENURE_MONTHS),
    };

    let out = assess_affordability(&profile, &policy)?;
    let amount = out.result.recommended_amount;
    let lenders = vec![
        lender(
            "FiNNGUARD Premium",
            rate,
            amount,
            &["Quick Processing", "Flexible Tenure"],
            None,
        ),
        lender(
            "Multiple Lender Network",
            rate - dec!(0.5),
            amount * dec!(1.1),
            &["Best Rates", "Multiple Options"],
            Some(COMING_SOON),
        ),
    ];

    Ok(into_report(
        out,
        "Quick eligibility check (credit-band pricing)",
        band,
        representative_score(&input.credit_band),
        lenders,
    ))
}

pub fn detailed_assessment(
    input: &DetailedAssessmentInput,
) -> LoanAdvisorResult<ComputationOutput<EligibilityReport>> {
    check_ranges(input.monthly_income, input.loan_amount)?;

    let policy = preliminary_policy("detailed_assessment", HEADLINE_RATE);
    let profile = AffordabilityProfile {
        monthly_income: input.monthly_income,
        monthly_expenses: Decimal::ZERO,
        existing_obligations: input.monthly_obligations,
        employment_type: input.employment_type,
        loan_type: LoanType::Home,
        requested_amount: Some(input.loan_amount),
        credit_score: None,
        tenure_months: Some(input.tenure_months.unwrap_or(PRELIMINARY_TENURE_MONTHS)),
    };

    let out = assess_affordability(&profile, &policy)?;
    let amount = out.result.recommended_amount;
    let lenders = vec![
        lender(
            "FiNNGUARD Premium",
            HEADLINE_RATE,
            amount,
            &["Quick Processing", "Flexible Tenure", "No Prepayment Charges"],
            None,
        ),
        lender(
            "Partner Bank Network",
            dec!(9.0),
            amount * dec!(0.9),
            &["Multiple Options", "Best Rates", "Digital Process"],
            Some(COMING_SOON),
        ),
        lender(
            "NBFC Partners",
            dec!(9.5),
            amount * dec!(0.8),
            &["Fast Approval", "Flexible Terms", "Special Offers"],
            Some(COMING_SOON),
        ),
    ];

    Ok(into_report(
        out,
        "Detailed eligibility assessment (gross FOIR less obligations)",
        CreditBand::Unknown,
        DEFAULT_REPRESENTATIVE_SCORE,
        lenders,
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn check_ranges(income: Money, amount: Money) -> LoanAdvisorResult<()> {
    if let Some(reason) = income_range_error(income) {
        return Err(LoanAdvisorError::invalid("monthly_income", reason));
    }
    if let Some(reason) = loan_amount_range_error(amount) {
        return Err(LoanAdvisorError::invalid("loan_amount", reason));
    }
    Ok(())
}

/// Standard FOIR table, a single home product at `rate`, no haircut and no
/// score floor.
fn preliminary_policy(name: &str, rate: Percent) -> LendingPolicy {
    let mut policy = LendingPolicy {
        name: name.to_string(),
        self_employed_adjustment: None,
        min_credit_score: None,
        ..LendingPolicy::standard()
    };
    policy.products.home = ProductTerms {
        annual_rate_percent: rate,
        tenure_months: PRELIMINARY_TENURE_MONTHS,
        income_multiple_cap: None,
    };
    policy
}

fn lender(
    name: &str,
    rate_percent: Percent,
    amount: Money,
    features: &[&str],
    availability: Option<&str>,
) -> LenderRecommendation {
    LenderRecommendation {
        name: name.to_string(),
        rate_percent,
        amount: round_currency(amount),
        features: features.iter().map(|f| f.to_string()).collect(),
        availability: availability.map(str::to_string),
    }
}

fn into_report(
    out: ComputationOutput<EligibilityVerdict>,
    methodology: &str,
    band: CreditBand,
    credit_score: u32,
    lender_recommendations: Vec<LenderRecommendation>,
) -> ComputationOutput<EligibilityReport> {
    let mut assumptions = out.assumptions;
    if let Some(map) = assumptions.as_object_mut() {
        map.insert("credit_band".into(), serde_json::json!(band));
    }
    ComputationOutput {
        result: EligibilityReport {
            verdict: out.result,
            credit_score,
            lender_recommendations,
        },
        methodology: methodology.to_string(),
        assumptions,
        warnings: out.warnings,
        metadata: out.metadata,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
