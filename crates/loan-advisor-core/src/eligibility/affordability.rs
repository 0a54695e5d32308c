use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::policy::{FoirBasis, LendingPolicy, StatusThresholds};
use crate::amortization::installment::installment as exact_installment;
use crate::amortization::compute_max_principal;
use crate::{types::*, LoanAdvisorError, LoanAdvisorResult};

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffordabilityProfile {
    pub monthly_income: Money,
    #[serde(default)]
    pub monthly_expenses: Money,
    /// Installments already being paid on other loans.
    #[serde(default)]
    pub existing_obligations: Money,
    pub employment_type: EmploymentType,
    pub loan_type: LoanType,
    #[serde(default)]
    pub requested_amount: Option<Money>,
    #[serde(default)]
    pub credit_score: Option<u32>,
    /// Overrides the product tenure when the applicant picked one.
    #[serde(default)]
    pub tenure_months: Option<Months>,
}

impl AffordabilityProfile {
    pub fn available_income(&self) -> Money {
        self.monthly_income - self.monthly_expenses - self.existing_obligations
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityStatus {
    Eligible,
    ConditionallyEligible,
    NotEligible,
}

impl EligibilityStatus {
    pub fn label(&self) -> &'static str {
        match self {
            EligibilityStatus::Eligible => "Eligible",
            EligibilityStatus::ConditionallyEligible => "Conditionally Eligible",
            EligibilityStatus::NotEligible => "Not Eligible",
        }
    }
}

impl std::fmt::Display for EligibilityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EligibilityVerdict {
    pub status: EligibilityStatus,
    pub max_loan_amount: Money,
    pub recommended_amount: Money,
    pub interest_rate_percent: Percent,
    pub tenure_months: Months,
    /// EMI on the recommended amount.
    pub installment: Money,
    /// (installment + obligations) / income, percent.
    pub foir_percent: Decimal,
    pub max_installment: Money,
    pub foir_limit: Ratio,
    pub available_income: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Verdict from how much of the requested amount can be lent. Thresholds are
/// inclusive. Without a request, any positive amount is eligible.
pub fn eligibility_status(
    recommended: Money,
    requested: Option<Money>,
    thresholds: &StatusThresholds,
) -> EligibilityStatus {
    match requested {
        Some(req) if req > Decimal::ZERO => {
            if recommended >= req * thresholds.eligible {
                EligibilityStatus::Eligible
            } else if recommended >= req * thresholds.conditionally_eligible {
                EligibilityStatus::ConditionallyEligible
            } else {
                EligibilityStatus::NotEligible
            }
        }
        _ if recommended > Decimal::ZERO => EligibilityStatus::Eligible,
        _ => EligibilityStatus::NotEligible,
    }
}

/// FOIR-based affordability: maximum installment, maximum and recommended
/// loan, and the verdict against the requested amount.
pub fn assess_affordability(
    profile: &AffordabilityProfile,
    policy: &LendingPolicy,
) -> LoanAdvisorResult<ComputationOutput<EligibilityVerdict>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_profile(profile)?;
    policy.validate()?;

    let foir_limit = policy.foir.limit_for(profile.employment_type);
    let terms = policy.products.terms(profile.loan_type);
    let tenure_months = profile.tenure_months.unwrap_or(terms.tenure_months);
    let available_income = profile.available_income();

    let max_installment = match policy.foir.basis {
        FoirBasis::GrossIncome => {
            profile.monthly_income * foir_limit - profile.existing_obligations
        }
        FoirBasis::AvailableIncome => available_income * foir_limit,
    }
    .max(Decimal::ZERO);
    if max_installment.is_zero() {
        warnings.push("Existing commitments leave no room for a new installment.".to_string());
    }

    let mut max_loan = compute_max_principal(max_installment, terms.annual_rate_percent, tenure_months)?;

    if let Some(multiple) = terms.income_multiple_cap {
        let cap = profile
            .monthly_income
            .checked_mul(multiple)
            .ok_or_else(|| LoanAdvisorError::overflow("income_multiple_cap"))?;
        if max_loan > cap {
            warnings.push(format!(
                "{} capped at {multiple} times monthly income.",
                profile.loan_type
            ));
            max_loan = cap;
        }
    }

    let mut rate = terms.annual_rate_percent;
    let self_employed_adjustment = match (&policy.self_employed_adjustment, profile.employment_type) {
        (Some(adj), EmploymentType::SelfEmployed) => {
            max_loan *= adj.amount_factor;
            rate = rate
                .checked_add(adj.rate_premium_percent)
                .ok_or_else(|| LoanAdvisorError::overflow("rate_premium_percent"))?;
            true
        }
        _ => false,
    };

    let max_loan_amount = round_currency(max_loan);
    let recommended_amount = match profile.requested_amount {
        Some(req) => req.min(max_loan_amount),
        None => max_loan_amount,
    };

    let mut status = eligibility_status(
        recommended_amount,
        profile.requested_amount,
        &policy.thresholds,
    );
    if let (Some(floor), Some(score)) = (policy.min_credit_score, profile.credit_score) {
        if score < floor {
            warnings.push(format!("Credit score {score} is below the minimum of {floor}."));
            status = EligibilityStatus::NotEligible;
        }
    }

    let exact = exact_installment(recommended_amount.max(Decimal::ZERO), rate, tenure_months)?;
    let foir_percent = exact
        .checked_add(profile.existing_obligations)
        .and_then(|committed| committed.checked_div(profile.monthly_income))
        .and_then(|share| share.checked_mul(dec!(100)))
        .map(round_percent)
        .ok_or_else(|| LoanAdvisorError::overflow("monthly_income"))?;
    let installment = round_currency(exact);

    tracing::debug!(
        policy = %policy.name,
        employment = %profile.employment_type,
        loan_type = %profile.loan_type,
        max_installment = %max_installment,
        max_loan = %max_loan_amount,
        status = %status,
        "assessed affordability"
    );

    let assumptions = serde_json::json!({
        "policy": policy.name,
        "foir_basis": policy.foir.basis,
        "foir_limit": foir_limit.to_string(),
        "base_rate_percent": terms.annual_rate_percent.to_string(),
        "self_employed_adjustment": self_employed_adjustment,
        "min_credit_score": policy.min_credit_score,
    });

    Ok(with_metadata(
        "FOIR affordability with annuity inverse",
        &assumptions,
        warnings,
        start.elapsed().as_micros() as u64,
        EligibilityVerdict {
            status,
            max_loan_amount,
            recommended_amount,
            interest_rate_percent: rate,
            tenure_months,
            installment,
            foir_percent,
            max_installment: round_currency(max_installment),
            foir_limit,
            available_income,
        },
    ))
}

fn validate_profile(profile: &AffordabilityProfile) -> LoanAdvisorResult<()> {
    ensure_computable("monthly_income", profile.monthly_income)?;
    ensure_computable("monthly_expenses", profile.monthly_expenses)?;
    ensure_computable("existing_obligations", profile.existing_obligations)?;
    if let Some(requested) = profile.requested_amount {
        ensure_computable("requested_amount", requested)?;
    }
    if profile.monthly_income <= Decimal::ZERO {
        return Err(LoanAdvisorError::invalid(
            "monthly_income",
            "Monthly income must be positive.",
        ));
    }
    if profile.monthly_expenses < Decimal::ZERO {
        return Err(LoanAdvisorError::invalid(
            "monthly_expenses",
            "Expenses cannot be negative.",
        ));
    }
    if profile.existing_obligations < Decimal::ZERO {
        return Err(LoanAdvisorError::invalid(
            "existing_obligations",
            "Obligations cannot be negative.",
        ));
    }
    if matches!(profile.requested_amount, Some(r) if r <= Decimal::ZERO) {
        return Err(LoanAdvisorError::invalid(
            "requested_amount",
            "Requested amount must be positive.",
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn profile() -> AffordabilityProfile {
        AffordabilityProfile {
            monthly_income: dec!(100_000),
            monthly_expenses: dec!(20_000),
            existing_obligations: dec!(10_000),
            employment_type: EmploymentType::Salaried,
            loan_type: LoanType::Home,
            requested_amount: None,
            credit_score: None,
            tenure_months: None,
        }
    }

    #[test]
    fn test_gross_basis_max_installment() {
        let v = assess_affordability(&profile(), &LendingPolicy::standard())
            .unwrap()
            .result;
        assert_eq!(v.max_installment, dec!(60_000));
        assert_eq!(v.max_loan_amount, dec!(6_913_850));
        assert_eq!(v.status, EligibilityStatus::Eligible);
        assert_eq!(v.available_income, dec!(70_000));
    }

    #[test]
    fn test_available_basis_max_installment() {
        let v = assess_affordability(&profile(), &LendingPolicy::calculator_suite())
            .unwrap()
            .result;
        assert_eq!(v.max_installment, dec!(28_000));
        assert_eq!(v.max_loan_amount, dec!(3_226_464));
    }

    #[test]
    fn test_exact_eighty_percent_is_eligible() {
        let mut p = profile();
        p.requested_amount = Some(dec!(8_642_312.5));
        let v = assess_affordability(&p, &LendingPolicy::standard())
            .unwrap()
            .result;
        assert_eq!(v.recommended_amount, dec!(6_913_850));
        assert_eq!(v.status, EligibilityStatus::Eligible);
    }

    #[test]
    fn test_status_bands() {
        let t = StatusThresholds::default();
        assert_eq!(
            eligibility_status(dec!(80), Some(dec!(100)), &t),
            EligibilityStatus::Eligible
        );
        assert_eq!(
            eligibility_status(dec!(79.99), Some(dec!(100)), &t),
            EligibilityStatus::ConditionallyEligible
        );
        assert_eq!(
            eligibility_status(dec!(50), Some(dec!(100)), &t),
            EligibilityStatus::ConditionallyEligible
        );
        assert_eq!(
            eligibility_status(dec!(49), Some(dec!(100)), &t),
            EligibilityStatus::NotEligible
        );
        assert_eq!(
            eligibility_status(Decimal::ZERO, None, &t),
            EligibilityStatus::NotEligible
        );
    }

    #[test]
    fn test_foir_percent_includes_obligations() {
        let mut p = profile();
        p.requested_amount = Some(dec!(5_000_000));
        let v = assess_affordability(&p, &LendingPolicy::standard())
            .unwrap()
            .result;
        assert_eq!(v.recommended_amount, dec!(5_000_000));
        assert_eq!(v.installment, dec!(43_391));
        assert_eq!(v.foir_percent, dec!(53.39));
    }

    #[test]
    fn test_self_employed_haircut_and_premium() {
        let mut p = profile();
        p.employment_type = EmploymentType::SelfEmployed;
        let v = assess_affordability(&p, &LendingPolicy::standard())
            .unwrap()
            .result;
        assert_eq!(v.max_installment, dec!(55_000));
        assert_eq!(v.max_loan_amount, dec!(5_070_157));
        assert_eq!(v.interest_rate_percent, dec!(9.0));
    }

    #[test]
    fn test_business_owner_has_no_haircut() {
        let mut p = profile();
        p.employment_type = EmploymentType::BusinessOwner;
        let v = assess_affordability(&p, &LendingPolicy::standard())
            .unwrap()
            .result;
        assert_eq!(v.interest_rate_percent, dec!(8.5));
        assert_eq!(v.max_loan_amount, dec!(6_337_696));
    }

    #[test]
    fn test_personal_loan_income_cap() {
        let p = AffordabilityProfile {
            monthly_income: dec!(50_000),
            monthly_expenses: Decimal::ZERO,
            existing_obligations: Decimal::ZERO,
            loan_type: LoanType::Personal,
            ..profile()
        };
        let out = assess_affordability(&p, &LendingPolicy::standard()).unwrap();
        assert_eq!(out.result.max_loan_amount, dec!(500_000));
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_car_loan_terms() {
        let p = AffordabilityProfile {
            monthly_income: dec!(80_000),
            monthly_expenses: Decimal::ZERO,
            existing_obligations: Decimal::ZERO,
            loan_type: LoanType::Car,
            ..profile()
        };
        let v = assess_affordability(&p, &LendingPolicy::standard())
            .unwrap()
            .result;
        assert_eq!(v.tenure_months, 84);
        assert_eq!(v.max_loan_amount, dec!(3_426_338));
    }

    #[test]
    fn test_low_credit_score_forces_not_eligible() {
        let mut p = profile();
        p.requested_amount = Some(dec!(1_000_000));
        p.credit_score = Some(600);
        let out = assess_affordability(&p, &LendingPolicy::standard()).unwrap();
        assert_eq!(out.result.status, EligibilityStatus::NotEligible);
        assert!(out.warnings[0].contains("600"));
    }

    #[test]
    fn test_obligations_exceeding_limit() {
        let mut p = profile();
        p.existing_obligations = dec!(80_000);
        p.requested_amount = Some(dec!(1_000_000));
        let out = assess_affordability(&p, &LendingPolicy::standard()).unwrap();
        assert_eq!(out.result.max_installment, Decimal::ZERO);
        assert_eq!(out.result.max_loan_amount, Decimal::ZERO);
        assert_eq!(out.result.installment, Decimal::ZERO);
        assert_eq!(out.result.status, EligibilityStatus::NotEligible);
    }

    #[test]
    fn test_zero_income_rejected() {
        let mut p = profile();
        p.monthly_income = Decimal::ZERO;
        let err = assess_affordability(&p, &LendingPolicy::standard()).unwrap_err();
        assert!(matches!(err, LoanAdvisorError::InvalidInput { ref field, .. } if field == "monthly_income"));
    }

    #[test]
    fn test_amounts_beyond_supported_range_rejected() {
        let mut p = profile();
        p.monthly_income = dec!(50_000_000_000_000_000_000_000_000_000);
        p.loan_type = LoanType::Home;
        let err = assess_affordability(&p, &LendingPolicy::standard()).unwrap_err();
        assert!(matches!(err, LoanAdvisorError::InvalidInput { ref field, .. } if field == "monthly_income"));

        let mut p = profile();
        p.existing_obligations = Decimal::MAX;
        assert!(assess_affordability(&p, &LendingPolicy::standard()).is_err());
    }

    #[test]
    fn test_largest_supported_income_still_computes() {
        let mut p = profile();
        p.monthly_income = MAX_COMPUTABLE_AMOUNT;
        p.monthly_expenses = Decimal::ZERO;
        p.existing_obligations = Decimal::ZERO;
        p.loan_type = LoanType::Home;
        let v = assess_affordability(&p, &LendingPolicy::standard())
            .unwrap()
            .result;
        assert!(v.max_loan_amount > MAX_COMPUTABLE_AMOUNT);
        assert_eq!(v.status, EligibilityStatus::Eligible);
    }

    #[test]
    fn test_tenure_override() {
        let mut p = profile();
        p.tenure_months = Some(120);
        let v = assess_affordability(&p, &LendingPolicy::standard())
            .unwrap()
            .result;
        assert_eq!(v.tenure_months, 120);
        assert!(v.max_loan_amount < dec!(6_913_850));
    }

    #[test]
    fn test_policy_name_in_assumptions() {
        let out = assess_affordability(&profile(), &LendingPolicy::calculator_suite()).unwrap();
        assert_eq!(out.assumptions["policy"], "calculator_suite");
        assert_eq!(out.assumptions["foir_basis"], "available_income");
    }
}
