use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::affordability::{assess_affordability, AffordabilityProfile};
use super::policy::LendingPolicy;
use crate::{types::*, LoanAdvisorError, LoanAdvisorResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetInput {
    pub monthly_income: Money,
    #[serde(default)]
    pub monthly_expenses: Money,
    #[serde(default)]
    pub existing_emi: Money,
    pub loan_type: LoanType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AffordabilityRating {
    Excellent,
    VeryGood,
    Good,
    Limited,
}

impl AffordabilityRating {
    /// Rating from the share of income the affordable installment represents.
    pub fn from_share(max_installment: Money, monthly_income: Money) -> Self {
        if max_installment <= Decimal::ZERO {
            AffordabilityRating::Limited
        } else if max_installment < monthly_income * dec!(0.2) {
            AffordabilityRating::Excellent
        } else if max_installment < monthly_income * dec!(0.3) {
            AffordabilityRating::VeryGood
        } else if max_installment < monthly_income * dec!(0.4) {
            AffordabilityRating::Good
        } else {
            AffordabilityRating::Limited
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AffordabilityRating::Excellent => "Excellent",
            AffordabilityRating::VeryGood => "Very Good",
            AffordabilityRating::Good => "Good",
            AffordabilityRating::Limited => "Limited",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetSnapshot {
    pub available_income: Money,
    pub max_installment: Money,
    pub max_loan_amount: Money,
    pub interest_rate_percent: Percent,
    pub tenure_months: Months,
    /// Max installment paid over the full tenure.
    pub total_payable: Money,
    pub total_interest: Money,
    pub rating: AffordabilityRating,
    pub recommendation: String,
}

/// How much could be borrowed without straining the monthly budget.
pub fn budget_snapshot(
    input: &BudgetInput,
    policy: &LendingPolicy,
) -> LoanAdvisorResult<ComputationOutput<BudgetSnapshot>> {
    let profile = AffordabilityProfile {
        monthly_income: input.monthly_income,
        monthly_expenses: input.monthly_expenses,
        existing_obligations: input.existing_emi,
        employment_type: EmploymentType::Salaried,
        loan_type: input.loan_type,
        requested_amount: None,
        credit_score: None,
        tenure_months: None,
    };
    let out = assess_affordability(&profile, policy)?;
    let v = &out.result;

    let total_payable = v
        .max_installment
        .checked_mul(Decimal::from(v.tenure_months))
        .map(round_currency)
        .ok_or_else(|| LoanAdvisorError::overflow("tenure_months"))?;
    let rating = AffordabilityRating::from_share(v.max_installment, input.monthly_income);
    let recommendation = if v.max_loan_amount > dec!(100_000) {
        "You have good loan eligibility. Consider applying now!"
    } else {
        "Consider increasing your income or reducing expenses to improve eligibility."
    };

    let snapshot = BudgetSnapshot {
        available_income: v.available_income,
        max_installment: v.max_installment,
        max_loan_amount: v.max_loan_amount,
        interest_rate_percent: v.interest_rate_percent,
        tenure_months: v.tenure_months,
        total_payable,
        total_interest: total_payable - v.max_loan_amount,
        rating,
        recommendation: recommendation.to_string(),
    };

    Ok(ComputationOutput {
        result: snapshot,
        methodology: "Budget affordability snapshot".to_string(),
        assumptions: out.assumptions,
        warnings: out.warnings,
        metadata: out.metadata,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn input() -> BudgetInput {
        BudgetInput {
            monthly_income: dec!(100_000),
            monthly_expenses: dec!(20_000),
            existing_emi: dec!(10_000),
            loan_type: LoanType::Home,
        }
    }

    #[test]
    fn test_home_budget() {
        let s = budget_snapshot(&input(), &LendingPolicy::calculator_suite())
            .unwrap()
            .result;
        assert_eq!(s.max_installment, dec!(28_000));
        assert_eq!(s.max_loan_amount, dec!(3_226_464));
        assert_eq!(s.total_payable, dec!(6_720_000));
        assert_eq!(s.total_interest, dec!(3_493_536));
        assert_eq!(s.rating, AffordabilityRating::VeryGood);
        assert!(s.recommendation.starts_with("You have good loan eligibility"));
    }

    #[test]
    fn test_ratings() {
        let income = dec!(100_000);
        assert_eq!(
            AffordabilityRating::from_share(dec!(16_000), income),
            AffordabilityRating::Excellent
        );
        assert_eq!(
            AffordabilityRating::from_share(dec!(35_000), income),
            AffordabilityRating::Good
        );
        assert_eq!(
            AffordabilityRating::from_share(dec!(40_000), income),
            AffordabilityRating::Limited
        );
        assert_eq!(
            AffordabilityRating::from_share(Decimal::ZERO, income),
            AffordabilityRating::Limited
        );
    }

    #[test]
    fn test_thin_budget_recommendation() {
        let s = budget_snapshot(
            &BudgetInput {
                monthly_income: dec!(20_000),
                monthly_expenses: dec!(18_000),
                existing_emi: Decimal::ZERO,
                loan_type: LoanType::Personal,
            },
            &LendingPolicy::calculator_suite(),
        )
        .unwrap()
        .result;
        assert_eq!(s.max_installment, dec!(800));
        assert_eq!(s.tenure_months, 36);
        assert!(s.recommendation.starts_with("Consider increasing"));
    }
}
