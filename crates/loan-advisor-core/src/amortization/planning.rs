//! Borrow-or-not planning calculators: business return on a loan, and
//! saving towards a target versus borrowing for it.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::installment::compute_installment;
use crate::{types::*, LoanAdvisorError, LoanAdvisorResult};

// ---------------------------------------------------------------------------
// Business ROI
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessRoiInput {
    pub loan_amount: Money,
    pub annual_rate_percent: Percent,
    pub tenure_years: u32,
    pub monthly_revenue: Money,
    /// Net profit margin as a percentage of revenue.
    pub profit_margin_percent: Percent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessRoiOutput {
    pub monthly_installment: Money,
    pub total_payable: Money,
    pub total_interest: Money,
    pub monthly_profit: Money,
    /// Monthly profit less the installment.
    pub net_monthly_cash_flow: Money,
    /// Annual profit over loan amount, percent, two places.
    pub roi_percent: Decimal,
    /// Months of profit needed to cover the principal.
    pub breakeven_months: Option<Decimal>,
    pub recommendation: String,
}

pub fn business_roi(
    input: &BusinessRoiInput,
) -> LoanAdvisorResult<ComputationOutput<BusinessRoiOutput>> {
    let start = Instant::now();
    let mut warnings = Vec::new();

    if input.tenure_years == 0 {
        return Err(LoanAdvisorError::invalid(
            "tenure_years",
            "Tenure must be at least one year.",
        ));
    }
    if input.monthly_revenue < Decimal::ZERO {
        return Err(LoanAdvisorError::invalid(
            "monthly_revenue",
            "Revenue cannot be negative.",
        ));
    }
    ensure_computable("loan_amount", input.loan_amount)?;
    ensure_computable("monthly_revenue", input.monthly_revenue)?;
    let tenure_months = years_to_months("tenure_years", input.tenure_years)?;

    let quote = compute_installment(input.loan_amount, input.annual_rate_percent, tenure_months)?;

    let monthly_profit = input
        .monthly_revenue
        .checked_mul(input.profit_margin_percent / dec!(100))
        .ok_or_else(|| LoanAdvisorError::overflow("profit_margin_percent"))?;
    let net_monthly_cash_flow = monthly_profit
        .checked_sub(quote.monthly_installment)
        .ok_or_else(|| LoanAdvisorError::overflow("profit_margin_percent"))?;
    let roi_percent = monthly_profit
        .checked_mul(dec!(12))
        .and_then(|annual| annual.checked_div(input.loan_amount))
        .and_then(|share| share.checked_mul(dec!(100)))
        .map(round_percent)
        .ok_or_else(|| LoanAdvisorError::overflow("profit_margin_percent"))?;

    let breakeven_months = if monthly_profit > Decimal::ZERO {
        let months = input
            .loan_amount
            .checked_div(monthly_profit)
            .ok_or_else(|| LoanAdvisorError::overflow("monthly_revenue"))?;
        Some(round_currency(months))
    } else {
        warnings.push("Business is not profitable; breakeven is undefined.".to_string());
        None
    };
    if net_monthly_cash_flow < Decimal::ZERO {
        warnings.push("Monthly profit does not cover the installment.".to_string());
    }

    let recommendation = if roi_percent > dec!(15) {
        "Excellent ROI! This loan will significantly boost your business."
    } else if roi_percent > dec!(10) {
        "Good ROI. This loan should be profitable."
    } else {
        "Consider if the ROI justifies the loan. Explore ways to increase profitability."
    };

    let assumptions = serde_json::json!({
        "tenure_months": tenure_months,
        "profit_margin_percent": input.profit_margin_percent.to_string(),
    });

    Ok(with_metadata(
        "Business loan ROI (annual profit / loan amount)",
        &assumptions,
        warnings,
        start.elapsed().as_micros() as u64,
        BusinessRoiOutput {
            monthly_installment: quote.monthly_installment,
            total_payable: quote.total_payable,
            total_interest: quote.total_interest,
            monthly_profit: round_currency(monthly_profit),
            net_monthly_cash_flow: round_currency(net_monthly_cash_flow),
            roi_percent,
            breakeven_months,
            recommendation: recommendation.to_string(),
        },
    ))
}

// ---------------------------------------------------------------------------
// Savings vs loan
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsVsLoanInput {
    pub target_amount: Money,
    #[serde(default)]
    pub current_savings: Money,
    pub monthly_savings: Money,
    pub loan_rate_percent: Percent,
    pub loan_tenure_years: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsVsLoanOutput {
    /// Months of saving needed to close the gap, rounded.
    pub months_to_save: Decimal,
    pub loan_installment: Money,
    pub loan_total_cost: Money,
    pub saving_is_faster: bool,
    pub recommendation: String,
}

pub fn savings_vs_loan(
    input: &SavingsVsLoanInput,
) -> LoanAdvisorResult<ComputationOutput<SavingsVsLoanOutput>> {
    let start = Instant::now();

    if input.monthly_savings <= Decimal::ZERO {
        return Err(LoanAdvisorError::invalid(
            "monthly_savings",
            "Monthly savings must be positive.",
        ));
    }
    if input.loan_tenure_years == 0 {
        return Err(LoanAdvisorError::invalid(
            "loan_tenure_years",
            "Tenure must be at least one year.",
        ));
    }

    ensure_computable("target_amount", input.target_amount)?;
    ensure_computable("current_savings", input.current_savings)?;
    let tenure_months = years_to_months("loan_tenure_years", input.loan_tenure_years)?;
    let remaining = (input.target_amount - input.current_savings).max(Decimal::ZERO);
    let months_to_save = remaining
        .checked_div(input.monthly_savings)
        .map(round_currency)
        .ok_or_else(|| LoanAdvisorError::overflow("monthly_savings"))?;
    let quote = compute_installment(input.target_amount, input.loan_rate_percent, tenure_months)?;

    let saving_is_faster = months_to_save < Decimal::from(tenure_months);
    let recommendation = if saving_is_faster {
        "Saving is better - you'll reach your goal faster and save on interest!"
    } else {
        "Taking a loan might be better - you get immediate access to funds."
    };

    let assumptions = serde_json::json!({
        "remaining_amount": remaining.to_string(),
        "loan_tenure_months": tenure_months,
    });

    Ok(with_metadata(
        "Savings horizon vs loan cost",
        &assumptions,
        Vec::new(),
        start.elapsed().as_micros() as u64,
        SavingsVsLoanOutput {
            months_to_save,
            loan_installment: quote.monthly_installment,
            loan_total_cost: quote.total_payable,
            saving_is_faster,
            recommendation: recommendation.to_string(),
        },
    ))
}

fn years_to_months(field: &str, years: u32) -> LoanAdvisorResult<Months> {
    years
        .checked_mul(12)
        .ok_or_else(|| LoanAdvisorError::overflow(field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn roi_input() -> BusinessRoiInput {
        BusinessRoiInput {
            loan_amount: dec!(1_000_000),
            annual_rate_percent: dec!(12),
            tenure_years: 5,
            monthly_revenue: dec!(200_000),
            profit_margin_percent: dec!(10),
        }
    }

    #[test]
    fn test_roi_and_breakeven() {
        let out = business_roi(&roi_input()).unwrap().result;
        // profit 20k/month, 240k/year on 10 lakh = 24%
        assert_eq!(out.monthly_profit, dec!(20_000));
        assert_eq!(out.roi_percent, dec!(24));
        assert_eq!(out.breakeven_months, Some(dec!(50)));
        assert!(out.recommendation.starts_with("Excellent ROI"));
    }

    #[test]
    fn test_roi_cash_flow_warning() {
        let mut input = roi_input();
        input.profit_margin_percent = dec!(5);
        let out = business_roi(&input).unwrap();
        // 10k profit vs ~22.2k EMI
        assert!(out.result.net_monthly_cash_flow < Decimal::ZERO);
        assert_eq!(out.warnings.len(), 1);
        assert!(out.result.recommendation.starts_with("Good ROI"));
    }

    #[test]
    fn test_unprofitable_business_has_no_breakeven() {
        let mut input = roi_input();
        input.profit_margin_percent = Decimal::ZERO;
        let out = business_roi(&input).unwrap().result;
        assert_eq!(out.breakeven_months, None);
        assert!(out.recommendation.starts_with("Consider"));
    }

    #[test]
    fn test_out_of_range_inputs_are_errors() {
        let mut input = roi_input();
        input.tenure_years = u32::MAX;
        assert!(business_roi(&input).is_err());

        let mut input = roi_input();
        input.profit_margin_percent = Decimal::MAX;
        assert!(business_roi(&input).is_err());

        let mut input = roi_input();
        input.loan_amount = Decimal::MAX;
        assert!(business_roi(&input).is_err());

        assert!(savings_vs_loan(&SavingsVsLoanInput {
            target_amount: dec!(600_000),
            current_savings: Decimal::ZERO,
            monthly_savings: dec!(0.0000000000000000000000001),
            loan_rate_percent: dec!(12),
            loan_tenure_years: 5,
        })
        .is_err());
    }

    #[test]
    fn test_saving_faster_than_loan_tenure() {
        let out = savings_vs_loan(&SavingsVsLoanInput {
            target_amount: dec!(600_000),
            current_savings: dec!(100_000),
            monthly_savings: dec!(25_000),
            loan_rate_percent: dec!(12),
            loan_tenure_years: 5,
        })
        .unwrap()
        .result;
        assert_eq!(out.months_to_save, dec!(20));
        assert!(out.saving_is_faster);
    }

    #[test]
    fn test_loan_faster_when_savings_are_small() {
        let out = savings_vs_loan(&SavingsVsLoanInput {
            target_amount: dec!(600_000),
            current_savings: Decimal::ZERO,
            monthly_savings: dec!(5_000),
            loan_rate_percent: dec!(12),
            loan_tenure_years: 5,
        })
        .unwrap()
        .result;
        assert_eq!(out.months_to_save, dec!(120));
        assert!(!out.saving_is_faster);
    }

    #[test]
    fn test_zero_savings_rejected() {
        assert!(savings_vs_loan(&SavingsVsLoanInput {
            target_amount: dec!(600_000),
            current_savings: Decimal::ZERO,
            monthly_savings: Decimal::ZERO,
            loan_rate_percent: dec!(12),
            loan_tenure_years: 5,
        })
        .is_err());
    }
}
