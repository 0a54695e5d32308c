//! Reducing-balance EMI (equated monthly installment) arithmetic.
//!
//! `EMI = P * r * (1 + r)^n / ((1 + r)^n - 1)` with `r = annual% / 1200`,
//! and the inverse `P = EMI * ((1 + r)^n - 1) / (r * (1 + r)^n)`.
//!
//! Every calculator in the crate routes through these functions. Rates must
//! be strictly positive and tenures at least one month; there is no
//! straight-line fallback.

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::LoanAdvisorError;
use crate::types::*;
use crate::LoanAdvisorResult;

// ---------------------------------------------------------------------------
// Input / Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanQuoteInput {
    pub principal: Money,
    pub annual_rate_percent: Percent,
    pub tenure_months: Months,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanQuote {
    /// EMI rounded to whole rupees.
    pub monthly_installment: Money,
    /// Exact installment multiplied by the tenure, rounded.
    pub total_payable: Money,
    /// `total_payable - principal`.
    pub total_interest: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Monthly rate as a decimal fraction.
pub fn monthly_rate(annual_rate_percent: Percent) -> Ratio {
    annual_rate_percent / dec!(1200)
}

/// Exact (unrounded) installment. A zero principal yields a zero installment.
pub fn installment(
    principal: Money,
    annual_rate_percent: Percent,
    tenure_months: Months,
) -> LoanAdvisorResult<Money> {
    if principal < Decimal::ZERO {
        return Err(LoanAdvisorError::invalid(
            "principal",
            "Principal cannot be negative.",
        ));
    }
    let (r, growth) = growth_factor(annual_rate_percent, tenure_months)?;
    if principal.is_zero() {
        return Ok(Decimal::ZERO);
    }

    let denom = growth - Decimal::ONE;
    if denom.is_zero() {
        return Err(LoanAdvisorError::DivisionByZero {
            context: "EMI annuity denominator".into(),
        });
    }
    principal
        .checked_mul(r)
        .and_then(|v| v.checked_mul(growth))
        .and_then(|v| v.checked_div(denom))
        .ok_or_else(|| LoanAdvisorError::overflow("principal"))
}

/// EMI, total payable and total interest for a loan, rounded to whole rupees.
pub fn compute_installment(
    principal: Money,
    annual_rate_percent: Percent,
    tenure_months: Months,
) -> LoanAdvisorResult<LoanQuote> {
    if principal <= Decimal::ZERO {
        return Err(LoanAdvisorError::invalid(
            "principal",
            "Principal must be positive.",
        ));
    }
    let exact = installment(principal, annual_rate_percent, tenure_months)?;
    let total_payable = exact
        .checked_mul(Decimal::from(tenure_months))
        .map(round_currency)
        .ok_or_else(|| LoanAdvisorError::overflow("principal"))?;
    let total_interest = total_payable
        .checked_sub(principal)
        .ok_or_else(|| LoanAdvisorError::overflow("principal"))?;

    Ok(LoanQuote {
        monthly_installment: round_currency(exact),
        total_payable,
        total_interest,
    })
}

/// Largest principal whose installment does not exceed `max_installment`.
/// Unrounded; callers round when presenting.
pub fn compute_max_principal(
    max_installment: Money,
    annual_rate_percent: Percent,
    tenure_months: Months,
) -> LoanAdvisorResult<Money> {
    if max_installment < Decimal::ZERO {
        return Err(LoanAdvisorError::invalid(
            "max_installment",
            "Maximum installment cannot be negative.",
        ));
    }
    let (r, growth) = growth_factor(annual_rate_percent, tenure_months)?;
    if max_installment.is_zero() {
        return Ok(Decimal::ZERO);
    }

    let denom = r
        .checked_mul(growth)
        .ok_or_else(|| LoanAdvisorError::overflow("tenure_months"))?;
    if denom.is_zero() {
        return Err(LoanAdvisorError::DivisionByZero {
            context: "max principal annuity denominator".into(),
        });
    }
    max_installment
        .checked_mul(growth - Decimal::ONE)
        .and_then(|v| v.checked_div(denom))
        .ok_or_else(|| LoanAdvisorError::overflow("max_installment"))
}

/// EMI quote wrapped with methodology and assumptions.
pub fn quote_loan(input: &LoanQuoteInput) -> LoanAdvisorResult<ComputationOutput<LoanQuote>> {
    let start = Instant::now();

    let quote = compute_installment(
        input.principal,
        input.annual_rate_percent,
        input.tenure_months,
    )?;
    tracing::debug!(
        principal = %input.principal,
        rate = %input.annual_rate_percent,
        tenure = input.tenure_months,
        emi = %quote.monthly_installment,
        "computed loan quote"
    );

    let assumptions = serde_json::json!({
        "monthly_rate": monthly_rate(input.annual_rate_percent).to_string(),
        "rounding": "nearest rupee, half away from zero",
    });

    Ok(with_metadata(
        "Reducing-balance EMI (annuity formula)",
        &assumptions,
        Vec::new(),
        start.elapsed().as_micros() as u64,
        quote,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Validates rate and tenure, returning `(r, (1 + r)^n)`.
fn growth_factor(
    annual_rate_percent: Percent,
    tenure_months: Months,
) -> LoanAdvisorResult<(Ratio, Decimal)> {
    if annual_rate_percent <= Decimal::ZERO {
        return Err(LoanAdvisorError::invalid(
            "annual_rate_percent",
            "Interest rate must be greater than zero.",
        ));
    }
    if tenure_months == 0 {
        return Err(LoanAdvisorError::invalid(
            "tenure_months",
            "Tenure must be at least one month.",
        ));
    }

    let r = monthly_rate(annual_rate_percent);
    let growth = (Decimal::ONE + r)
        .checked_powi(i64::from(tenure_months))
        .ok_or_else(|| {
            LoanAdvisorError::invalid(
                "tenure_months",
                "Rate and tenure combination overflows decimal precision.",
            )
        })?;
    Ok((r, growth))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
