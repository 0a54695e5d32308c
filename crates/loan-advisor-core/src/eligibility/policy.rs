//! Lending policy: FOIR limits, per-product pricing and status thresholds.
//!
//! Two FOIR conventions are in use on the public site. The eligibility wizard
//! applies 70% (salaried) / 65% (others) to gross income and then deducts
//! existing obligations; the calculator suite applies a flat 40% to income
//! left after expenses and obligations. Neither is hardcoded here: both are
//! presets of [`LendingPolicy`] and the policy name is echoed in every
//! verdict's assumptions.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::{types::*, LoanAdvisorError, LoanAdvisorResult};

/// Income the FOIR percentage is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoirBasis {
    /// `income * limit - obligations`
    GrossIncome,
    /// `(income - expenses - obligations) * limit`
    AvailableIncome,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FoirPolicy {
    pub basis: FoirBasis,
    pub salaried: Ratio,
    pub self_employed: Ratio,
    pub business_owner: Ratio,
}

impl FoirPolicy {
    pub fn limit_for(&self, employment: EmploymentType) -> Ratio {
        match employment {
            EmploymentType::Salaried => self.salaried,
            EmploymentType::SelfEmployed => self.self_employed,
            EmploymentType::BusinessOwner => self.business_owner,
        }
    }
}

impl Default for FoirPolicy {
    fn default() -> Self {
        FoirPolicy {
            basis: FoirBasis::GrossIncome,
            salaried: dec!(0.70),
            self_employed: dec!(0.65),
            business_owner: dec!(0.65),
        }
    }
}

/// Pricing and term for one loan product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductTerms {
    pub annual_rate_percent: Percent,
    pub tenure_months: Months,
    /// Ceiling on the loan as a multiple of monthly income.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income_multiple_cap: Option<Decimal>,
}

impl ProductTerms {
    fn new(annual_rate_percent: Percent, tenure_months: Months) -> Self {
        ProductTerms {
            annual_rate_percent,
            tenure_months,
            income_multiple_cap: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductTable {
    pub home: ProductTerms,
    pub car: ProductTerms,
    pub personal: ProductTerms,
    pub business: ProductTerms,
    pub property_backed: ProductTerms,
}

impl ProductTable {
    pub fn terms(&self, loan_type: LoanType) -> &ProductTerms {
        match loan_type {
            LoanType::Home => &self.home,
            LoanType::Car => &self.car,
            LoanType::Personal => &self.personal,
            LoanType::Business => &self.business,
            LoanType::PropertyBacked => &self.property_backed,
        }
    }
}

impl Default for ProductTable {
    fn default() -> Self {
        ProductTable {
            home: ProductTerms::new(dec!(8.5), 240),
            car: ProductTerms::new(dec!(9.5), 84),
            personal: ProductTerms {
                income_multiple_cap: Some(dec!(10)),
                ..ProductTerms::new(dec!(12.0), 60)
            },
            business: ProductTerms::new(dec!(10.5), 120),
            property_backed: ProductTerms::new(dec!(9.5), 240),
        }
    }
}

/// Haircut and pricing premium for self-employed applicants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelfEmployedAdjustment {
    /// Multiplier on the maximum loan amount.
    pub amount_factor: Ratio,
    pub rate_premium_percent: Percent,
}

/// Fractions of the requested amount that separate the verdicts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusThresholds {
    pub eligible: Ratio,
    pub conditionally_eligible: Ratio,
}

impl Default for StatusThresholds {
    fn default() -> Self {
        StatusThresholds {
            eligible: dec!(0.8),
            conditionally_eligible: dec!(0.5),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LendingPolicy {
    pub name: String,
    pub foir: FoirPolicy,
    pub products: ProductTable,
    pub self_employed_adjustment: Option<SelfEmployedAdjustment>,
    /// Bureau score below which applications are declined outright.
    pub min_credit_score: Option<u32>,
    pub thresholds: StatusThresholds,
}

impl Default for LendingPolicy {
    fn default() -> Self {
        LendingPolicy::standard()
    }
}

impl LendingPolicy {
    /// Eligibility-wizard rules: 70/65% of gross income, self-employed
    /// haircut, 650 score floor.
    pub fn standard() -> Self {
        LendingPolicy {
            name: "standard".into(),
            foir: FoirPolicy::default(),
            products: ProductTable::default(),
            self_employed_adjustment: Some(SelfEmployedAdjustment {
                amount_factor: dec!(0.8),
                rate_premium_percent: dec!(0.5),
            }),
            min_credit_score: Some(650),
            thresholds: StatusThresholds::default(),
        }
    }

    /// Calculator-suite rules: 40% of income left after expenses and
    /// obligations, shorter tenures, no employment or score adjustments.
    pub fn calculator_suite() -> Self {
        LendingPolicy {
            name: "calculator_suite".into(),
            foir: FoirPolicy {
                basis: FoirBasis::AvailableIncome,
                salaried: dec!(0.40),
                self_employed: dec!(0.40),
                business_owner: dec!(0.40),
            },
            products: ProductTable {
                home: ProductTerms::new(dec!(8.5), 240),
                car: ProductTerms::new(dec!(9.0), 60),
                personal: ProductTerms::new(dec!(12.0), 36),
                business: ProductTerms::new(dec!(10.5), 36),
                property_backed: ProductTerms::new(dec!(9.5), 36),
            },
            self_employed_adjustment: None,
            min_credit_score: None,
            thresholds: StatusThresholds::default(),
        }
    }

    /// Reject policies that would make the engines divide by zero or
    /// produce inverted verdicts.
    pub fn validate(&self) -> LoanAdvisorResult<()> {
        for (field, limit) in [
            ("foir.salaried", self.foir.salaried),
            ("foir.self_employed", self.foir.self_employed),
            ("foir.business_owner", self.foir.business_owner),
        ] {
            if limit <= Decimal::ZERO || limit > Decimal::ONE {
                return Err(LoanAdvisorError::invalid(
                    field,
                    "FOIR limit must be in (0, 1].",
                ));
            }
        }

        for loan_type in LoanType::ALL {
            let terms = self.products.terms(loan_type);
            if terms.annual_rate_percent <= Decimal::ZERO {
                return Err(LoanAdvisorError::InvalidInput {
                    field: "products.annual_rate_percent".into(),
                    reason: format!("{loan_type} rate must be greater than zero."),
                });
            }
            if terms.tenure_months == 0 {
                return Err(LoanAdvisorError::InvalidInput {
                    field: "products.tenure_months".into(),
                    reason: format!("{loan_type} tenure must be at least one month."),
                });
            }
        }

        if let Some(adj) = &self.self_employed_adjustment {
            if adj.amount_factor <= Decimal::ZERO || adj.amount_factor > Decimal::ONE {
                return Err(LoanAdvisorError::invalid(
                    "self_employed_adjustment.amount_factor",
                    "Amount factor must be in (0, 1].",
                ));
            }
        }

        let t = &self.thresholds;
        if t.conditionally_eligible <= Decimal::ZERO || t.conditionally_eligible > t.eligible {
            return Err(LoanAdvisorError::invalid(
                "thresholds",
                "Conditional threshold must be positive and not above the eligible threshold.",
            ));
        }
        if t.eligible > Decimal::ONE {
            return Err(LoanAdvisorError::invalid(
                "thresholds.eligible",
                "Eligible threshold cannot exceed the requested amount.",
            ));
        }
        Ok(())
    }
}
