use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::installment::compute_installment;
use crate::{types::*, LoanAdvisorError, LoanAdvisorResult};

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// A lender's headline pricing for one product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LenderOffer {
    pub lender: String,
    pub annual_rate_percent: Percent,
    /// Processing fee as a percentage of the loan amount.
    pub processing_fee_percent: Percent,
    #[serde(default)]
    pub features: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferComparisonInput {
    pub amount: Money,
    pub tenure_months: Months,
    /// Offers to compare; the partner panel is used when empty.
    #[serde(default)]
    pub offers: Vec<LenderOffer>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferQuote {
    pub lender: String,
    pub annual_rate_percent: Percent,
    pub monthly_installment: Money,
    pub total_payable: Money,
    pub total_interest: Money,
    pub processing_fee: Money,
    /// Total payable plus processing fee.
    pub all_in_cost: Money,
    pub features: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferComparisonOutput {
    pub quotes: Vec<OfferQuote>,
    /// Lender with the lowest all-in cost.
    pub cheapest_lender: String,
}

/// The partner panel shown on the EMI calculator page.
pub fn default_offers() -> Vec<LenderOffer> {
    vec![
        LenderOffer {
            lender: "Partner Bank A".into(),
            annual_rate_percent: dec!(8.5),
            processing_fee_percent: dec!(0.5),
            features: vec![
                "Zero prepayment charges".into(),
                "Quick approval".into(),
                "Online application".into(),
            ],
        },
        LenderOffer {
            lender: "Partner Bank B".into(),
            annual_rate_percent: dec!(8.75),
            processing_fee_percent: dec!(1.0),
            features: vec![
                "Flexible tenure".into(),
                "Door-step service".into(),
                "Special rates for women".into(),
            ],
        },
        LenderOffer {
            lender: "Partner Bank C".into(),
            annual_rate_percent: dec!(9.0),
            processing_fee_percent: dec!(0.25),
            features: vec![
                "Lowest processing fee".into(),
                "Balance transfer facility".into(),
                "Top-up loans".into(),
            ],
        },
    ]
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Quote the same amount and tenure across several lenders.
pub fn compare_offers(
    input: &OfferComparisonInput,
) -> LoanAdvisorResult<ComputationOutput<OfferComparisonOutput>> {
    let start = Instant::now();
    let mut warnings = Vec::new();

    let offers = if input.offers.is_empty() {
        warnings.push("No offers supplied; using the partner panel.".to_string());
        default_offers()
    } else {
        input.offers.clone()
    };

    ensure_computable("amount", input.amount)?;

    let mut quotes = Vec::with_capacity(offers.len());
    for offer in &offers {
        if offer.processing_fee_percent < Decimal::ZERO {
            return Err(LoanAdvisorError::InvalidInput {
                field: "processing_fee_percent".into(),
                reason: format!("Negative processing fee for {}.", offer.lender),
            });
        }
        let quote = compute_installment(input.amount, offer.annual_rate_percent, input.tenure_months)?;
        let processing_fee = input
            .amount
            .checked_mul(offer.processing_fee_percent / dec!(100))
            .map(round_currency)
            .ok_or_else(|| LoanAdvisorError::overflow("processing_fee_percent"))?;
        let all_in_cost = quote
            .total_payable
            .checked_add(processing_fee)
            .ok_or_else(|| LoanAdvisorError::overflow("processing_fee_percent"))?;
        quotes.push(OfferQuote {
            lender: offer.lender.clone(),
            annual_rate_percent: offer.annual_rate_percent,
            monthly_installment: quote.monthly_installment,
            total_payable: quote.total_payable,
            total_interest: quote.total_interest,
            processing_fee,
            all_in_cost,
            features: offer.features.clone(),
        });
    }

    let cheapest_lender = quotes
        .iter()
        .min_by_key(|q| q.all_in_cost)
        .map(|q| q.lender.clone())
        .unwrap_or_default();

    let assumptions = serde_json::json!({
        "amount": input.amount.to_string(),
        "tenure_months": input.tenure_months,
        "offers": offers.len(),
    });

    Ok(with_metadata(
        "Lender offer comparison (EMI + processing fee)",
        &assumptions,
        warnings,
        start.elapsed().as_micros() as u64,
        OfferComparisonOutput {
            quotes,
            cheapest_lender,
        },
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
