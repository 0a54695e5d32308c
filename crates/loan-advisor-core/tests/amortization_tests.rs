use loan_advisor_core::amortization::installment::installment;
use loan_advisor_core::amortization::{compute_installment, compute_max_principal};
use loan_advisor_core::LoanAdvisorError;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Installment scenarios
// ===========================================================================

#[test]
fn test_home_loan_quote() {
    // ₹10 lakh at 8.5% over 20 years
    let q = compute_installment(dec!(1_000_000), dec!(8.5), 240).unwrap();
    assert_eq!(q.monthly_installment, dec!(8678));
    assert_eq!(q.total_interest, q.total_payable - dec!(1_000_000));
    assert!(q.total_interest > Decimal::ZERO);
}

#[test]
fn test_zero_rate_is_rejected() {
    let err = compute_installment(dec!(500_000), Decimal::ZERO, 60).unwrap_err();
    assert!(matches!(err, LoanAdvisorError::InvalidInput { .. }));
}

#[test]
fn test_zero_tenure_is_rejected() {
    assert!(compute_installment(dec!(500_000), dec!(10), 0).is_err());
    assert!(compute_max_principal(dec!(10_000), dec!(10), 0).is_err());
}

#[test]
fn test_zero_installment_borrows_nothing() {
    assert_eq!(
        compute_max_principal(Decimal::ZERO, dec!(8.5), 240).unwrap(),
        Decimal::ZERO
    );
}

// ===========================================================================
// Properties
// ===========================================================================

fn arb_principal() -> impl Strategy<Value = Decimal> {
    (50_000i64..=100_000_000).prop_map(Decimal::from)
}

fn arb_rate() -> impl Strategy<Value = Decimal> {
    // 0.5% .. 30.0% in tenths
    (5i64..=300).prop_map(|tenths| Decimal::new(tenths, 1))
}

fn arb_tenure() -> impl Strategy<Value = u32> {
    1u32..=360
}

proptest! {
    #[test]
    fn total_payable_covers_principal(p in arb_principal(), r in arb_rate(), n in arb_tenure()) {
        let q = compute_installment(p, r, n).unwrap();
        prop_assert!(q.total_payable >= p);
        prop_assert!(q.total_interest >= Decimal::ZERO);
    }

    #[test]
    fn max_principal_inverts_installment(p in arb_principal(), r in arb_rate(), n in arb_tenure()) {
        let emi = installment(p, r, n).unwrap();
        let back = compute_max_principal(emi, r, n).unwrap();
        prop_assert!((back - p).abs() <= Decimal::ONE, "p={} back={}", p, back);
    }

    #[test]
    fn higher_rate_costs_more(p in arb_principal(), r in arb_rate(), n in 2u32..=360) {
        let low = installment(p, r, n).unwrap();
        let high = installment(p, r + dec!(1), n).unwrap();
        prop_assert!(high > low);
    }
}
