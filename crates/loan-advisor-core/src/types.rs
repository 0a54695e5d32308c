use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::{LoanAdvisorError, LoanAdvisorResult};

/// Rupee amounts. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Annual interest rates quoted the way borrowers read them (8.5 = 8.5% p.a.).
pub type Percent = Decimal;

/// Ratios expressed as decimals (0.70 = 70%).
pub type Ratio = Decimal;

/// Loan tenure in months.
pub type Months = u32;

/// Employment category used by FOIR policy and lead scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentType {
    Salaried,
    SelfEmployed,
    BusinessOwner,
}

impl EmploymentType {
    /// Label used in form values and chat replies.
    pub fn label(&self) -> &'static str {
        match self {
            EmploymentType::Salaried => "Salaried",
            EmploymentType::SelfEmployed => "Self-Employed",
            EmploymentType::BusinessOwner => "Business Owner",
        }
    }

    /// Parse a form label. Accepts both spellings of self-employed that the
    /// lead form and the chat wizard produce.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "Salaried" | "salaried" => Some(EmploymentType::Salaried),
            "Self-Employed" | "Self Employed" | "self-employed" | "self_employed" => {
                Some(EmploymentType::SelfEmployed)
            }
            "Business Owner" | "business-owner" | "business_owner" => {
                Some(EmploymentType::BusinessOwner)
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for EmploymentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Loan product families priced by the lending policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanType {
    Home,
    Car,
    Personal,
    Business,
    PropertyBacked,
}

impl LoanType {
    pub const ALL: [LoanType; 5] = [
        LoanType::Home,
        LoanType::Car,
        LoanType::Personal,
        LoanType::Business,
        LoanType::PropertyBacked,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            LoanType::Home => "Home Loan",
            LoanType::Car => "Car Loan",
            LoanType::Personal => "Personal Loan",
            LoanType::Business => "Business Loan",
            LoanType::PropertyBacked => "Loan Against Property",
        }
    }
}

impl std::fmt::Display for LoanType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Smallest monthly income the site accepts.
pub const MIN_MONTHLY_INCOME: Money = dec!(10_000);
/// Largest monthly income the site accepts (₹1 crore).
pub const MAX_MONTHLY_INCOME: Money = dec!(10_000_000);
pub const MIN_LOAN_AMOUNT: Money = dec!(50_000);
/// ₹10 crore.
pub const MAX_LOAN_AMOUNT: Money = dec!(100_000_000);

/// Largest absolute amount (₹10^20) the calculators accept. Larger values are
/// rejected before any arithmetic runs on them.
pub const MAX_COMPUTABLE_AMOUNT: Money = dec!(100_000_000_000_000_000_000);

/// Reject an amount whose magnitude exceeds [`MAX_COMPUTABLE_AMOUNT`].
pub fn ensure_computable(field: &str, value: Money) -> LoanAdvisorResult<()> {
    if value.abs() > MAX_COMPUTABLE_AMOUNT {
        return Err(LoanAdvisorError::invalid(
            field,
            "Amount exceeds the supported range.",
        ));
    }
    Ok(())
}

/// Reason a monthly income falls outside the accepted range, if it does.
pub fn income_range_error(income: Money) -> Option<&'static str> {
    if income <= Decimal::ZERO {
        Some("Please enter a valid income amount")
    } else if income < MIN_MONTHLY_INCOME {
        Some("Minimum income should be ₹10,000")
    } else if income > MAX_MONTHLY_INCOME {
        Some("Maximum income limit is ₹1 crore")
    } else {
        None
    }
}

/// Reason a loan amount falls outside the accepted range, if it does.
pub fn loan_amount_range_error(amount: Money) -> Option<&'static str> {
    if amount <= Decimal::ZERO {
        Some("Please enter a valid loan amount")
    } else if amount < MIN_LOAN_AMOUNT {
        Some("Minimum loan amount is ₹50,000")
    } else if amount > MAX_LOAN_AMOUNT {
        Some("Maximum loan amount is ₹10 crores")
    } else {
        None
    }
}

/// Read a form value the way browsers' `parseInt` does: optional leading
/// whitespace and sign, then as many digits as follow. `"750-799"` → 750,
/// `"1,00,000"` → 1, `"Below 600"` → `None`.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(digits.len(), |(i, _)| i);
    if end == 0 {
        return None;
    }
    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Read a form value the way `parseFloat` does: optional leading whitespace
/// and sign, then `digits[.digits][e[sign]digits]`. `"2.5.1"` → 2.5,
/// `".5"` → 0.5, `"50000abc"` → 50000, `"1e5"` → 100000, `"."` → `None`.
///
/// Magnitudes beyond the decimal range saturate to `Decimal::MAX` (with the
/// sign kept) and vanishing ones read as zero, so range checks still see a
/// number that is too large or too small.
pub fn parse_leading_decimal(raw: &str) -> Option<Decimal> {
    let s = raw.trim_start();
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let int_len = s.bytes().take_while(u8::is_ascii_digit).count();
    let rest = &s[int_len..];
    let frac_len = match rest.strip_prefix('.') {
        Some(after) => after.bytes().take_while(u8::is_ascii_digit).count(),
        None => 0,
    };
    if int_len == 0 && frac_len == 0 {
        return None;
    }

    let int_digits = s[..int_len].trim_start_matches('0');
    let frac_digits = if frac_len == 0 {
        ""
    } else {
        &rest[1..=frac_len]
    };
    let after_mantissa = if rest.starts_with('.') {
        &rest[1 + frac_len..]
    } else {
        rest
    };
    let exponent = parse_exponent(after_mantissa);

    // Shift the decimal point by the exponent over the raw digit string
    let digits = format!("{int_digits}{frac_digits}");
    let point = int_digits.len() as i64 + exponent;
    let significant = digits.trim_start_matches('0');
    if significant.is_empty() {
        return Some(Decimal::ZERO);
    }
    let leading_zeros = (digits.len() - significant.len()) as i64;
    let point = point - leading_zeros;

    // Decimal holds at most 29 integer digits and 28 fractional places
    let value = if point > 29 {
        Decimal::MAX
    } else if point < -28 {
        Decimal::ZERO
    } else {
        let literal = if point <= 0 {
            format!("0.{}{significant}", "0".repeat(point.unsigned_abs() as usize))
        } else if (point as usize) >= significant.len() {
            format!("{significant}{}", "0".repeat(point as usize - significant.len()))
        } else {
            let (whole, frac) = significant.split_at(point as usize);
            format!("{whole}.{frac}")
        };
        parse_bounded(&literal)
    };
    Some(if negative { -value } else { value })
}

/// `e`/`E`, optional sign, digits. Anything else is no exponent.
fn parse_exponent(tail: &str) -> i64 {
    let Some(body) = tail.strip_prefix(['e', 'E']) else {
        return 0;
    };
    let (sign, body) = match body.as_bytes().first() {
        Some(b'-') => (-1, &body[1..]),
        Some(b'+') => (1, &body[1..]),
        _ => (1, body),
    };
    let len = body.bytes().take_while(u8::is_ascii_digit).count();
    if len == 0 {
        return 0;
    }
    // Exponents this large are out of range either way
    let cap = i64::from(i32::MAX);
    let magnitude = body[..len].parse::<i64>().map_or(cap, |m| m.min(cap));
    sign * magnitude
}

/// Parse a plain decimal literal, truncated to 28 significant digits, and
/// saturate integer overflow.
fn parse_bounded(literal: &str) -> Decimal {
    let literal = match literal.split_once('.') {
        Some((whole, frac)) => {
            let whole_digits = if whole == "0" { 0 } else { whole.len() };
            let keep = frac.len().min(28usize.saturating_sub(whole_digits));
            if keep == 0 {
                whole.to_string()
            } else {
                format!("{whole}.{}", &frac[..keep])
            }
        }
        None => literal.to_string(),
    };
    literal.parse().unwrap_or(Decimal::MAX)
}

/// Round to whole rupees, half away from zero.
pub fn round_currency(value: Money) -> Money {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
}

/// Round a percentage for display (two places, half away from zero).
pub fn round_percent(value: Decimal) -> Decimal {
    value
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_currency_half_away_from_zero() {
        assert_eq!(round_currency(dec!(10.5)), dec!(11));
        assert_eq!(round_currency(dec!(11.5)), dec!(12));
        assert_eq!(round_currency(dec!(-2.5)), dec!(-3));
        assert_eq!(round_currency(dec!(8678.2323)), dec!(8678));
    }

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("750-799"), Some(750));
        assert_eq!(parse_leading_int("  800+"), Some(800));
        assert_eq!(parse_leading_int("1,00,000"), Some(1));
        assert_eq!(parse_leading_int("-12abc"), Some(-12));
        assert_eq!(parse_leading_int("Below 600"), None);
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("99999999999999999999999"), None);
    }

    #[test]
    fn test_parse_leading_decimal() {
        assert_eq!(parse_leading_decimal("2.5.1"), Some(dec!(2.5)));
        assert_eq!(parse_leading_decimal(".5"), Some(dec!(0.5)));
        assert_eq!(parse_leading_decimal(" 50000abc"), Some(dec!(50000)));
        assert_eq!(parse_leading_decimal("5."), Some(dec!(5)));
        assert_eq!(parse_leading_decimal("-12.75"), Some(dec!(-12.75)));
        assert_eq!(parse_leading_decimal("."), None);
        assert_eq!(parse_leading_decimal("abc"), None);
        assert_eq!(parse_leading_decimal("007.50"), Some(dec!(7.5)));
        assert_eq!(parse_leading_decimal("0"), Some(Decimal::ZERO));
    }

    #[test]
    fn test_parse_leading_decimal_exponents() {
        assert_eq!(parse_leading_decimal("1e5"), Some(dec!(100000)));
        assert_eq!(parse_leading_decimal("2.5E+4 rupees"), Some(dec!(25000)));
        assert_eq!(parse_leading_decimal("125e-2"), Some(dec!(1.25)));
        // A dangling exponent marker is ignored, as parseFloat does
        assert_eq!(parse_leading_decimal("7e"), Some(dec!(7)));
        assert_eq!(parse_leading_decimal("7e+x"), Some(dec!(7)));
    }

    #[test]
    fn test_parse_leading_decimal_saturates() {
        let long = "9".repeat(40);
        assert_eq!(parse_leading_decimal(&long), Some(Decimal::MAX));
        assert_eq!(parse_leading_decimal("-1e40"), Some(-Decimal::MAX));
        assert_eq!(parse_leading_decimal("1e-40"), Some(Decimal::ZERO));
        assert_eq!(parse_leading_decimal("1e999999999999999999999"), Some(Decimal::MAX));
        assert_eq!(
            parse_leading_decimal("1.00000000000000000000000000000009"),
            Some(Decimal::ONE)
        );
    }

    #[test]
    fn test_range_errors() {
        assert_eq!(income_range_error(dec!(10_000)), None);
        assert_eq!(
            income_range_error(dec!(9_999)),
            Some("Minimum income should be ₹10,000")
        );
        assert_eq!(
            income_range_error(dec!(10_000_001)),
            Some("Maximum income limit is ₹1 crore")
        );
        assert_eq!(loan_amount_range_error(dec!(100_000_000)), None);
        assert_eq!(
            loan_amount_range_error(Decimal::ZERO),
            Some("Please enter a valid loan amount")
        );
    }

    #[test]
    fn test_employment_labels() {
        assert_eq!(
            EmploymentType::from_label("Self Employed"),
            Some(EmploymentType::SelfEmployed)
        );
        assert_eq!(
            EmploymentType::from_label(EmploymentType::BusinessOwner.label()),
            Some(EmploymentType::BusinessOwner)
        );
        assert_eq!(EmploymentType::from_label("Retired"), None);
    }
}
