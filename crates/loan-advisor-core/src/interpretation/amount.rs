//! Rupee amounts typed the way people say them: "2.5 lakh", "1 crore", "50k".

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use crate::types::{parse_leading_decimal, Money};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountUnit {
    Unit,
    Thousand,
    Lakh,
    Crore,
}

impl AmountUnit {
    pub fn multiplier(&self) -> Decimal {
        match self {
            AmountUnit::Unit => Decimal::ONE,
            AmountUnit::Thousand => dec!(1_000),
            AmountUnit::Lakh => dec!(100_000),
            AmountUnit::Crore => dec!(10_000_000),
        }
    }

    /// How the unit is spelled in error messages.
    fn spelling(&self) -> &'static str {
        match self {
            AmountUnit::Unit => "digits",
            AmountUnit::Thousand => "k/thousand",
            AmountUnit::Lakh => "lac/lakh",
            AmountUnit::Crore => "crore",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedAmount {
    pub value: Money,
    pub unit: AmountUnit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AmountParseError {
    #[error("Please enter an amount")]
    Empty,
    #[error("Invalid number format with {}", .0.spelling())]
    InvalidWithUnit(AmountUnit),
    #[error("Please enter a valid number")]
    NotANumber,
}

// Checked in this order; "lakh" must win over the "k" in it.
const UNIT_WORDS: [(AmountUnit, &[&str]); 3] = [
    (AmountUnit::Lakh, &["lac", "lakh"]),
    (AmountUnit::Crore, &["crore"]),
    (AmountUnit::Thousand, &["k", "thousand"]),
];

/// Parse a typed amount.
///
/// With a unit word present, the text is reduced to its digits and dots and
/// the leading decimal number is scaled. Without one, every digit in the text
/// is kept, so separators are dropped (`"1,50,000"` → 150000) and so is a
/// decimal point.
pub fn parse_amount(text: &str) -> Result<ParsedAmount, AmountParseError> {
    let clean = text.trim().to_lowercase();
    if clean.is_empty() {
        return Err(AmountParseError::Empty);
    }

    let unit = UNIT_WORDS
        .iter()
        .find(|(_, words)| words.iter().any(|w| clean.contains(w)))
        .map(|(unit, _)| *unit);

    match unit {
        Some(unit) => {
            let kept: String = clean
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '.')
                .collect();
            let invalid = AmountParseError::InvalidWithUnit(unit);
            let value = parse_leading_decimal(&kept)
                .and_then(|n| n.checked_mul(unit.multiplier()))
                .ok_or(invalid)?;
            Ok(ParsedAmount {
                value: value.normalize(),
                unit,
            })
        }
        None => {
            let digits: String = clean.chars().filter(char::is_ascii_digit).collect();
            if digits.is_empty() {
                return Err(AmountParseError::NotANumber);
            }
            let value = Decimal::from_str(&digits).map_err(|_| AmountParseError::NotANumber)?;
            Ok(ParsedAmount {
                value,
                unit: AmountUnit::Unit,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn value(text: &str) -> Decimal {
        parse_amount(text).unwrap().value
    }

    #[test]
    fn test_indian_units() {
        assert_eq!(value("2.5 lakh"), dec!(250_000));
        assert_eq!(value("5 Lacs"), dec!(500_000));
        assert_eq!(value("1 crore"), dec!(10_000_000));
        assert_eq!(value("1.25 Crore"), dec!(12_500_000));
        assert_eq!(value("50k"), dec!(50_000));
        assert_eq!(value("75 thousand"), dec!(75_000));
    }

    #[test]
    fn test_unit_reported() {
        assert_eq!(parse_amount("3 lakh").unwrap().unit, AmountUnit::Lakh);
        assert_eq!(parse_amount("800000").unwrap().unit, AmountUnit::Unit);
    }

    #[test]
    fn test_plain_digits_drop_separators() {
        assert_eq!(value("₹1,50,000"), dec!(150_000));
        assert_eq!(value("Rs. 45000"), dec!(45_000));
        // no unit: the point is discarded with the other non-digits
        assert_eq!(value("2.5"), dec!(25));
    }

    #[test]
    fn test_leading_number_with_unit() {
        assert_eq!(value("2.5.1 lakh"), dec!(250_000));
        assert_eq!(value(".5 crore"), dec!(5_000_000));
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse_amount("   "), Err(AmountParseError::Empty));
        assert_eq!(parse_amount("abc"), Err(AmountParseError::NotANumber));
        assert_eq!(
            parse_amount("few lakh"),
            Err(AmountParseError::InvalidWithUnit(AmountUnit::Lakh))
        );
        assert_eq!(
            parse_amount("some crore").unwrap_err().to_string(),
            "Invalid number format with crore"
        );
        assert_eq!(
            parse_amount("ok").unwrap_err().to_string(),
            "Invalid number format with k/thousand"
        );
    }
}
