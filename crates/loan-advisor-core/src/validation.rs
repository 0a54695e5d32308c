//! Form field validators. Failures are values carrying the message shown
//! under the field, never errors.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::types::{income_range_error, loan_amount_range_error, parse_leading_decimal};

static PAN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{5}[0-9]{4}[A-Z]{1}$").expect("PAN pattern"));
static MOBILE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[6-9][0-9]{9}$").expect("mobile pattern"));
static CONTACT_PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\+91|91|0)?[6-9]\d{9}$").expect("contact phone pattern"));
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));
static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z\s]{2,50}$").expect("name pattern"));
static EVENT_HANDLER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)on\w+=").expect("event handler pattern"));
static JS_PROTOCOL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)javascript:").expect("protocol pattern"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub message: String,
}

impl ValidationResult {
    fn ok(message: &str) -> Self {
        ValidationResult {
            is_valid: true,
            message: message.to_string(),
        }
    }

    fn fail(message: &str) -> Self {
        ValidationResult {
            is_valid: false,
            message: message.to_string(),
        }
    }
}

/// Form fields with a validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Pan,
    Phone,
    Email,
    Name,
    Income,
    LoanAmount,
}

pub fn validate_field(field: FormField, value: &str) -> ValidationResult {
    match field {
        FormField::Pan => validate_pan(value),
        FormField::Phone => validate_phone(value),
        FormField::Email => validate_email(value),
        FormField::Name => validate_name(value),
        FormField::Income => validate_income(value),
        FormField::LoanAmount => validate_loan_amount(value),
    }
}

/// AAAAA9999A, case-insensitive.
pub fn validate_pan(pan: &str) -> ValidationResult {
    let clean = pan.to_uppercase();
    let clean = clean.trim();
    if clean.is_empty() {
        return ValidationResult::fail("PAN number is required");
    }
    if clean.chars().count() != 10 {
        return ValidationResult::fail("PAN must be exactly 10 characters");
    }
    if !PAN_RE.is_match(clean) {
        return ValidationResult::fail("Invalid PAN format. Use: AAAAA9999A");
    }
    ValidationResult::ok("Valid PAN number")
}

/// Ten-digit Indian mobile number; formatting characters are ignored.
pub fn validate_phone(phone: &str) -> ValidationResult {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return ValidationResult::fail("Phone number is required");
    }
    if digits.len() != 10 {
        return ValidationResult::fail("Phone number must be 10 digits");
    }
    if !MOBILE_RE.is_match(&digits) {
        return ValidationResult::fail("Invalid mobile number. Must start with 6-9");
    }
    ValidationResult::ok("Valid phone number")
}

pub fn validate_email(email: &str) -> ValidationResult {
    let clean = email.trim().to_lowercase();
    if clean.is_empty() {
        return ValidationResult::fail("Email address is required");
    }
    if !EMAIL_RE.is_match(&clean) {
        return ValidationResult::fail("Please enter a valid email address");
    }
    ValidationResult::ok("Valid email address")
}

pub fn validate_name(name: &str) -> ValidationResult {
    let clean = name.trim();
    if clean.is_empty() {
        return ValidationResult::fail("Full name is required");
    }
    if clean.chars().count() < 2 {
        return ValidationResult::fail("Name must be at least 2 characters");
    }
    if !NAME_RE.is_match(clean) {
        return ValidationResult::fail("Name can only contain letters and spaces");
    }
    ValidationResult::ok("Valid name")
}

/// Monthly income between ₹10,000 and ₹1 crore. The leading number of the
/// value is read, so "50000 per month" passes.
pub fn validate_income(income: &str) -> ValidationResult {
    if income.is_empty() {
        return ValidationResult::fail("Monthly income is required");
    }
    let reason = match parse_leading_decimal(income) {
        Some(value) => income_range_error(value),
        None => Some("Please enter a valid income amount"),
    };
    reason.map_or_else(
        || ValidationResult::ok("Valid income amount"),
        ValidationResult::fail,
    )
}

/// Loan amount between ₹50,000 and ₹10 crore.
pub fn validate_loan_amount(amount: &str) -> ValidationResult {
    if amount.is_empty() {
        return ValidationResult::fail("Loan amount is required");
    }
    let reason = match parse_leading_decimal(amount) {
        Some(value) => loan_amount_range_error(value),
        None => Some("Please enter a valid loan amount"),
    };
    reason.map_or_else(
        || ValidationResult::ok("Valid loan amount"),
        ValidationResult::fail,
    )
}

/// Strip markup brackets, `javascript:` and inline event handlers.
pub fn sanitize_input(input: &str) -> String {
    let no_brackets: String = input.chars().filter(|c| !matches!(c, '<' | '>')).collect();
    let no_protocol = JS_PROTOCOL_RE.replace_all(&no_brackets, "");
    let no_handlers = EVENT_HANDLER_RE.replace_all(&no_protocol, "");
    no_handlers.trim().to_string()
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Contact-form phone check: optional +91, 91 or 0 prefix, spaces ignored.
pub fn is_valid_contact_phone(phone: &str) -> bool {
    let compact: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    CONTACT_PHONE_RE.is_match(&compact)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(r: ValidationResult) -> String {
        r.message
    }

    #[test]
    fn test_pan() {
        assert!(validate_pan(" abcde1234f ").is_valid);
        assert_eq!(message(validate_pan("")), "PAN number is required");
        assert_eq!(
            message(validate_pan("ABCDE1234")),
            "PAN must be exactly 10 characters"
        );
        assert_eq!(
            message(validate_pan("ABCD12345F")),
            "Invalid PAN format. Use: AAAAA9999A"
        );
    }

    #[test]
    fn test_phone() {
        assert!(validate_phone("98765 43210").is_valid);
        assert_eq!(message(validate_phone("abc")), "Phone number is required");
        assert_eq!(
            message(validate_phone("+91 98765 43210")),
            "Phone number must be 10 digits"
        );
        assert_eq!(
            message(validate_phone("5876543210")),
            "Invalid mobile number. Must start with 6-9"
        );
    }

    #[test]
    fn test_email() {
        assert!(validate_email(" Someone@Example.COM ").is_valid);
        assert_eq!(message(validate_email("  ")), "Email address is required");
        assert_eq!(
            message(validate_email("someone@example")),
            "Please enter a valid email address"
        );
    }

    #[test]
    fn test_name() {
        assert!(validate_name("Anita Rao").is_valid);
        assert_eq!(message(validate_name("A")), "Name must be at least 2 characters");
        assert_eq!(
            message(validate_name("R2-D2")),
            "Name can only contain letters and spaces"
        );
        assert_eq!(
            message(validate_name(&"a".repeat(51))),
            "Name can only contain letters and spaces"
        );
    }

    #[test]
    fn test_income() {
        assert_eq!(message(validate_income("")), "Monthly income is required");
        assert_eq!(
            message(validate_income("lots")),
            "Please enter a valid income amount"
        );
        assert_eq!(
            message(validate_income("-5")),
            "Please enter a valid income amount"
        );
        assert_eq!(
            message(validate_income("9999")),
            "Minimum income should be ₹10,000"
        );
        assert_eq!(
            message(validate_income("20000000")),
            "Maximum income limit is ₹1 crore"
        );
        assert!(validate_income("50000 per month").is_valid);
    }

    #[test]
    fn test_loan_amount() {
        assert_eq!(message(validate_loan_amount("")), "Loan amount is required");
        assert_eq!(
            message(validate_loan_amount("49999")),
            "Minimum loan amount is ₹50,000"
        );
        assert_eq!(
            message(validate_loan_amount("100000001")),
            "Maximum loan amount is ₹10 crores"
        );
        assert_eq!(message(validate_loan_amount("500000")), "Valid loan amount");
    }

    #[test]
    fn test_scientific_and_oversized_amounts() {
        assert!(validate_income("1e5").is_valid);
        assert!(validate_loan_amount("2.5e6").is_valid);
        assert_eq!(
            message(validate_income(&"9".repeat(40))),
            "Maximum income limit is ₹1 crore"
        );
        assert_eq!(
            message(validate_loan_amount("1e40")),
            "Maximum loan amount is ₹10 crores"
        );
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(
            sanitize_input("  <script>JavaScript:alert(1)</script> "),
            "scriptalert(1)/script"
        );
        assert_eq!(sanitize_input("img onerror=x"), "img x");
    }

    #[test]
    fn test_contact_phone_prefixes() {
        assert!(is_valid_contact_phone("+91 98765 43210"));
        assert!(is_valid_contact_phone("09876543210"));
        assert!(is_valid_contact_phone("919876543210"));
        assert!(!is_valid_contact_phone("12345"));
    }
}
