//! WhatsApp and phone links, and the share messages sent through them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

use crate::amortization::{LoanQuote, LoanQuoteInput};
use crate::eligibility::budget::BudgetSnapshot;
use crate::eligibility::{AffordabilityProfile, EligibilityVerdict, LeadRecord, LeadScore};
use crate::types::{round_currency, Money};

pub const DEFAULT_WHATSAPP_NUMBER: &str = "919497544143";
pub const DEFAULT_TEL_NUMBER: &str = "+919497544143";
pub const DEFAULT_BUSINESS_NAME: &str = "FiNNGUARD Capital";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    /// Country code and number, no plus.
    pub whatsapp_number: String,
    pub tel_number: String,
    pub business_name: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        ContactConfig {
            whatsapp_number: DEFAULT_WHATSAPP_NUMBER.into(),
            tel_number: DEFAULT_TEL_NUMBER.into(),
            business_name: DEFAULT_BUSINESS_NAME.into(),
        }
    }
}

impl ContactConfig {
    pub fn whatsapp_link(&self, message: &str) -> String {
        format!(
            "https://wa.me/{}?text={}",
            self.whatsapp_number,
            urlencoding::encode(message)
        )
    }

    pub fn tel_href(&self) -> String {
        format!("tel:{}", self.tel_number)
    }

    pub fn emi_message(&self, input: &LoanQuoteInput, quote: &LoanQuote) -> String {
        format!(
            "💰 EMI Calculator Result - {brand}\n\n\
             Loan Amount: {amount}\n\
             Interest Rate: {rate}%\n\
             Tenure: {tenure} months\n\n\
             Monthly EMI: {emi}\n\
             Total Amount: {total}\n\
             Total Interest: {interest}\n\n\
             Get the best loan rates with {brand}!",
            brand = self.business_name,
            amount = format_inr(input.principal),
            rate = input.annual_rate_percent.normalize(),
            tenure = input.tenure_months,
            emi = format_inr(quote.monthly_installment),
            total = format_inr(quote.total_payable),
            interest = format_inr(quote.total_interest),
        )
    }

    pub fn eligibility_message(
        &self,
        profile: &AffordabilityProfile,
        verdict: &EligibilityVerdict,
    ) -> String {
        let requested = profile
            .requested_amount
            .map_or_else(|| "Not specified".to_string(), format_inr);
        format!(
            "Hi {brand}! I've checked my loan eligibility:\n\n\
             Loan Type: {loan_type}\n\
             Monthly Income: {income}\n\
             Requested Amount: {requested}\n\
             Eligibility: {status}\n\
             Max Eligible Amount: {max}\n\
             Estimated EMI: {emi}\n\
             Interest Rate: {rate}%\n\n\
             Please help me proceed with the loan application.",
            brand = self.business_name,
            loan_type = profile.loan_type,
            income = format_inr(profile.monthly_income),
            status = verdict.status,
            max = format_inr(verdict.max_loan_amount),
            emi = format_inr(verdict.installment),
            rate = verdict.interest_rate_percent.normalize(),
        )
    }

    pub fn budget_message(&self, monthly_income: Money, snapshot: &BudgetSnapshot) -> String {
        format!(
            "🏠 Loan Affordability Assessment - {brand}\n\n\
             Monthly Income: {income}\n\
             Max Eligible EMI: {emi}\n\
             Max Loan Amount: {max}\n\
             Affordability: {rating}\n\n\
             {recommendation}\n\n\
             Contact us for personalized loan solutions!",
            brand = self.business_name,
            income = format_inr(monthly_income),
            emi = format_inr(snapshot.max_installment),
            max = format_inr(snapshot.max_loan_amount),
            rating = snapshot.rating.label(),
            recommendation = snapshot.recommendation,
        )
    }

    /// Hand-off message for a scored lead.
    pub fn lead_message(&self, lead: &LeadRecord, score: &LeadScore) -> String {
        let p = &lead.personal_info;
        let l = &lead.loan_details;
        let f = &lead.financial_info;
        let c = &lead.preferences;

        let mut msg = String::new();
        // Writing to a String cannot fail.
        let _ = writeln!(msg, "🎯 *QUALIFIED LEAD - {}*", self.business_name);
        let _ = writeln!(
            msg,
            "Lead Score: {}/100 ({} Lead)\n",
            score.score, score.category
        );
        let _ = writeln!(msg, "👤 *Personal Information:*");
        for (label, value) in [
            ("Name", &p.name),
            ("Email", &p.email),
            ("Phone", &p.phone),
            ("Age", &p.age),
            ("City", &p.city),
        ] {
            let _ = writeln!(msg, "• {label}: {value}");
        }
        let _ = writeln!(msg, "\n💰 *Loan Requirements:*");
        let _ = writeln!(msg, "• Type: {}", l.loan_type);
        let _ = writeln!(msg, "• Amount: ₹{}", l.amount);
        let _ = writeln!(msg, "• Purpose: {}", l.purpose);
        let _ = writeln!(msg, "• Tenure: {} years", l.tenure);
        let _ = writeln!(msg, "\n💼 *Financial Profile:*");
        let _ = writeln!(msg, "• Monthly Income: ₹{}", f.income);
        let _ = writeln!(msg, "• Employment: {}", f.employment);
        let _ = writeln!(msg, "• Credit Score: {}", f.credit_score);
        let _ = writeln!(msg, "• Existing Loans: {}", f.existing_loans);
        let _ = writeln!(msg, "\n📞 *Contact Preferences:*");
        let _ = writeln!(msg, "• Preferred Method: {}", c.contact_method);
        let _ = writeln!(msg, "• Best Call Time: {}", c.callback_time);
        let _ = writeln!(msg, "• Urgency: {}", c.urgency);
        let _ = writeln!(msg, "\n⭐ *Lead Scoring Factors:*");
        for factor in &score.factors {
            let _ = writeln!(msg, "• {factor}");
        }
        let _ = write!(
            msg,
            "\nPriority: {} Lead - Handle accordingly!",
            score.category
        );
        msg
    }
}

/// Whole rupees with Indian digit grouping: 1234567 → "₹12,34,567".
pub fn format_inr(amount: Money) -> String {
    let rounded = round_currency(amount);
    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    let digits = rounded.abs().trunc().normalize().to_string();
    format!("{sign}₹{}", group_indian(&digits))
}

/// Last three digits, then pairs.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (mut head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    while head.len() > 2 {
        let (rest, pair) = head.split_at(head.len() - 2);
        groups.push(pair);
        head = rest;
    }
    if !head.is_empty() {
        groups.push(head);
    }
    groups.reverse();
    format!("{},{tail}", groups.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::compute_installment;
    use crate::eligibility::lead_scoring::score_lead;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_inr() {
        assert_eq!(format_inr(dec!(999)), "₹999");
        assert_eq!(format_inr(dec!(1000)), "₹1,000");
        assert_eq!(format_inr(dec!(100000)), "₹1,00,000");
        assert_eq!(format_inr(dec!(1234567)), "₹12,34,567");
        assert_eq!(format_inr(dec!(123456789)), "₹12,34,56,789");
        assert_eq!(format_inr(dec!(8678.5)), "₹8,679");
        assert_eq!(format_inr(dec!(-2500)), "-₹2,500");
    }

    #[test]
    fn test_links() {
        let c = ContactConfig::default();
        assert_eq!(c.tel_href(), "tel:+919497544143");
        assert_eq!(
            c.whatsapp_link("Hi there! 50%"),
            "https://wa.me/919497544143?text=Hi%20there%21%2050%25"
        );
    }

    #[test]
    fn test_custom_numbers() {
        let c = ContactConfig {
            whatsapp_number: "911234567890".into(),
            ..ContactConfig::default()
        };
        assert!(c.whatsapp_link("x").starts_with("https://wa.me/911234567890?text="));
        assert_eq!(c.business_name, "FiNNGUARD Capital");
    }

    #[test]
    fn test_emi_message() {
        let input = LoanQuoteInput {
            principal: dec!(1_000_000),
            annual_rate_percent: dec!(8.50),
            tenure_months: 240,
        };
        let quote = compute_installment(input.principal, input.annual_rate_percent, 240).unwrap();
        let msg = ContactConfig::default().emi_message(&input, &quote);
        assert!(msg.contains("Loan Amount: ₹10,00,000"));
        assert!(msg.contains("Interest Rate: 8.5%"));
        assert!(msg.contains("Monthly EMI: ₹8,678"));
        assert!(msg.ends_with("Get the best loan rates with FiNNGUARD Capital!"));
    }

    #[test]
    fn test_lead_message_lists_factors() {
        let mut lead = LeadRecord::default();
        lead.personal_info.name = "Anita".into();
        let score = score_lead(&lead);
        let msg = ContactConfig::default().lead_message(&lead, &score);
        assert!(msg.starts_with("🎯 *QUALIFIED LEAD - FiNNGUARD Capital*"));
        assert!(msg.contains("• Name: Anita"));
        assert!(msg.contains("• Moderate Urgency"));
        assert!(msg.ends_with("Priority: Cold Lead - Handle accordingly!"));
    }
}
