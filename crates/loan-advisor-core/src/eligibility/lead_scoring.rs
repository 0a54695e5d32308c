//! Lead qualification score for the lead-capture form.
//!
//! Additive weight table over raw form values. Numeric fields are read with
//! leading-integer semantics, so `"750-799"` scores as 750 and `"Below 600"`
//! as 0. The score is a pure function of the record.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{parse_leading_int, EmploymentType};

// ---------------------------------------------------------------------------
// Lead record (raw form values)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub age: String,
    pub city: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoanDetails {
    #[serde(rename = "type")]
    pub loan_type: String,
    pub amount: String,
    pub purpose: String,
    /// Years.
    pub tenure: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FinancialInfo {
    /// Monthly income.
    pub income: String,
    pub employment: String,
    pub credit_score: String,
    pub existing_loans: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Preferences {
    pub contact_method: String,
    pub callback_time: String,
    pub urgency: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences {
            contact_method: "whatsapp".into(),
            callback_time: String::new(),
            urgency: "medium".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LeadRecord {
    pub personal_info: PersonalInfo,
    pub loan_details: LoanDetails,
    pub financial_info: FinancialInfo,
    pub preferences: Preferences,
}

impl LeadRecord {
    fn fields(&self) -> [&str; 16] {
        let p = &self.personal_info;
        let l = &self.loan_details;
        let f = &self.financial_info;
        let c = &self.preferences;
        [
            p.name.as_str(),
            p.email.as_str(),
            p.phone.as_str(),
            p.age.as_str(),
            p.city.as_str(),
            l.loan_type.as_str(),
            l.amount.as_str(),
            l.purpose.as_str(),
            l.tenure.as_str(),
            f.income.as_str(),
            f.employment.as_str(),
            f.credit_score.as_str(),
            f.existing_loans.as_str(),
            c.contact_method.as_str(),
            c.callback_time.as_str(),
            c.urgency.as_str(),
        ]
    }

    /// Number of fields with non-blank values.
    pub fn filled_fields(&self) -> usize {
        self.fields().iter().filter(|v| !v.trim().is_empty()).count()
    }
}

// ---------------------------------------------------------------------------
// Score
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeadCategory {
    Hot,
    Warm,
    Cold,
}

impl LeadCategory {
    pub fn from_score(score: u32) -> Self {
        if score >= 70 {
            LeadCategory::Hot
        } else if score >= 40 {
            LeadCategory::Warm
        } else {
            LeadCategory::Cold
        }
    }
}

impl std::fmt::Display for LeadCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LeadCategory::Hot => "Hot",
            LeadCategory::Warm => "Warm",
            LeadCategory::Cold => "Cold",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadScore {
    pub score: u32,
    pub category: LeadCategory,
    /// Reasons for each awarded weight, in table order.
    pub factors: Vec<String>,
}

// (minimum, points, reason), best tier first
const INCOME_TIERS: [(i64, u32, &str); 3] = [
    (100_000, 25, "High Income"),
    (50_000, 15, "Good Income"),
    (25_000, 10, "Moderate Income"),
];
// (maximum loan / annual income, points, reason)
const RATIO_TIERS: [(Decimal, u32, &str); 2] = [
    (dec!(3), 20, "Good Loan-to-Income Ratio"),
    (dec!(5), 10, "Acceptable Ratio"),
];
const CREDIT_TIERS: [(i64, u32, &str); 3] = [
    (750, 20, "Excellent Credit"),
    (650, 15, "Good Credit"),
    (550, 10, "Fair Credit"),
];
const URGENCY_WEIGHTS: [(&str, u32, &str); 2] = [
    ("high", 10, "Urgent Requirement"),
    ("medium", 5, "Moderate Urgency"),
];
const COMPLETE_PROFILE_FIELDS: usize = 12;
const COMPLETE_PROFILE_POINTS: u32 = 10;

pub fn score_lead(lead: &LeadRecord) -> LeadScore {
    let mut score = 0;
    let mut factors = Vec::new();
    let mut award = |points: u32, reason: &str| {
        score += points;
        factors.push(reason.to_string());
    };

    let income = parse_leading_int(&lead.financial_info.income).unwrap_or(0);
    if let Some(&(_, pts, why)) = INCOME_TIERS.iter().find(|(min, ..)| income >= *min) {
        award(pts, why);
    }

    let amount = parse_leading_int(&lead.loan_details.amount).unwrap_or(0);
    let ratio = if income > 0 {
        Decimal::from(amount) / (Decimal::from(income) * dec!(12))
    } else {
        Decimal::ZERO
    };
    if let Some(&(_, pts, why)) = RATIO_TIERS.iter().find(|(max, ..)| ratio <= *max) {
        award(pts, why);
    }

    match EmploymentType::from_label(&lead.financial_info.employment) {
        Some(EmploymentType::Salaried) => award(15, "Stable Employment"),
        Some(EmploymentType::SelfEmployed) => award(10, "Self Employed"),
        _ => {}
    }

    let credit = parse_leading_int(&lead.financial_info.credit_score).unwrap_or(0);
    if let Some(&(_, pts, why)) = CREDIT_TIERS.iter().find(|(min, ..)| credit >= *min) {
        award(pts, why);
    }

    if let Some(&(_, pts, why)) = URGENCY_WEIGHTS
        .iter()
        .find(|(level, ..)| lead.preferences.urgency == *level)
    {
        award(pts, why);
    }

    if lead.filled_fields() >= COMPLETE_PROFILE_FIELDS {
        award(COMPLETE_PROFILE_POINTS, "Complete Profile");
    }

    LeadScore {
        score,
        category: LeadCategory::from_score(score),
        factors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn hot_lead() -> LeadRecord {
        LeadRecord {
            personal_info: PersonalInfo {
                name: "Anita Rao".into(),
                email: "anita@example.com".into(),
                phone: "9876543210".into(),
                age: "34".into(),
                city: "Kochi".into(),
            },
            loan_details: LoanDetails {
                loan_type: "Home Loan".into(),
                amount: "3000000".into(),
                purpose: "Flat purchase".into(),
                tenure: "20".into(),
            },
            financial_info: FinancialInfo {
                income: "120000".into(),
                employment: "Salaried".into(),
                credit_score: "750-799".into(),
                existing_loans: "None".into(),
            },
            preferences: Preferences {
                contact_method: "whatsapp".into(),
                callback_time: "Evening".into(),
                urgency: "high".into(),
            },
        }
    }

    #[test]
    fn test_full_marks() {
        let s = score_lead(&hot_lead());
        assert_eq!(s.score, 100);
        assert_eq!(s.category, LeadCategory::Hot);
        assert_eq!(
            s.factors,
            vec![
                "High Income",
                "Good Loan-to-Income Ratio",
                "Stable Employment",
                "Excellent Credit",
                "Urgent Requirement",
                "Complete Profile",
            ]
        );
    }

    #[test]
    fn test_empty_form_defaults() {
        // zero income reads as a zero ratio
        let s = score_lead(&LeadRecord::default());
        assert_eq!(s.score, 25);
        assert_eq!(s.category, LeadCategory::Cold);
        assert_eq!(s.factors, vec!["Good Loan-to-Income Ratio", "Moderate Urgency"]);
    }

    #[test]
    fn test_warm_self_employed() {
        let mut lead = LeadRecord::default();
        lead.financial_info.income = "60000".into();
        lead.loan_details.amount = "5000000".into();
        lead.financial_info.employment = "Self Employed".into();
        lead.financial_info.credit_score = "680".into();
        let s = score_lead(&lead);
        assert_eq!(s.score, 45);
        assert_eq!(s.category, LeadCategory::Warm);
    }

    #[test]
    fn test_below_600_band_earns_nothing() {
        let mut lead = hot_lead();
        lead.financial_info.credit_score = "Below 600".into();
        let s = score_lead(&lead);
        assert_eq!(s.score, 80);
        assert!(!s.factors.iter().any(|f| f.contains("Credit")));
    }

    #[test]
    fn test_blank_fields_do_not_count() {
        let mut lead = hot_lead();
        lead.personal_info.age = "   ".into();
        assert_eq!(lead.filled_fields(), 15);
    }

    #[test]
    fn test_category_boundaries() {
        assert_eq!(LeadCategory::from_score(70), LeadCategory::Hot);
        assert_eq!(LeadCategory::from_score(69), LeadCategory::Warm);
        assert_eq!(LeadCategory::from_score(40), LeadCategory::Warm);
        assert_eq!(LeadCategory::from_score(39), LeadCategory::Cold);
    }

    #[test]
    fn test_deserialize_camel_case_form() {
        let lead: LeadRecord = serde_json::from_str(
            r#"{"financialInfo":{"income":"100000","creditScore":"800+"},"loanDetails":{"type":"Car Loan"}}"#,
        )
        .unwrap();
        assert_eq!(lead.financial_info.credit_score, "800+");
        assert_eq!(lead.loan_details.loan_type, "Car Loan");
        assert_eq!(lead.preferences.urgency, "medium");
    }
}
