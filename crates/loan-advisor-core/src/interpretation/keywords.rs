//! Ordered keyword tables for free-text chat answers.
//!
//! Matching is substring containment on the lowercased, trimmed text. Rules
//! are scanned in table order and the first keyword hit wins, so a table's
//! order is part of its meaning (for instance "self employed" resolves to
//! Salaried through "employed").

use serde::{Deserialize, Serialize};

use super::purpose::LoanPurpose;
use crate::types::EmploymentType;

/// One row of a keyword table.
#[derive(Debug, Clone, Copy)]
pub struct KeywordRule<T: 'static> {
    pub value: T,
    pub keywords: &'static [&'static str],
}

/// First rule (and keyword within it) contained in `text`.
pub fn first_match<T: Copy>(text: &str, rules: &[KeywordRule<T>]) -> Option<(T, &'static str)> {
    let clean = text.trim().to_lowercase();
    rules.iter().find_map(|rule| {
        rule.keywords
            .iter()
            .find(|k| clean.contains(*k))
            .map(|k| (rule.value, *k))
    })
}

// ---------------------------------------------------------------------------
// Loan type detection
// ---------------------------------------------------------------------------

pub static LOAN_TYPE_RULES: &[KeywordRule<(LoanPurpose, f64)>] = &[
    KeywordRule {
        value: (LoanPurpose::HomePurchase, 0.9),
        keywords: &[
            "home",
            "house",
            "property",
            "flat",
            "apartment",
            "buy house",
            "home loan",
            "housing",
            "residential",
        ],
    },
    KeywordRule {
        value: (LoanPurpose::CarPurchase, 0.9),
        keywords: &[
            "car",
            "vehicle",
            "auto",
            "automobile",
            "bike",
            "motorcycle",
            "car loan",
            "vehicle loan",
        ],
    },
    KeywordRule {
        value: (LoanPurpose::PersonalUse, 0.8),
        keywords: &[
            "personal",
            "personal loan",
            "emergency",
            "medical",
            "wedding",
            "travel",
            "education",
        ],
    },
    KeywordRule {
        value: (LoanPurpose::BusinessExpansion, 0.9),
        keywords: &[
            "business",
            "company",
            "startup",
            "expansion",
            "working capital",
            "business loan",
            "commercial",
        ],
    },
    KeywordRule {
        value: (LoanPurpose::HomeConstruction, 0.9),
        keywords: &[
            "construction",
            "build",
            "building",
            "construct house",
            "home construction",
            "plot",
        ],
    },
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTypeMatch {
    pub purpose: LoanPurpose,
    pub confidence: f64,
    pub matched_keyword: String,
}

pub fn detect_loan_type(text: &str) -> Option<LoanTypeMatch> {
    first_match(text, LOAN_TYPE_RULES).map(|((purpose, confidence), keyword)| LoanTypeMatch {
        purpose,
        confidence,
        matched_keyword: keyword.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Employment matching
// ---------------------------------------------------------------------------

pub static EMPLOYMENT_RULES: &[KeywordRule<EmploymentType>] = &[
    KeywordRule {
        value: EmploymentType::Salaried,
        keywords: &[
            "salaried",
            "salary",
            "employee",
            "job",
            "work for",
            "employed",
            "corporate",
            "company employee",
            "govt job",
            "government",
        ],
    },
    KeywordRule {
        value: EmploymentType::SelfEmployed,
        keywords: &[
            "self employed",
            "self-employed",
            "freelancer",
            "freelance",
            "consultant",
            "contractor",
            "independent",
            "own practice",
            "professional",
        ],
    },
    KeywordRule {
        value: EmploymentType::BusinessOwner,
        keywords: &[
            "business",
            "owner",
            "entrepreneur",
            "proprietor",
            "partner",
            "director",
            "ceo",
            "founder",
            "shop owner",
            "business man",
        ],
    },
];

pub fn classify_employment(text: &str) -> Option<EmploymentType> {
    first_match(text, EMPLOYMENT_RULES).map(|(employment, _)| employment)
}

/// Normalised employment label, or the answer unchanged when nothing matches.
pub fn match_employment_type(text: &str) -> &str {
    classify_employment(text).map_or(text, |employment| employment.label())
}
