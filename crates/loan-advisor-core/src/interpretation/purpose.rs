use serde::{Deserialize, Serialize};

use crate::types::LoanType;

/// Loan purposes offered by the chat wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanPurpose {
    HomePurchase,
    HomeConstruction,
    CarPurchase,
    PersonalUse,
    BusinessExpansion,
    Education,
    MedicalEmergency,
}

impl LoanPurpose {
    /// Options in the order the wizard lists them.
    pub const ALL: [LoanPurpose; 7] = [
        LoanPurpose::HomePurchase,
        LoanPurpose::HomeConstruction,
        LoanPurpose::CarPurchase,
        LoanPurpose::PersonalUse,
        LoanPurpose::BusinessExpansion,
        LoanPurpose::Education,
        LoanPurpose::MedicalEmergency,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            LoanPurpose::HomePurchase => "Home Purchase",
            LoanPurpose::HomeConstruction => "Home Construction",
            LoanPurpose::CarPurchase => "Car Purchase",
            LoanPurpose::PersonalUse => "Personal Use",
            LoanPurpose::BusinessExpansion => "Business Expansion",
            LoanPurpose::Education => "Education",
            LoanPurpose::MedicalEmergency => "Medical Emergency",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.label().eq_ignore_ascii_case(label))
    }

    /// Product family the purpose is priced as.
    pub fn loan_type(&self) -> LoanType {
        match self {
            LoanPurpose::HomePurchase | LoanPurpose::HomeConstruction => LoanType::Home,
            LoanPurpose::CarPurchase => LoanType::Car,
            LoanPurpose::PersonalUse | LoanPurpose::Education | LoanPurpose::MedicalEmergency => {
                LoanType::Personal
            }
            LoanPurpose::BusinessExpansion => LoanType::Business,
        }
    }
}

impl std::fmt::Display for LoanPurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Question a follow-up can rephrase once the purpose is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FollowUpTopic {
    LoanAmount,
    MonthlyIncome,
}

/// Purpose-specific wording for a question, where there is one.
pub fn follow_up_question(purpose: LoanPurpose, topic: FollowUpTopic) -> Option<&'static str> {
    use FollowUpTopic::*;
    use LoanPurpose::*;

    match (purpose, topic) {
        (HomePurchase, LoanAmount) => {
            Some("What is the approximate value of the property you wish to purchase?")
        }
        (HomePurchase, MonthlyIncome) => Some(
            "What is your monthly household income including spouse income if applicable?",
        ),
        (CarPurchase, LoanAmount) => Some("What is the on-road price of the car you want to buy?"),
        (CarPurchase, MonthlyIncome) => Some("What is your monthly take-home salary?"),
        (BusinessExpansion, LoanAmount) => {
            Some("How much funding do you need for your business expansion?")
        }
        (BusinessExpansion, MonthlyIncome) => {
            Some("What is your average monthly business income?")
        }
        _ => None,
    }
}
