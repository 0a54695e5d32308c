use clap::{Args, ValueEnum};
use serde_json::Value;

use loan_advisor_core::amortization::{compute_installment, LoanQuoteInput};
use loan_advisor_core::eligibility::budget::{budget_snapshot, BudgetInput};
use loan_advisor_core::eligibility::{
    assess_affordability, score_lead, AffordabilityProfile, LeadRecord,
};

use super::Context;
use crate::input;
use crate::input::policy::PolicyPreset;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ShareKind {
    /// LoanQuoteInput JSON
    Emi,
    /// AffordabilityProfile JSON
    Eligibility,
    /// BudgetInput JSON
    Budget,
    /// Lead record JSON
    Lead,
}

/// Arguments for building a WhatsApp share message
#[derive(Args)]
pub struct ShareArgs {
    /// What to share
    #[arg(value_enum)]
    pub kind: ShareKind,

    /// Path to JSON input file (or pipe it on stdin)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_share(args: ShareArgs, ctx: &Context) -> Result<Value, Box<dyn std::error::Error>> {
    let path = args.input.as_deref();
    let missing = "share needs --input or JSON on stdin";
    let contact = &ctx.contact;

    let message = match args.kind {
        ShareKind::Emi => {
            let quote_input: LoanQuoteInput = input::read_input(path)?.ok_or(missing)?;
            let quote = compute_installment(
                quote_input.principal,
                quote_input.annual_rate_percent,
                quote_input.tenure_months,
            )?;
            contact.emi_message(&quote_input, &quote)
        }
        ShareKind::Eligibility => {
            let profile: AffordabilityProfile = input::read_input(path)?.ok_or(missing)?;
            let verdict = assess_affordability(&profile, &ctx.policy(PolicyPreset::Standard)?)?;
            contact.eligibility_message(&profile, &verdict.result)
        }
        ShareKind::Budget => {
            let budget: BudgetInput = input::read_input(path)?.ok_or(missing)?;
            let snapshot = budget_snapshot(&budget, &ctx.policy(PolicyPreset::CalculatorSuite)?)?;
            contact.budget_message(budget.monthly_income, &snapshot.result)
        }
        ShareKind::Lead => {
            let lead: LeadRecord = input::read_input(path)?.ok_or(missing)?;
            let score = score_lead(&lead);
            contact.lead_message(&lead, &score)
        }
    };

    Ok(serde_json::json!({
        "result": {
            "whatsapp_link": contact.whatsapp_link(&message),
            "tel_href": contact.tel_href(),
            "message": message,
        }
    }))
}
