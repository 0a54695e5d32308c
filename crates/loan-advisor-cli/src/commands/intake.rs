use clap::Args;
use serde_json::Value;

use loan_advisor_core::eligibility::assess_affordability;
use loan_advisor_core::intake::{IntakeSession, IntakeStep};

use super::Context;
use crate::input;
use crate::input::policy::PolicyPreset;

/// Arguments for replaying a chat intake
#[derive(Args)]
pub struct IntakeArgs {
    /// Saved session JSON to resume from
    #[arg(long)]
    pub session: Option<String>,

    /// Answers in question order
    pub answers: Vec<String>,
}

/// Feed the answers through the question sequence. Stops at the first
/// rejected answer; once complete, the gathered profile is assessed.
pub fn run_intake(args: IntakeArgs, ctx: &Context) -> Result<Value, Box<dyn std::error::Error>> {
    let mut session = match args.session {
        Some(ref path) => input::file::read_json::<IntakeSession>(path)?,
        None => IntakeSession::new(),
    };

    let mut rejected = None;
    let mut step = session.current_step();
    for answer in &args.answers {
        match session.answer(answer) {
            Ok(next) => step = next,
            Err(e) => {
                rejected = Some(serde_json::json!({ "answer": answer, "message": e.to_string() }));
                break;
            }
        }
    }

    let assessment = match step {
        IntakeStep::Complete { .. } => {
            let profile = session.to_profile()?;
            let policy = ctx.policy(PolicyPreset::Standard)?;
            Some(assess_affordability(&profile, &policy)?)
        }
        IntakeStep::Ask(_) => None,
    };

    Ok(serde_json::json!({
        "result": {
            "step": step,
            "rejected": rejected,
            "session": session,
            "assessment": assessment,
        }
    }))
}
