pub mod amortization;
pub mod eligibility;
pub mod intake;
pub mod interpretation;
pub mod share;

use loan_advisor_core::contact::ContactConfig;
use loan_advisor_core::eligibility::LendingPolicy;

use crate::input::policy::{load_policy, PolicyPreset};

/// Settings shared by every command, from global flags and the environment.
pub struct Context {
    pub policy_path: Option<String>,
    pub policy_preset: Option<PolicyPreset>,
    pub contact: ContactConfig,
}

impl Context {
    /// The configured policy; `default` applies when neither a file nor a
    /// preset was given.
    pub fn policy(&self, default: PolicyPreset) -> Result<LendingPolicy, Box<dyn std::error::Error>> {
        load_policy(
            self.policy_path.as_deref(),
            self.policy_preset.unwrap_or(default),
        )
    }
}
