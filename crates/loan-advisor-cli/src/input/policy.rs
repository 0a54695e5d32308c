use clap::ValueEnum;

use loan_advisor_core::eligibility::LendingPolicy;

use super::file;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PolicyPreset {
    /// 70% / 65% of gross income, self-employed haircut, 650 score floor
    Standard,
    /// 40% of income left after expenses and obligations
    CalculatorSuite,
}

/// Policy from `--policy` (or `FINCALC_POLICY`), else the named preset.
pub fn load_policy(
    path: Option<&str>,
    preset: PolicyPreset,
) -> Result<LendingPolicy, Box<dyn std::error::Error>> {
    let policy = match path {
        Some(path) => {
            tracing::debug!(path, "loading lending policy file");
            file::read_config(path)?
        }
        None => match preset {
            PolicyPreset::Standard => LendingPolicy::standard(),
            PolicyPreset::CalculatorSuite => LendingPolicy::calculator_suite(),
        },
    };
    policy.validate()?;
    Ok(policy)
}
