mod commands;
mod input;
mod output;
mod telemetry;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use loan_advisor_core::contact::ContactConfig;

use commands::amortization::{
    BusinessRoiArgs, CompareArgs, EmiArgs, MaxPrincipalArgs, SavingsVsLoanArgs,
};
use commands::eligibility::{
    BudgetArgs, DetailedAssessmentArgs, EligibilityArgs, QuickCheckArgs, ScoreLeadArgs,
};
use commands::intake::IntakeArgs;
use commands::interpretation::{
    DetectLoanTypeArgs, MatchEmploymentArgs, ParseAmountArgs, ValidateArgs,
};
use commands::share::ShareArgs;
use commands::Context;
use input::policy::PolicyPreset;

/// Loan EMI, eligibility and lead-scoring calculations
#[derive(Parser)]
#[command(
    name = "fincalc",
    version,
    about = "Loan EMI, eligibility and lead-scoring calculations",
    long_about = "A CLI for retail loan enquiries with decimal precision. Supports EMI \
                  quotes, FOIR-based eligibility, quick checks, budget snapshots, lender \
                  comparison, lead scoring, chat-answer interpretation and share links."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Lending policy file (YAML or JSON)
    #[arg(long, env = "FINCALC_POLICY", global = true)]
    policy: Option<String>,

    /// Built-in lending policy, used when no policy file is given
    #[arg(long, value_enum, global = true)]
    policy_preset: Option<PolicyPreset>,

    /// WhatsApp number for share links (country code, no plus)
    #[arg(long, global = true)]
    whatsapp_number: Option<String>,

    /// Phone number for call links
    #[arg(long, global = true)]
    tel_number: Option<String>,

    /// Log engine decisions to stderr
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Monthly installment, total payable and total interest
    Emi(EmiArgs),
    /// Largest principal for a given installment
    MaxPrincipal(MaxPrincipalArgs),
    /// FOIR-based affordability and eligibility verdict
    Eligibility(EligibilityArgs),
    /// Quick eligibility check priced from the credit band
    QuickCheck(QuickCheckArgs),
    /// Detailed eligibility assessment with lender panel
    DetailedAssessment(DetailedAssessmentArgs),
    /// How much can be borrowed within the monthly budget
    Budget(BudgetArgs),
    /// Compare lender offers for one amount and tenure
    Compare(CompareArgs),
    /// Return on a business loan
    BusinessRoi(BusinessRoiArgs),
    /// Saving up versus borrowing now
    SavingsVsLoan(SavingsVsLoanArgs),
    /// Score a lead from the lead-capture form
    ScoreLead(ScoreLeadArgs),
    /// Read an amount typed with lakh/crore/k shorthand
    ParseAmount(ParseAmountArgs),
    /// Detect the loan purpose in free text
    DetectLoanType(DetectLoanTypeArgs),
    /// Normalise a free-text employment answer
    MatchEmployment(MatchEmploymentArgs),
    /// Validate a form field value
    Validate(ValidateArgs),
    /// Replay answers through the chat intake
    Intake(IntakeArgs),
    /// Build a WhatsApp share message and link
    Share(ShareArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = telemetry::init(cli.verbose) {
        eprintln!("{}: {}", "warning".yellow().bold(), e);
    }

    let defaults = ContactConfig::default();
    let ctx = Context {
        policy_path: cli.policy,
        policy_preset: cli.policy_preset,
        contact: ContactConfig {
            whatsapp_number: cli.whatsapp_number.unwrap_or(defaults.whatsapp_number),
            tel_number: cli.tel_number.unwrap_or(defaults.tel_number),
            business_name: defaults.business_name,
        },
    };

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Emi(args) => commands::amortization::run_emi(args),
        Commands::MaxPrincipal(args) => commands::amortization::run_max_principal(args),
        Commands::Eligibility(args) => commands::eligibility::run_eligibility(args, &ctx),
        Commands::QuickCheck(args) => commands::eligibility::run_quick_check(args),
        Commands::DetailedAssessment(args) => {
            commands::eligibility::run_detailed_assessment(args)
        }
        Commands::Budget(args) => commands::eligibility::run_budget(args, &ctx),
        Commands::Compare(args) => commands::amortization::run_compare(args),
        Commands::BusinessRoi(args) => commands::amortization::run_business_roi(args),
        Commands::SavingsVsLoan(args) => commands::amortization::run_savings_vs_loan(args),
        Commands::ScoreLead(args) => commands::eligibility::run_score_lead(args),
        Commands::ParseAmount(args) => commands::interpretation::run_parse_amount(args),
        Commands::DetectLoanType(args) => commands::interpretation::run_detect_loan_type(args),
        Commands::MatchEmployment(args) => commands::interpretation::run_match_employment(args),
        Commands::Validate(args) => commands::interpretation::run_validate(args),
        Commands::Intake(args) => commands::intake::run_intake(args, &ctx),
        Commands::Share(args) => commands::share::run_share(args, &ctx),
        Commands::Version => {
            println!("fincalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result.and_then(|value| output::render(&cli.output, &value)) {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
