pub mod affordability;
pub mod budget;
pub mod credit;
pub mod lead_scoring;
pub mod policy;
pub mod quick_check;

pub use affordability::{
    assess_affordability, eligibility_status, AffordabilityProfile, EligibilityStatus,
    EligibilityVerdict,
};
pub use lead_scoring::{score_lead, LeadCategory, LeadRecord, LeadScore};
pub use policy::LendingPolicy;
