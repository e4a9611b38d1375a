pub mod eligibility;
pub mod profiles;
pub mod stats;
