pub mod eligibility;
pub mod report;
pub mod submission;
