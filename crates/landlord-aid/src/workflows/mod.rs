pub mod dashboard;
pub mod eligibility;
pub mod intake;
pub mod records;
pub mod submission;
