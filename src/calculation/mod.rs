//! Eligibility and amount calculation for the subsidy programs.
//!
//! This module contains region classification, breakdown construction, one
//! rule per program, per-employee evaluation, duplicate exclusion, checklist
//! generation, and the [`SubsidyEngine`] that runs the whole pipeline.

mod breakdown;
mod checklist;
mod employment_promotion;
mod employment_retention;
mod engine;
mod exclusion;
mod parental_leave;
mod per_employee;
mod region;
mod regular_conversion;
mod rule;
mod senior_continued;
mod senior_support;
#[cfg(test)]
mod test_support;
mod youth_job_leap;

pub use breakdown::{BreakdownBuilder, split_payments, yearly_quarter_payments};
pub use checklist::build_checklist;
pub use employment_promotion::{EmploymentPromotionRule, calculate_employment_promotion};
pub use employment_retention::calculate_employment_retention;
pub use engine::SubsidyEngine;
pub use exclusion::{excluded_programs, resolve_exclusions};
pub use parental_leave::{
    ParentalLeaveAmount, ParentalLeaveResult, calculate_parental_leave, parental_leave_amount,
};
pub use per_employee::{calculate_per_employee, employee_rule};
pub use region::classify_region;
pub use regular_conversion::{RegularConversionRule, calculate_regular_conversion};
pub use rule::{
    Check, EmployeeOutcome, EmployeeRule, RateCard, RatePeriod, Requirement, RuleContext,
    assess_employee, current_employee, employment_insurance, evaluate_rule, senior_age, youth_age,
};
pub use senior_continued::{SeniorContinuedRule, calculate_senior_continued};
pub use senior_support::{SeniorSupportRule, calculate_senior_support};
pub use youth_job_leap::{YouthJobLeapRule, calculate_youth_job_leap};
