//! The complete report handed to the rendering layer.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::calculation_result::{
    ApplicationChecklistItem, ExcludedSubsidy, PerEmployeeCalculation, SubsidyCalculation,
};
use super::program::RegionType;
use super::warning::CrossValidationResult;

/// How the business region was decided.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionClassification {
    /// The region used for every region-sensitive program.
    pub region: RegionType,
    /// The address keyword that decided it, if any.
    pub matched_keyword: Option<String>,
    /// True when the region fell back to the capital-area default.
    pub defaulted: bool,
}

/// Identity-match statistics between wage ledger and contracts.
///
/// `matched_count + unmatched_count == total` and `match_rate` lies in
/// `0..=100`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchStatistics {
    /// Wage ledger rows considered.
    pub total: u32,
    /// Rows matched to a contract.
    pub matched_count: u32,
    /// Rows with no contract.
    pub unmatched_count: u32,
    /// `round(matched / total * 100)`, 0 for an empty ledger.
    pub match_rate: u32,
    /// Matched rows whose age is in the youth band.
    pub youth_count: u32,
    /// Matched rows whose age is in the senior band.
    pub senior_count: u32,
}

/// Headcounts over the canonical employee list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSummary {
    /// Canonical employees.
    pub total: u32,
    /// Currently employed.
    pub current: u32,
    /// Youth-band employees.
    pub youth: u32,
    /// Senior-band employees.
    pub senior: u32,
    /// Employees whose age could not be determined.
    pub unknown_age: u32,
}

/// The full output of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubsidyReport {
    /// Evaluation date supplied by the clock.
    pub generated_on: NaiveDate,
    /// Crate version that produced the report.
    pub engine_version: String,
    /// Region decision.
    pub region: RegionClassification,
    /// Headcounts.
    pub employee_summary: EmployeeSummary,
    /// Wage-ledger to contract match statistics.
    pub match_statistics: MatchStatistics,
    /// One entry per requested program.
    pub calculations: Vec<SubsidyCalculation>,
    /// Claimable programs that survived duplicate exclusion.
    pub eligible_calculations: Vec<SubsidyCalculation>,
    /// Programs removed by duplicate exclusion.
    pub excluded: Vec<ExcludedSubsidy>,
    /// Sum of `total_amount` over `eligible_calculations`.
    pub total_eligible_amount: Decimal,
    /// One entry per canonical employee.
    pub employees: Vec<PerEmployeeCalculation>,
    /// Filing guidance for surviving programs.
    pub checklist: Vec<ApplicationChecklistItem>,
    /// Advisory cross-document warnings.
    pub validation: CrossValidationResult,
}
