//! Calculation result models.
//!
//! This module contains [`SubsidyCalculation`] (one per program), the
//! per-employee view [`PerEmployeeCalculation`], and the auditable
//! [`CalculationBreakdown`] both of them carry.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::employee::CanonicalEmployee;
use super::program::{EligibilityStatus, Program, RegionType};

/// A single step in a calculation breakdown.
///
/// Each step records its inputs and numeric result so a reviewer can follow
/// the formula from rate lookup to final total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownStep {
    /// The sequential step number, starting at 1.
    pub step_number: u32,
    /// What this step does.
    pub description: String,
    /// The formula applied, when the step is arithmetic.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
    /// Named inputs used by this step.
    pub inputs: serde_json::Value,
    /// The numeric result of this step.
    pub result: Decimal,
}

/// A disbursement milestone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMilestone {
    /// When the payment is made (e.g. "after 6 months retained").
    pub timing: String,
    /// Amount paid at this milestone.
    pub amount: Decimal,
}

/// The ordered calculation trail for one program amount.
///
/// The last step's result equals `total_amount`, which equals
/// `base_amount + incentive_amount`.
///
/// # Example
///
/// ```
/// use subsidy_engine::models::{BreakdownStep, CalculationBreakdown};
/// use rust_decimal::Decimal;
///
/// let breakdown = CalculationBreakdown {
///     steps: vec![BreakdownStep {
///         step_number: 1,
///         description: "Final total".to_string(),
///         formula: None,
///         inputs: serde_json::json!({}),
///         result: Decimal::from(100),
///     }],
///     base_amount: Decimal::from(80),
///     incentive_amount: Decimal::from(20),
///     total_amount: Decimal::from(100),
///     payment_schedule: vec![],
/// };
/// assert!(breakdown.is_consistent());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationBreakdown {
    /// Steps in evaluation order.
    pub steps: Vec<BreakdownStep>,
    /// Amount before incentives.
    pub base_amount: Decimal,
    /// Incentive added on top of the base.
    pub incentive_amount: Decimal,
    /// Base plus incentive.
    pub total_amount: Decimal,
    /// When the money is paid out.
    pub payment_schedule: Vec<PaymentMilestone>,
}

impl CalculationBreakdown {
    /// Result of the final step, or zero for an empty breakdown.
    pub fn final_result(&self) -> Decimal {
        self.steps.last().map(|s| s.result).unwrap_or(Decimal::ZERO)
    }

    /// Checks the step, total and component invariants.
    pub fn is_consistent(&self) -> bool {
        self.final_result() == self.total_amount
            && self.total_amount == self.base_amount + self.incentive_amount
    }
}

/// Aggregate result for one program across all qualifying employees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubsidyCalculation {
    /// Program evaluated.
    pub program: Program,
    /// Display name of the program.
    pub program_name: String,
    /// Eligibility outcome.
    pub status: EligibilityStatus,
    /// Number of employees (or cases) the amount was computed for.
    pub qualifying_count: u32,
    /// Combined monthly amount.
    pub monthly_amount: Decimal,
    /// Support duration in months.
    pub total_months: u32,
    /// Combined total over the whole support period.
    pub total_amount: Decimal,
    /// Requirement codes satisfied.
    pub requirements_met: Vec<String>,
    /// Requirement codes failed.
    pub requirements_not_met: Vec<String>,
    /// Requirement codes that cannot be verified from documents.
    pub requirements_unverified: Vec<String>,
    /// Explanations for the outcome.
    pub notes: Vec<String>,
    /// Region used, for region-sensitive programs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<RegionType>,
    /// Combined incentive amount, for programs that pay one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incentive_amount: Option<Decimal>,
    /// Combined per-quarter amount, for quarterly programs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quarterly_amount: Option<Decimal>,
    /// Calculation trail; present whenever the status is claimable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<CalculationBreakdown>,
}

/// A program one employee can be claimed for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeProgramResult {
    /// Program.
    pub program: Program,
    /// Display name.
    pub program_name: String,
    /// ELIGIBLE or NEEDS_REVIEW.
    pub status: EligibilityStatus,
    /// Amount attributable to this employee.
    pub amount: Decimal,
    /// Calculation trail for this employee.
    pub breakdown: CalculationBreakdown,
}

/// A program one employee cannot be claimed for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IneligibleProgram {
    /// Program.
    pub program: Program,
    /// Display name.
    pub program_name: String,
    /// Human-readable reasons.
    pub reasons: Vec<String>,
    /// Requirement codes not met.
    pub missing_requirements: Vec<String>,
}

/// A runtime record of an exclusion rule firing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcludedSubsidy {
    /// The program removed.
    pub program: Program,
    /// Why it was removed.
    pub reason: String,
    /// The program that took priority.
    pub excluded_by: Program,
}

/// Everything the engine concluded about one employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerEmployeeCalculation {
    /// The reconciled employee.
    #[serde(flatten)]
    pub employee: CanonicalEmployee,
    /// Programs this employee can be claimed for, after exclusions.
    pub eligible_programs: Vec<EmployeeProgramResult>,
    /// Programs this employee does not qualify for.
    pub ineligible_programs: Vec<IneligibleProgram>,
    /// Programs dropped by duplicate-exclusion rules.
    pub excluded_programs: Vec<ExcludedSubsidy>,
    /// Sum of eligible program amounts.
    pub estimated_subsidy: Decimal,
}

/// Filing guidance for a program that survived exclusion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationChecklistItem {
    /// Program.
    pub program: Program,
    /// Display name.
    pub program_name: String,
    /// ELIGIBLE or NEEDS_REVIEW.
    pub status: EligibilityStatus,
    /// Documents to prepare.
    pub required_documents: Vec<String>,
    /// Where to apply.
    pub application_venue: String,
    /// When to apply.
    pub application_window: String,
    /// Who to call.
    pub contact: String,
    /// Additional remarks.
    pub notes: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(n: u32, result: i64) -> BreakdownStep {
        BreakdownStep {
            step_number: n,
            description: format!("step {}", n),
            formula: None,
            inputs: serde_json::json!({}),
            result: Decimal::from(result),
        }
    }

    #[test]
    fn test_breakdown_consistency_detects_mismatch() {
        let breakdown = CalculationBreakdown {
            steps: vec![step(1, 600_000), step(2, 7_200_000)],
            base_amount: Decimal::from(7_200_000),
            incentive_amount: Decimal::from(4_800_000),
            total_amount: Decimal::from(12_000_000),
            payment_schedule: vec![],
        };
        assert!(!breakdown.is_consistent());
    }

    #[test]
    fn test_empty_breakdown_final_result_is_zero() {
        let breakdown = CalculationBreakdown {
            steps: vec![],
            base_amount: Decimal::ZERO,
            incentive_amount: Decimal::ZERO,
            total_amount: Decimal::ZERO,
            payment_schedule: vec![],
        };
        assert_eq!(breakdown.final_result(), Decimal::ZERO);
        assert!(breakdown.is_consistent());
    }

    #[test]
    fn test_subsidy_calculation_skips_absent_optionals() {
        let calc = SubsidyCalculation {
            program: Program::EmploymentRetention,
            program_name: "고용유지지원금".to_string(),
            status: EligibilityStatus::NotEligible,
            qualifying_count: 0,
            monthly_amount: Decimal::ZERO,
            total_months: 0,
            total_amount: Decimal::ZERO,
            requirements_met: vec![],
            requirements_not_met: vec!["active_employees".to_string()],
            requirements_unverified: vec![],
            notes: vec![],
            region: None,
            incentive_amount: None,
            quarterly_amount: None,
            breakdown: None,
        };
        let json = serde_json::to_string(&calc).unwrap();
        assert!(!json.contains("breakdown"));
        assert!(!json.contains("quarterly_amount"));
        assert!(json.contains("\"status\":\"NOT_ELIGIBLE\""));
        assert!(json.contains("\"total_amount\":\"0\""));
    }
}
