//! Subsidy programs, eligibility statuses and per-run analysis options.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The government employment subsidy programs the engine knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Program {
    /// 청년일자리도약장려금.
    YouthJobLeap,
    /// 고용촉진장려금.
    EmploymentPromotion,
    /// 정규직전환지원금.
    RegularConversion,
    /// 고령자계속고용장려금.
    SeniorContinuedEmployment,
    /// 고령자고용지원금.
    SeniorEmploymentSupport,
    /// 출산육아기 고용안정장려금.
    ParentalEmploymentStability,
    /// 고용유지지원금.
    EmploymentRetention,
}

impl Program {
    /// Every program, in canonical report order.
    pub const ALL: [Program; 7] = [
        Program::YouthJobLeap,
        Program::EmploymentPromotion,
        Program::RegularConversion,
        Program::SeniorContinuedEmployment,
        Program::SeniorEmploymentSupport,
        Program::ParentalEmploymentStability,
        Program::EmploymentRetention,
    ];

    /// The snake_case identifier used in configuration files and JSON.
    pub fn code(self) -> &'static str {
        match self {
            Program::YouthJobLeap => "youth_job_leap",
            Program::EmploymentPromotion => "employment_promotion",
            Program::RegularConversion => "regular_conversion",
            Program::SeniorContinuedEmployment => "senior_continued_employment",
            Program::SeniorEmploymentSupport => "senior_employment_support",
            Program::ParentalEmploymentStability => "parental_employment_stability",
            Program::EmploymentRetention => "employment_retention",
        }
    }

    /// Whether the program is evaluated per canonical employee rather than
    /// once for the business.
    pub fn is_per_employee(self) -> bool {
        matches!(
            self,
            Program::YouthJobLeap
                | Program::EmploymentPromotion
                | Program::RegularConversion
                | Program::SeniorContinuedEmployment
                | Program::SeniorEmploymentSupport
        )
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Terminal outcome of evaluating one program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EligibilityStatus {
    /// Every gate is machine-verified and satisfied.
    Eligible,
    /// Satisfied as far as the documents show, but a human must confirm.
    NeedsReview,
    /// A gate is confirmed failed, or nobody qualifies.
    NotEligible,
}

impl EligibilityStatus {
    /// True for ELIGIBLE and NEEDS_REVIEW.
    pub fn is_claimable(self) -> bool {
        !matches!(self, EligibilityStatus::NotEligible)
    }
}

/// Capital-area classification of the business location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionType {
    /// Seoul, Incheon or Gyeonggi.
    Capital,
    /// Everywhere else.
    NonCapital,
}

/// Youth Job Leap participant sub-type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YouthType {
    /// General youth hire.
    #[default]
    General,
    /// Youth with documented employment difficulty (취업애로청년).
    EmploymentDifficulty,
}

/// Kind of leave for Parental Employment Stability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeaveType {
    /// 육아휴직.
    ParentalLeave,
    /// 출산전후휴가.
    MaternityLeave,
    /// 육아기 근로시간 단축.
    ReducedHours,
}

/// A leave case supplied alongside the documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentalLeaveInfo {
    /// The kind of leave.
    pub leave_type: LeaveType,
    /// Employee on leave, if known.
    #[serde(default)]
    pub employee_name: Option<String>,
    /// Age of the child in months at leave start.
    #[serde(default)]
    pub child_age_months: Option<u32>,
    /// Length of the continuous leave in months.
    #[serde(default)]
    pub consecutive_leave_months: Option<u32>,
}

/// Per-run choices that do not come from the documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisOptions {
    /// Programs to evaluate; empty means all.
    #[serde(default)]
    pub programs: Vec<Program>,
    /// Youth Job Leap sub-type.
    #[serde(default)]
    pub youth_type: YouthType,
    /// Explicit region, overriding address classification.
    #[serde(default)]
    pub region: Option<RegionType>,
    /// Leave case for Parental Employment Stability.
    #[serde(default)]
    pub parental_leave: Option<ParentalLeaveInfo>,
    /// Evaluation date; the system clock is used when absent.
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

impl AnalysisOptions {
    /// The programs this run evaluates, in canonical order, without duplicates.
    pub fn requested_programs(&self) -> Vec<Program> {
        if self.programs.is_empty() {
            return Program::ALL.to_vec();
        }
        Program::ALL
            .into_iter()
            .filter(|p| self.programs.contains(p))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_serialization_matches_code() {
        for program in Program::ALL {
            let json = serde_json::to_string(&program).unwrap();
            assert_eq!(json, format!("\"{}\"", program.code()));
        }
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&EligibilityStatus::NeedsReview).unwrap(),
            "\"NEEDS_REVIEW\""
        );
        assert_eq!(
            serde_json::to_string(&EligibilityStatus::NotEligible).unwrap(),
            "\"NOT_ELIGIBLE\""
        );
    }

    #[test]
    fn test_claimable_statuses() {
        assert!(EligibilityStatus::Eligible.is_claimable());
        assert!(EligibilityStatus::NeedsReview.is_claimable());
        assert!(!EligibilityStatus::NotEligible.is_claimable());
    }

    #[test]
    fn test_requested_programs_defaults_to_all() {
        let options = AnalysisOptions::default();
        assert_eq!(options.requested_programs(), Program::ALL.to_vec());
    }

    #[test]
    fn test_requested_programs_are_deduplicated_and_ordered() {
        let options = AnalysisOptions {
            programs: vec![
                Program::SeniorEmploymentSupport,
                Program::YouthJobLeap,
                Program::SeniorEmploymentSupport,
            ],
            ..Default::default()
        };
        assert_eq!(
            options.requested_programs(),
            vec![Program::YouthJobLeap, Program::SeniorEmploymentSupport]
        );
    }

    #[test]
    fn test_deserialize_parental_leave_info() {
        let json = r#"{"leave_type": "PARENTAL_LEAVE", "child_age_months": 6, "consecutive_leave_months": 6}"#;
        let info: ParentalLeaveInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.leave_type, LeaveType::ParentalLeave);
        assert_eq!(info.child_age_months, Some(6));
        assert!(info.employee_name.is_none());
    }
}
