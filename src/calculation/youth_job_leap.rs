//! Youth Job Leap (청년일자리도약장려금).
//!
//! Pays 600,000 a month for 12 months per youth hire. Outside the capital
//! area a flat incentive is added per employee; inside it, only youth with
//! employment difficulty qualify and no incentive is paid.

use crate::config::YouthJobLeapRates;
use crate::models::{CanonicalEmployee, Program, RegionType, SubsidyCalculation, WorkType, YouthType};

use super::rule::{
    EmployeeRule, RateCard, RatePeriod, Requirement, RuleContext, current_employee,
    employment_insurance, evaluate_rule, youth_age,
};

/// Eligibility description of Youth Job Leap for one run.
#[derive(Debug, Clone)]
pub struct YouthJobLeapRule<'a> {
    rates: &'a YouthJobLeapRates,
    region: RegionType,
    region_defaulted: bool,
    youth_type: YouthType,
}

impl<'a> YouthJobLeapRule<'a> {
    /// Builds the rule from the run context.
    pub fn new(ctx: &RuleContext<'a>) -> Self {
        Self {
            rates: &ctx.config.rates().youth_job_leap,
            region: ctx.region.region,
            region_defaulted: ctx.region.defaulted,
            youth_type: ctx.options.youth_type,
        }
    }
}

impl EmployeeRule for YouthJobLeapRule<'_> {
    fn program(&self) -> Program {
        Program::YouthJobLeap
    }

    fn requirement_codes(&self) -> &'static [&'static str] {
        &[
            "current_employee",
            "youth_age",
            "employment_insurance",
            "not_part_time",
        ]
    }

    fn assess(&self, employee: &CanonicalEmployee) -> Vec<Requirement> {
        vec![
            current_employee(employee),
            youth_age(employee),
            employment_insurance(employee),
            Requirement::when(
                "not_part_time",
                employee.work_type != Some(WorkType::PartTime),
                || "part-time employees are not supported".to_string(),
            ),
        ]
    }

    fn program_requirements(&self) -> Vec<Requirement> {
        if self.region != RegionType::Capital {
            return Vec::new();
        }
        vec![Requirement::when(
            "youth_type",
            self.youth_type == YouthType::EmploymentDifficulty,
            || {
                "capital-area businesses qualify only for youth with employment difficulty"
                    .to_string()
            },
        )]
    }

    fn rate_card(&self) -> RateCard {
        let incentive = match (self.region, self.youth_type) {
            (RegionType::Capital, _) => None,
            (RegionType::NonCapital, YouthType::General) => Some(self.rates.incentive.general),
            (RegionType::NonCapital, YouthType::EmploymentDifficulty) => {
                Some(self.rates.incentive.employment_difficulty)
            }
        };
        RateCard {
            rate: self.rates.monthly_amount,
            periods: self.rates.months,
            period: RatePeriod::Month,
            incentive,
            base_payouts: &[6, 12],
            incentive_payouts: &[18, 24],
        }
    }

    fn notes(&self) -> Vec<String> {
        let mut notes = Vec::new();
        if self.region_defaulted {
            notes.push(
                "Business address missing or unrecognized; region defaulted to capital, which requires the employment-difficulty youth type"
                    .to_string(),
            );
        }
        if self.region == RegionType::NonCapital {
            notes.push(match self.youth_type {
                YouthType::General => "Non-capital region: general youth incentive added".to_string(),
                YouthType::EmploymentDifficulty => {
                    "Non-capital region: employment-difficulty youth incentive added".to_string()
                }
            });
        }
        notes
    }
}

/// Evaluates Youth Job Leap across all employees.
///
/// # Examples
///
/// ```
/// use subsidy_engine::calculation::{RuleContext, calculate_youth_job_leap};
/// use subsidy_engine::config::ConfigLoader;
/// use subsidy_engine::models::{
///     AnalysisOptions, CanonicalEmployee, EligibilityStatus, RegionClassification, RegionType,
/// };
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::embedded().unwrap();
/// let region = RegionClassification {
///     region: RegionType::NonCapital,
///     matched_keyword: Some("부산".to_string()),
///     defaulted: false,
/// };
/// let options = AnalysisOptions::default();
/// let ctx = RuleContext { config: loader.config(), region: &region, options: &options };
///
/// let result = calculate_youth_job_leap(&[], &ctx);
/// assert_eq!(result.status, EligibilityStatus::NotEligible);
/// assert_eq!(result.total_amount, Decimal::ZERO);
/// ```
pub fn calculate_youth_job_leap(
    employees: &[CanonicalEmployee],
    ctx: &RuleContext<'_>,
) -> SubsidyCalculation {
    evaluate_rule(&YouthJobLeapRule::new(ctx), employees, ctx)
}
