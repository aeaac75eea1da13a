//! Regular Conversion (정규직전환지원금).
//!
//! Fixed-term workers with enough tenure are candidates. Whether they were
//! actually converted to open-ended employment is not visible in the
//! documents, so the result is capped at NEEDS_REVIEW.

use crate::config::RegularConversionRates;
use crate::models::{CanonicalEmployee, Program, SubsidyCalculation, WorkType};

use super::rule::{
    EmployeeRule, RateCard, RatePeriod, Requirement, RuleContext, current_employee,
    employment_insurance, evaluate_rule,
};

/// Eligibility description of Regular Conversion.
#[derive(Debug, Clone)]
pub struct RegularConversionRule<'a> {
    rates: &'a RegularConversionRates,
}

impl<'a> RegularConversionRule<'a> {
    /// Builds the rule from the run context.
    pub fn new(ctx: &RuleContext<'a>) -> Self {
        Self {
            rates: &ctx.config.rates().regular_conversion,
        }
    }
}

impl EmployeeRule for RegularConversionRule<'_> {
    fn program(&self) -> Program {
        Program::RegularConversion
    }

    fn requirement_codes(&self) -> &'static [&'static str] {
        &[
            "current_employee",
            "fixed_term_contract",
            "employment_insurance",
            "minimum_tenure",
        ]
    }

    fn assess(&self, employee: &CanonicalEmployee) -> Vec<Requirement> {
        let minimum = self.rates.minimum_tenure_months;
        vec![
            current_employee(employee),
            Requirement::when(
                "fixed_term_contract",
                employee.work_type == Some(WorkType::Contract),
                || "not employed on a fixed-term contract".to_string(),
            ),
            employment_insurance(employee),
            Requirement::when(
                "minimum_tenure",
                employee.employment_months >= minimum,
                || {
                    format!(
                        "{} months employed, {} required",
                        employee.employment_months, minimum
                    )
                },
            ),
        ]
    }

    fn unverified(&self) -> &'static [&'static str] {
        &["conversion_evidence"]
    }

    fn rate_card(&self) -> RateCard {
        RateCard {
            rate: self.rates.monthly_amount,
            periods: self.rates.months,
            period: RatePeriod::Month,
            incentive: None,
            base_payouts: &[6, 12],
            incentive_payouts: &[],
        }
    }
}

/// Evaluates Regular Conversion across all employees.
pub fn calculate_regular_conversion(
    employees: &[CanonicalEmployee],
    ctx: &RuleContext<'_>,
) -> SubsidyCalculation {
    evaluate_rule(&RegularConversionRule::new(ctx), employees, ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::test_support::{context, employee_aged};
    use crate::models::{EligibilityStatus, RegionType, YouthType};
    use rust_decimal::Decimal;

    #[test]
    fn test_fixed_term_worker_with_tenure() {
        let (config, region, options) = context(RegionType::Capital, YouthType::General);
        let ctx = RuleContext {
            config: &config,
            region: &region,
            options: &options,
        };
        let mut worker = employee_aged(Some(33));
        worker.work_type = Some(WorkType::Contract);
        worker.employment_months = 6;

        let result = calculate_regular_conversion(&[worker], &ctx);
        assert_eq!(result.status, EligibilityStatus::NeedsReview);
        assert_eq!(result.total_amount, Decimal::from(7_200_000));
        assert_eq!(
            result.requirements_unverified,
            vec!["conversion_evidence".to_string()]
        );
    }

    #[test]
    fn test_short_tenure_and_permanent_staff_rejected() {
        let (config, region, options) = context(RegionType::Capital, YouthType::General);
        let ctx = RuleContext {
            config: &config,
            region: &region,
            options: &options,
        };
        let mut recent = employee_aged(Some(33));
        recent.work_type = Some(WorkType::Contract);
        recent.employment_months = 5;
        let permanent = employee_aged(Some(33));

        let result = calculate_regular_conversion(&[recent, permanent], &ctx);
        assert_eq!(result.status, EligibilityStatus::NotEligible);
        assert_eq!(
            result.requirements_not_met,
            vec!["fixed_term_contract".to_string(), "minimum_tenure".to_string()]
        );
    }
}
