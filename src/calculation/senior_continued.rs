//! Senior Continued Employment (고령자계속고용장려금).
//!
//! Paid per quarter for employees aged 60 or older once the employer has
//! extended, abolished or re-hired past the retirement age. That policy
//! change lives in the employment rules, not in payroll documents.

use crate::config::SeniorContinuedRates;
use crate::models::{CanonicalEmployee, Program, RegionType, SubsidyCalculation};

use super::rule::{
    EmployeeRule, RateCard, RatePeriod, Requirement, RuleContext, current_employee,
    evaluate_rule, senior_age,
};

/// Eligibility description of Senior Continued Employment.
#[derive(Debug, Clone)]
pub struct SeniorContinuedRule<'a> {
    rates: &'a SeniorContinuedRates,
    region: RegionType,
}

impl<'a> SeniorContinuedRule<'a> {
    /// Builds the rule from the run context.
    pub fn new(ctx: &RuleContext<'a>) -> Self {
        Self {
            rates: &ctx.config.rates().senior_continued_employment,
            region: ctx.region.region,
        }
    }
}

impl EmployeeRule for SeniorContinuedRule<'_> {
    fn program(&self) -> Program {
        Program::SeniorContinuedEmployment
    }

    fn requirement_codes(&self) -> &'static [&'static str] {
        &["current_employee", "senior_age"]
    }

    fn assess(&self, employee: &CanonicalEmployee) -> Vec<Requirement> {
        vec![current_employee(employee), senior_age(employee)]
    }

    fn unverified(&self) -> &'static [&'static str] {
        &["retirement_policy_change"]
    }

    fn rate_card(&self) -> RateCard {
        RateCard {
            rate: self.rates.quarterly_amount.for_region(self.region),
            periods: self.rates.quarters,
            period: RatePeriod::Quarter,
            incentive: None,
            base_payouts: &[],
            incentive_payouts: &[],
        }
    }
}

/// Evaluates Senior Continued Employment across all employees.
pub fn calculate_senior_continued(
    employees: &[CanonicalEmployee],
    ctx: &RuleContext<'_>,
) -> SubsidyCalculation {
    evaluate_rule(&SeniorContinuedRule::new(ctx), employees, ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::test_support::{context, employee_aged};
    use crate::models::{EligibilityStatus, YouthType};
    use rust_decimal::Decimal;

    fn run(region_type: RegionType, employees: &[CanonicalEmployee]) -> SubsidyCalculation {
        let (config, region, options) = context(region_type, YouthType::General);
        let ctx = RuleContext {
            config: &config,
            region: &region,
            options: &options,
        };
        calculate_senior_continued(employees, &ctx)
    }

    #[test]
    fn test_capital_rate() {
        let result = run(RegionType::Capital, &[employee_aged(Some(62))]);
        assert_eq!(result.status, EligibilityStatus::NeedsReview);
        assert_eq!(result.quarterly_amount, Some(Decimal::from(900_000)));
        assert_eq!(result.total_amount, Decimal::from(10_800_000));
        assert_eq!(result.monthly_amount, Decimal::from(300_000));
        assert_eq!(result.total_months, 36);
        assert_eq!(result.region, Some(RegionType::Capital));
    }

    #[test]
    fn test_non_capital_rate() {
        let result = run(RegionType::NonCapital, &[employee_aged(Some(62))]);
        assert_eq!(result.quarterly_amount, Some(Decimal::from(1_200_000)));
        assert_eq!(result.total_amount, Decimal::from(14_400_000));
    }

    #[test]
    fn test_amount_scales_per_employee() {
        let result = run(
            RegionType::Capital,
            &[employee_aged(Some(60)), employee_aged(Some(71)), employee_aged(Some(59))],
        );
        assert_eq!(result.qualifying_count, 2);
        assert_eq!(result.total_amount, Decimal::from(21_600_000));
    }

    #[test]
    fn test_terminated_senior_not_counted() {
        let mut leaver = employee_aged(Some(65));
        leaver.is_current_employee = false;
        let result = run(RegionType::Capital, &[leaver]);
        assert_eq!(result.status, EligibilityStatus::NotEligible);
        assert_eq!(result.requirements_not_met, vec!["current_employee".to_string()]);
    }
}
