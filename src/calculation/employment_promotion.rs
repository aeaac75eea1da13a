//! Employment Promotion (고용촉진장려금).
//!
//! Membership of a vulnerable class cannot be read from payroll documents,
//! so this program never gets past NEEDS_REVIEW.

use crate::config::EmploymentPromotionRates;
use crate::models::{CanonicalEmployee, Program, SubsidyCalculation};

use super::rule::{
    EmployeeRule, RateCard, RatePeriod, Requirement, RuleContext, current_employee,
    employment_insurance, evaluate_rule,
};

/// Eligibility description of Employment Promotion.
#[derive(Debug, Clone)]
pub struct EmploymentPromotionRule<'a> {
    rates: &'a EmploymentPromotionRates,
}

impl<'a> EmploymentPromotionRule<'a> {
    /// Builds the rule from the run context.
    pub fn new(ctx: &RuleContext<'a>) -> Self {
        Self {
            rates: &ctx.config.rates().employment_promotion,
        }
    }
}

impl EmployeeRule for EmploymentPromotionRule<'_> {
    fn program(&self) -> Program {
        Program::EmploymentPromotion
    }

    fn requirement_codes(&self) -> &'static [&'static str] {
        &["current_employee", "employment_insurance", "minimum_monthly_wage"]
    }

    fn assess(&self, employee: &CanonicalEmployee) -> Vec<Requirement> {
        let minimum = self.rates.minimum_monthly_wage;
        let wage = match employee.monthly_salary {
            None => Requirement::not_met("minimum_monthly_wage", "monthly wage not recorded"),
            Some(salary) => Requirement::when("minimum_monthly_wage", salary >= minimum, || {
                format!(
                    "monthly wage {} is below {}",
                    salary.normalize(),
                    minimum.normalize()
                )
            }),
        };
        vec![current_employee(employee), employment_insurance(employee), wage]
    }

    fn unverified(&self) -> &'static [&'static str] {
        &["vulnerable_class"]
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

/// Evaluates Employment Promotion across all employees.
pub fn calculate_employment_promotion(
    employees: &[CanonicalEmployee],
    ctx: &RuleContext<'_>,
) -> SubsidyCalculation {
    evaluate_rule(&EmploymentPromotionRule::new(ctx), employees, ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::test_support::{context, employee_aged};
    use crate::models::{EligibilityStatus, RegionType, YouthType};
    use rust_decimal::Decimal;

    #[test]
    fn test_best_case_is_needs_review() {
        let (config, region, options) = context(RegionType::Capital, YouthType::General);
        let ctx = RuleContext {
            config: &config,
            region: &region,
            options: &options,
        };
        let result = calculate_employment_promotion(&[employee_aged(Some(45))], &ctx);

        assert_eq!(result.status, EligibilityStatus::NeedsReview);
        assert_eq!(result.total_amount, Decimal::from(7_200_000));
        assert_eq!(result.requirements_unverified, vec!["vulnerable_class".to_string()]);
        assert_eq!(result.region, None);
        let schedule = &result.breakdown.as_ref().unwrap().payment_schedule;
        assert_eq!(schedule.len(), 2);
    }

    #[test]
    fn test_wage_threshold_and_missing_wage() {
        let (config, region, options) = context(RegionType::Capital, YouthType::General);
        let ctx = RuleContext {
            config: &config,
            region: &region,
            options: &options,
        };
        let mut at_threshold = employee_aged(Some(40));
        at_threshold.monthly_salary = Some(Decimal::from(1_210_000));
        let mut below = employee_aged(Some(40));
        below.monthly_salary = Some(Decimal::from(1_209_999));
        let mut missing = employee_aged(Some(40));
        missing.monthly_salary = None;

        let result = calculate_employment_promotion(&[at_threshold, below, missing], &ctx);
        assert_eq!(result.qualifying_count, 1);
        assert_eq!(result.total_amount, Decimal::from(7_200_000));
    }

    #[test]
    fn test_nobody_earning_enough_is_not_eligible() {
        let (config, region, options) = context(RegionType::Capital, YouthType::General);
        let ctx = RuleContext {
            config: &config,
            region: &region,
            options: &options,
        };
        let mut low = employee_aged(Some(40));
        low.monthly_salary = Some(Decimal::from(900_000));

        let result = calculate_employment_promotion(&[low], &ctx);
        assert_eq!(result.status, EligibilityStatus::NotEligible);
        assert_eq!(
            result.requirements_not_met,
            vec!["minimum_monthly_wage".to_string()]
        );
    }
}
