//! Senior Employment Support (고령자고용지원금).

use crate::config::SeniorSupportRates;
use crate::models::{CanonicalEmployee, Program, SubsidyCalculation};

use super::rule::{
    EmployeeRule, RateCard, RatePeriod, Requirement, RuleContext, current_employee,
    employment_insurance, evaluate_rule, senior_age,
};

/// Eligibility description of Senior Employment Support.
#[derive(Debug, Clone)]
pub struct SeniorSupportRule<'a> {
    rates: &'a SeniorSupportRates,
}

impl<'a> SeniorSupportRule<'a> {
    /// Builds the rule from the run context.
    pub fn new(ctx: &RuleContext<'a>) -> Self {
        Self {
            rates: &ctx.config.rates().senior_employment_support,
        }
    }
}

impl EmployeeRule for SeniorSupportRule<'_> {
    fn program(&self) -> Program {
        Program::SeniorEmploymentSupport
    }

    fn requirement_codes(&self) -> &'static [&'static str] {
        &["current_employee", "senior_age", "employment_insurance"]
    }

    fn assess(&self, employee: &CanonicalEmployee) -> Vec<Requirement> {
        vec![
            current_employee(employee),
            senior_age(employee),
            employment_insurance(employee),
        ]
    }

    fn rate_card(&self) -> RateCard {
        RateCard {
            rate: self.rates.quarterly_amount,
            periods: self.rates.quarters,
            period: RatePeriod::Quarter,
            incentive: None,
            base_payouts: &[],
            incentive_payouts: &[],
        }
    }
}

/// Evaluates Senior Employment Support across all employees.
pub fn calculate_senior_support(
    employees: &[CanonicalEmployee],
    ctx: &RuleContext<'_>,
) -> SubsidyCalculation {
    evaluate_rule(&SeniorSupportRule::new(ctx), employees, ctx)
}
