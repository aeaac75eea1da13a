//! Employment Retention (고용유지지원금).
//!
//! The subsidy reimburses leave allowances actually paid during a business
//! downturn, so no amount can be estimated from payroll documents.

use rust_decimal::Decimal;

use crate::models::{CanonicalEmployee, EligibilityStatus, Program, SubsidyCalculation};

use super::breakdown::BreakdownBuilder;
use super::rule::RuleContext;

/// Evaluates Employment Retention for the business.
///
/// Requires at least one current employee. Business hardship is never
/// verifiable, so a passing result is NEEDS_REVIEW with a zero amount.
pub fn calculate_employment_retention(
    employees: &[CanonicalEmployee],
    ctx: &RuleContext<'_>,
) -> SubsidyCalculation {
    let program = Program::EmploymentRetention;
    let active = employees.iter().filter(|e| e.is_current_employee).count() as u32;

    let mut calculation = SubsidyCalculation {
        program,
        program_name: ctx.config.program_name(program),
        status: EligibilityStatus::NotEligible,
        qualifying_count: 0,
        monthly_amount: Decimal::ZERO,
        total_months: 0,
        total_amount: Decimal::ZERO,
        requirements_met: Vec::new(),
        requirements_not_met: Vec::new(),
        requirements_unverified: vec!["business_hardship".to_string()],
        notes: Vec::new(),
        region: None,
        incentive_amount: None,
        quarterly_amount: None,
        breakdown: None,
    };

    if active == 0 {
        calculation
            .requirements_not_met
            .push("active_employees".to_string());
        calculation
            .notes
            .push("No current employees were found in the supplied documents".to_string());
        return calculation;
    }

    let mut builder = BreakdownBuilder::new();
    builder.step(
        "Rate lookup",
        None,
        serde_json::json!({
            "program": program.code(),
            "active_employees": active,
        }),
        Decimal::ZERO,
    );

    calculation.status = EligibilityStatus::NeedsReview;
    calculation.qualifying_count = active;
    calculation
        .requirements_met
        .push("active_employees".to_string());
    calculation.notes.push(
        "Support depends on the leave allowance actually paid and is not estimated; business hardship must be documented"
            .to_string(),
    );
    calculation.breakdown = Some(builder.finish(Decimal::ZERO, Decimal::ZERO, Vec::new()));
    calculation
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::test_support::{context, employee_aged};
    use crate::models::{RegionType, YouthType};

    #[test]
    fn test_active_business_needs_review_with_zero_amount() {
        let (config, region, options) = context(RegionType::Capital, YouthType::General);
        let ctx = RuleContext {
            config: &config,
            region: &region,
            options: &options,
        };
        let mut leaver = employee_aged(Some(40));
        leaver.is_current_employee = false;

        let result =
            calculate_employment_retention(&[employee_aged(Some(30)), leaver], &ctx);
        assert_eq!(result.status, EligibilityStatus::NeedsReview);
        assert_eq!(result.qualifying_count, 1);
        assert_eq!(result.total_amount, Decimal::ZERO);
        assert_eq!(
            result.requirements_unverified,
            vec!["business_hardship".to_string()]
        );
        let breakdown = result.breakdown.unwrap();
        assert!(breakdown.is_consistent());
        assert!(breakdown.payment_schedule.is_empty());
    }

    #[test]
    fn test_no_current_employees() {
        let (config, region, options) = context(RegionType::Capital, YouthType::General);
        let ctx = RuleContext {
            config: &config,
            region: &region,
            options: &options,
        };
        let result = calculate_employment_retention(&[], &ctx);
        assert_eq!(result.status, EligibilityStatus::NotEligible);
        assert_eq!(
            result.requirements_not_met,
            vec!["active_employees".to_string()]
        );
        assert!(result.breakdown.is_none());
    }
}
