//! Per-employee view of the program results.

use rust_decimal::Decimal;

use crate::models::{
    CanonicalEmployee, EmployeeProgramResult, IneligibleProgram, PerEmployeeCalculation, Program,
};

use super::employment_promotion::EmploymentPromotionRule;
use super::exclusion::excluded_programs;
use super::parental_leave::ParentalLeaveResult;
use super::regular_conversion::RegularConversionRule;
use super::rule::{EmployeeOutcome, EmployeeRule, RuleContext, assess_employee};
use super::senior_continued::SeniorContinuedRule;
use super::senior_support::SeniorSupportRule;
use super::youth_job_leap::YouthJobLeapRule;

/// Returns the rule of a per-employee program, or `None` for programs
/// evaluated once for the business.
pub fn employee_rule<'a>(
    program: Program,
    ctx: &RuleContext<'a>,
) -> Option<Box<dyn EmployeeRule + 'a>> {
    let rule: Box<dyn EmployeeRule + 'a> = match program {
        Program::YouthJobLeap => Box::new(YouthJobLeapRule::new(ctx)),
        Program::EmploymentPromotion => Box::new(EmploymentPromotionRule::new(ctx)),
        Program::RegularConversion => Box::new(RegularConversionRule::new(ctx)),
        Program::SeniorContinuedEmployment => Box::new(SeniorContinuedRule::new(ctx)),
        Program::SeniorEmploymentSupport => Box::new(SeniorSupportRule::new(ctx)),
        Program::ParentalEmploymentStability | Program::EmploymentRetention => return None,
    };
    Some(rule)
}

/// Evaluates the requested per-employee programs for each employee.
///
/// The parental leave case is added to the employee it names. Exclusion
/// rules are applied to each employee's claimable programs, and only the
/// survivors count toward `estimated_subsidy`.
pub fn calculate_per_employee(
    employees: &[CanonicalEmployee],
    programs: &[Program],
    ctx: &RuleContext<'_>,
    parental: Option<&ParentalLeaveResult>,
) -> Vec<PerEmployeeCalculation> {
    let rules: Vec<Box<dyn EmployeeRule + '_>> = programs
        .iter()
        .filter_map(|&p| employee_rule(p, ctx))
        .collect();

    employees
        .iter()
        .enumerate()
        .map(|(index, employee)| {
            let mut eligible = Vec::new();
            let mut ineligible = Vec::new();

            for rule in &rules {
                match assess_employee(rule.as_ref(), employee, ctx) {
                    EmployeeOutcome::Claimable(result) => eligible.push(result),
                    EmployeeOutcome::Ineligible(result) => ineligible.push(result),
                }
            }

            if let Some(parental) = parental.filter(|p| p.employee_index == Some(index)) {
                attribute_parental(parental, &mut eligible, &mut ineligible);
            }

            let present: Vec<Program> = eligible.iter().map(|r| r.program).collect();
            let excluded = excluded_programs(&present, ctx.config.exclusions());
            eligible.retain(|r| !excluded.iter().any(|e| e.program == r.program));

            let estimated_subsidy = eligible.iter().map(|r| r.amount).sum::<Decimal>();

            PerEmployeeCalculation {
                employee: employee.clone(),
                eligible_programs: eligible,
                ineligible_programs: ineligible,
                excluded_programs: excluded,
                estimated_subsidy,
            }
        })
        .collect()
}

fn attribute_parental(
    parental: &ParentalLeaveResult,
    eligible: &mut Vec<EmployeeProgramResult>,
    ineligible: &mut Vec<IneligibleProgram>,
) {
    let calc = &parental.calculation;
    match (&calc.breakdown, calc.status.is_claimable()) {
        (Some(breakdown), true) => eligible.push(EmployeeProgramResult {
            program: calc.program,
            program_name: calc.program_name.clone(),
            status: calc.status,
            amount: calc.total_amount,
            breakdown: breakdown.clone(),
        }),
        _ => ineligible.push(IneligibleProgram {
            program: calc.program,
            program_name: calc.program_name.clone(),
            reasons: calc.notes.clone(),
            missing_requirements: calc.requirements_not_met.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::parental_leave::calculate_parental_leave;
    use crate::calculation::test_support::{context, employee_aged};
    use crate::models::{EligibilityStatus, LeaveType, ParentalLeaveInfo, RegionType, YouthType};

    #[test]
    fn test_youth_employee_excludes_employment_promotion() {
        let (config, region, options) = context(RegionType::NonCapital, YouthType::General);
        let ctx = RuleContext {
            config: &config,
            region: &region,
            options: &options,
        };
        let results = calculate_per_employee(
            &[employee_aged(Some(28))],
            &[Program::YouthJobLeap, Program::EmploymentPromotion],
            &ctx,
            None,
        );

        let employee = &results[0];
        assert_eq!(employee.eligible_programs.len(), 1);
        assert_eq!(employee.eligible_programs[0].program, Program::YouthJobLeap);
        assert_eq!(employee.excluded_programs.len(), 1);
        assert_eq!(
            employee.excluded_programs[0].program,
            Program::EmploymentPromotion
        );
        assert_eq!(employee.estimated_subsidy, Decimal::from(12_000_000));
    }

    #[test]
    fn test_senior_lists_failed_programs() {
        let (config, region, options) = context(RegionType::Capital, YouthType::General);
        let ctx = RuleContext {
            config: &config,
            region: &region,
            options: &options,
        };
        let results = calculate_per_employee(
            &[employee_aged(Some(63))],
            &[Program::YouthJobLeap, Program::SeniorEmploymentSupport],
            &ctx,
            None,
        );

        let employee = &results[0];
        assert_eq!(employee.eligible_programs.len(), 1);
        assert_eq!(employee.ineligible_programs.len(), 1);
        let youth = &employee.ineligible_programs[0];
        assert_eq!(youth.program, Program::YouthJobLeap);
        assert!(youth.missing_requirements.contains(&"youth_age".to_string()));
        assert!(youth.missing_requirements.contains(&"youth_type".to_string()));
        assert_eq!(employee.estimated_subsidy, Decimal::from(2_400_000));
    }

    #[test]
    fn test_unknown_age_is_needs_review() {
        let (config, region, options) = context(RegionType::NonCapital, YouthType::General);
        let ctx = RuleContext {
            config: &config,
            region: &region,
            options: &options,
        };
        let results =
            calculate_per_employee(&[employee_aged(None)], &[Program::YouthJobLeap], &ctx, None);

        let eligible = &results[0].eligible_programs;
        assert_eq!(eligible.len(), 1);
        assert_eq!(eligible[0].status, EligibilityStatus::NeedsReview);
    }

    #[test]
    fn test_parental_case_attributed_to_named_employee() {
        let (config, region, mut options) = context(RegionType::Capital, YouthType::General);
        options.parental_leave = Some(ParentalLeaveInfo {
            leave_type: LeaveType::MaternityLeave,
            employee_name: Some("김민준".to_string()),
            child_age_months: None,
            consecutive_leave_months: None,
        });
        let ctx = RuleContext {
            config: &config,
            region: &region,
            options: &options,
        };
        let employees = [employee_aged(Some(31))];
        let parental = calculate_parental_leave(&employees, &ctx);
        let results = calculate_per_employee(
            &employees,
            &[Program::ParentalEmploymentStability],
            &ctx,
            Some(&parental),
        );

        let employee = &results[0];
        assert_eq!(employee.eligible_programs.len(), 1);
        assert_eq!(
            employee.eligible_programs[0].program,
            Program::ParentalEmploymentStability
        );
        assert_eq!(employee.estimated_subsidy, Decimal::from(2_400_000));
    }
}
