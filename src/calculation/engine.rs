//! The end-to-end analysis pipeline.
//!
//! Documents are merged into canonical employees, cross-validated, and then
//! every requested program is evaluated. The run is total over its input:
//! even an empty bundle produces a complete report.

use rust_decimal::Decimal;
use tracing::info;

use crate::clock::Clock;
use crate::config::SubsidyConfig;
use crate::models::{
    AnalysisOptions, CanonicalEmployee, DocumentBundle, EmployeeSummary, Program, SubsidyCalculation,
    SubsidyReport,
};
use crate::reconciliation::{match_wage_ledger_to_contracts, merge_employee_data};
use crate::validation::cross_validate;

use super::checklist::build_checklist;
use super::employment_retention::calculate_employment_retention;
use super::exclusion::resolve_exclusions;
use super::parental_leave::calculate_parental_leave;
use super::per_employee::{calculate_per_employee, employee_rule};
use super::region::classify_region;
use super::rule::{RuleContext, evaluate_rule};

/// Runs analyses against one loaded configuration.
///
/// # Examples
///
/// ```
/// use subsidy_engine::calculation::SubsidyEngine;
/// use subsidy_engine::clock::FixedClock;
/// use subsidy_engine::config::ConfigLoader;
/// use subsidy_engine::models::{AnalysisOptions, DocumentBundle, EligibilityStatus};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::embedded().unwrap();
/// let engine = SubsidyEngine::new(loader.config());
/// let clock = FixedClock::new(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
///
/// let report = engine.analyze(&DocumentBundle::default(), &AnalysisOptions::default(), &clock);
/// assert_eq!(report.calculations.len(), 7);
/// assert!(report
///     .calculations
///     .iter()
///     .all(|c| c.status == EligibilityStatus::NotEligible));
/// assert_eq!(report.total_eligible_amount, Decimal::ZERO);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SubsidyEngine<'a> {
    config: &'a SubsidyConfig,
}

impl<'a> SubsidyEngine<'a> {
    /// Creates an engine over `config`.
    pub fn new(config: &'a SubsidyConfig) -> Self {
        Self { config }
    }

    /// Analyzes one document bundle.
    pub fn analyze<C: Clock + ?Sized>(
        &self,
        bundle: &DocumentBundle,
        options: &AnalysisOptions,
        clock: &C,
    ) -> SubsidyReport {
        let today = clock.today();
        let policy = self.config.policy();

        let employees = merge_employee_data(
            bundle.wage_ledger.as_ref(),
            bundle.insurance_roster.as_ref(),
            bundle.contracts.as_deref(),
            today,
        );
        let match_statistics =
            match_wage_ledger_to_contracts(bundle.wage_records(), bundle.contract_records(), today)
                .statistics;
        let validation = cross_validate(bundle, policy);
        let region = classify_region(
            bundle.business_registration.as_ref(),
            &policy.region,
            options.region,
        );

        let ctx = RuleContext {
            config: self.config,
            region: &region,
            options,
        };
        let programs = options.requested_programs();
        let parental = programs
            .contains(&Program::ParentalEmploymentStability)
            .then(|| calculate_parental_leave(&employees, &ctx));

        let calculations: Vec<SubsidyCalculation> = programs
            .iter()
            .filter_map(|&program| match program {
                Program::ParentalEmploymentStability => {
                    parental.as_ref().map(|p| p.calculation.clone())
                }
                Program::EmploymentRetention => {
                    Some(calculate_employment_retention(&employees, &ctx))
                }
                _ => employee_rule(program, &ctx)
                    .map(|rule| evaluate_rule(rule.as_ref(), &employees, &ctx)),
            })
            .collect();

        let (eligible_calculations, excluded) =
            resolve_exclusions(&calculations, self.config.exclusions());
        let total_eligible_amount = eligible_calculations
            .iter()
            .map(|c| c.total_amount)
            .sum::<Decimal>();
        let per_employee = calculate_per_employee(&employees, &programs, &ctx, parental.as_ref());
        let checklist = build_checklist(&eligible_calculations, self.config);
        let employee_summary = summarize(&employees);

        info!(
            employees = employee_summary.total,
            programs = calculations.len(),
            eligible_programs = eligible_calculations.len(),
            total_eligible_amount = %total_eligible_amount,
            confidence = validation.confidence,
            "Subsidy analysis completed"
        );

        SubsidyReport {
            generated_on: today,
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            region,
            employee_summary,
            match_statistics,
            calculations,
            eligible_calculations,
            excluded,
            total_eligible_amount,
            employees: per_employee,
            checklist,
            validation,
        }
    }
}

fn summarize(employees: &[CanonicalEmployee]) -> EmployeeSummary {
    let count = |f: fn(&CanonicalEmployee) -> bool| employees.iter().filter(|e| f(e)).count() as u32;
    EmployeeSummary {
        total: employees.len() as u32,
        current: count(|e| e.is_current_employee),
        youth: count(|e| e.is_youth),
        senior: count(|e| e.is_senior),
        unknown_age: count(CanonicalEmployee::age_unknown),
    }
}
