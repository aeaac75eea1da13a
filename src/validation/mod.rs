//! Cross-document validation.
//!
//! Every check is advisory: it only appends warnings and never changes
//! eligibility. The warnings are folded into a 0-100 confidence score.
//!
//! # Example
//!
//! ```
//! use subsidy_engine::config::ConfigLoader;
//! use subsidy_engine::models::DocumentBundle;
//! use subsidy_engine::validation::cross_validate;
//!
//! let loader = ConfigLoader::embedded().unwrap();
//! let result = cross_validate(&DocumentBundle::default(), loader.config().policy());
//! assert_eq!(result.confidence, 100);
//! ```

mod confidence;
mod date_consistency;
mod minimum_wage;
mod reduction_prevention;
mod roster_consistency;
mod wage_consistency;

pub use confidence::confidence_score;
pub use date_consistency::check_date_consistency;
pub use minimum_wage::{PayFigure, check_minimum_wage};
pub use reduction_prevention::{check_reduction_prevention, involuntary_reason};
pub use roster_consistency::check_roster_consistency;
pub use wage_consistency::check_wage_consistency;

use tracing::debug;

use crate::config::PolicyConfig;
use crate::models::{CrossValidationResult, DocumentBundle, DocumentType};

/// Runs every check over the bundle.
pub fn cross_validate(bundle: &DocumentBundle, policy: &PolicyConfig) -> CrossValidationResult {
    let thresholds = &policy.cross_validation;
    let wages = bundle.wage_records();
    let insured = bundle.insurance_records();
    let contracts = bundle.contract_records();

    let mut warnings = check_wage_consistency(wages, contracts, thresholds);
    warnings.extend(check_date_consistency(wages, insured, contracts, thresholds));
    warnings.extend(check_minimum_wage(&pay_figures(bundle), &policy.minimum_wage));
    if bundle.wage_ledger.is_some() && bundle.insurance_roster.is_some() {
        warnings.extend(check_roster_consistency(wages, insured));
    }
    warnings.extend(check_reduction_prevention(
        wages,
        insured,
        &policy.involuntary_termination,
    ));

    let confidence = confidence_score(&warnings, &thresholds.penalties);
    debug!(
        warnings = warnings.len(),
        confidence, "Cross-validation finished"
    );

    CrossValidationResult {
        warnings,
        confidence,
    }
}

/// Pay figures for the minimum wage check: the wage ledger when supplied,
/// otherwise the contracts.
fn pay_figures(bundle: &DocumentBundle) -> Vec<PayFigure<'_>> {
    if bundle.wage_ledger.is_some() {
        bundle
            .wage_records()
            .iter()
            .filter_map(|r| {
                Some(PayFigure {
                    name: &r.name,
                    monthly_pay: r.monthly_wage?,
                    weekly_hours: r.weekly_hours,
                    source: DocumentType::WageLedger,
                })
            })
            .collect()
    } else {
        bundle
            .contract_records()
            .iter()
            .filter_map(|c| {
                Some(PayFigure {
                    name: &c.employee_name,
                    monthly_pay: c.monthly_salary?,
                    weekly_hours: c.weekly_hours,
                    source: DocumentType::EmploymentContract,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::models::{InsuranceRecord, InsuranceRoster, Severity, WageLedger, WageRecord};
    use rust_decimal::Decimal;

    #[test]
    fn test_roster_check_needs_both_documents() {
        let loader = ConfigLoader::embedded().unwrap();
        let bundle = DocumentBundle {
            wage_ledger: Some(WageLedger {
                employees: vec![WageRecord {
                    name: "김민준".to_string(),
                    ..Default::default()
                }],
                ..Default::default()
            }),
            ..Default::default()
        };
        let result = cross_validate(&bundle, loader.config().policy());
        assert!(result.warnings.is_empty());
        assert_eq!(result.confidence, 100);
    }

    #[test]
    fn test_warnings_reduce_confidence() {
        let loader = ConfigLoader::embedded().unwrap();
        let bundle = DocumentBundle {
            wage_ledger: Some(WageLedger {
                employees: vec![WageRecord {
                    name: "김민준".to_string(),
                    monthly_wage: Some(Decimal::from(1_000_000)),
                    weekly_hours: Some(Decimal::from(40)),
                    ..Default::default()
                }],
                ..Default::default()
            }),
            insurance_roster: Some(InsuranceRoster {
                employees: vec![InsuranceRecord {
                    name: "이서연".to_string(),
                    ..Default::default()
                }],
            }),
            ..Default::default()
        };

        let result = cross_validate(&bundle, loader.config().policy());
        let severities: Vec<Severity> = result.warnings.iter().map(|w| w.severity).collect();
        // Below minimum wage, missing from roster, missing from ledger.
        assert_eq!(
            severities,
            vec![Severity::High, Severity::Medium, Severity::Low]
        );
        assert_eq!(result.confidence, 100 - 15 - 8 - 3);
    }
}
