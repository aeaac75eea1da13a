//! Wage and working-hours consistency between the wage ledger and contracts.

use rust_decimal::Decimal;

use crate::config::CrossValidationConfig;
use crate::models::{
    DocumentType, EmploymentContract, Severity, ValidationWarning, WageRecord,
};
use crate::reconciliation::match_employee_across_documents;

/// Compares each wage ledger row with its matched contract.
///
/// The relative salary difference is measured against the contract salary.
/// Above `salary_high_ratio` is HIGH; above `salary_medium_ratio` is MEDIUM;
/// a difference exactly at a threshold is not flagged. Weekly hours that
/// differ by more than `hours_medium_difference` are MEDIUM.
///
/// # Examples
///
/// ```
/// use subsidy_engine::config::ConfigLoader;
/// use subsidy_engine::models::{EmploymentContract, Severity, WageRecord};
/// use subsidy_engine::validation::check_wage_consistency;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::embedded().unwrap();
/// let wage = WageRecord {
///     name: "김민준".to_string(),
///     monthly_wage: Some(Decimal::from(3_000_000)),
///     ..Default::default()
/// };
/// let contract = EmploymentContract {
///     employee_name: "김민준".to_string(),
///     monthly_salary: Some(Decimal::from(2_000_000)),
///     ..Default::default()
/// };
///
/// let warnings = check_wage_consistency(
///     &[wage],
///     &[contract],
///     &loader.config().policy().cross_validation,
/// );
/// assert_eq!(warnings.len(), 1);
/// assert_eq!(warnings[0].severity, Severity::High);
/// ```
pub fn check_wage_consistency(
    wage_records: &[WageRecord],
    contracts: &[EmploymentContract],
    thresholds: &CrossValidationConfig,
) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    for wage in wage_records {
        let found = match_employee_across_documents(wage, contracts);
        let Some(index) = found.contract_index else {
            continue;
        };
        let contract = &contracts[index];

        if let (Some(paid), Some(agreed)) = (wage.monthly_wage, contract.monthly_salary) {
            warnings.extend(salary_warning(&wage.name, paid, agreed, thresholds));
        }

        if let (Some(ledger_hours), Some(contract_hours)) =
            (wage.weekly_hours, contract.weekly_hours)
        {
            let difference = (ledger_hours - contract_hours).abs();
            if difference > thresholds.hours_medium_difference {
                warnings.push(ValidationWarning {
                    field: "weekly_hours".to_string(),
                    source: DocumentType::EmploymentContract,
                    severity: Severity::Medium,
                    message: format!(
                        "{}: wage ledger records {} weekly hours but the contract states {}",
                        wage.name,
                        ledger_hours.normalize(),
                        contract_hours.normalize()
                    ),
                    suggested_action: "Check the contracted working hours".to_string(),
                    employee_name: Some(wage.name.clone()),
                });
            }
        }
    }

    warnings
}

fn salary_warning(
    name: &str,
    paid: Decimal,
    agreed: Decimal,
    thresholds: &CrossValidationConfig,
) -> Option<ValidationWarning> {
    if agreed <= Decimal::ZERO {
        return None;
    }
    let ratio = (paid - agreed).abs() / agreed;
    let severity = if ratio > thresholds.salary_high_ratio {
        Severity::High
    } else if ratio > thresholds.salary_medium_ratio {
        Severity::Medium
    } else {
        return None;
    };

    let percent = (ratio * Decimal::ONE_HUNDRED).round_dp(1);
    Some(ValidationWarning {
        field: "monthly_salary".to_string(),
        source: DocumentType::EmploymentContract,
        severity,
        message: format!(
            "{}: wage ledger pays {} but the contract states {} ({}% difference)",
            name,
            paid.normalize(),
            agreed.normalize(),
            percent.normalize()
        ),
        suggested_action: "Confirm whether the contract was amended or the ledger includes allowances"
            .to_string(),
        employee_name: Some(name.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;

    fn thresholds() -> CrossValidationConfig {
        ConfigLoader::embedded()
            .unwrap()
            .config()
            .policy()
            .cross_validation
            .clone()
    }

    fn pair(paid: i64, agreed: i64) -> (WageRecord, EmploymentContract) {
        (
            WageRecord {
                name: "김민준".to_string(),
                monthly_wage: Some(Decimal::from(paid)),
                ..Default::default()
            },
            EmploymentContract {
                employee_name: "김민준".to_string(),
                monthly_salary: Some(Decimal::from(agreed)),
                ..Default::default()
            },
        )
    }

    fn severities(paid: i64, agreed: i64) -> Vec<Severity> {
        let (wage, contract) = pair(paid, agreed);
        check_wage_consistency(&[wage], &[contract], &thresholds())
            .into_iter()
            .map(|w| w.severity)
            .collect()
    }

    #[test]
    fn test_exactly_ten_percent_is_not_flagged() {
        assert!(severities(2_200_000, 2_000_000).is_empty());
        assert!(severities(1_800_000, 2_000_000).is_empty());
    }

    #[test]
    fn test_just_over_ten_percent_is_medium() {
        assert_eq!(severities(2_200_001, 2_000_000), vec![Severity::Medium]);
        assert_eq!(severities(1_799_999, 2_000_000), vec![Severity::Medium]);
    }

    #[test]
    fn test_thirty_percent_boundary() {
        assert_eq!(severities(2_600_000, 2_000_000), vec![Severity::Medium]);
        assert_eq!(severities(2_600_001, 2_000_000), vec![Severity::High]);
    }

    #[test]
    fn test_hours_difference() {
        let (mut wage, mut contract) = pair(2_000_000, 2_000_000);
        wage.weekly_hours = Some(Decimal::from(40));
        contract.weekly_hours = Some(Decimal::from(35));
        assert!(check_wage_consistency(&[wage.clone()], &[contract.clone()], &thresholds()).is_empty());

        contract.weekly_hours = Some(Decimal::from(34));
        let warnings = check_wage_consistency(&[wage], &[contract], &thresholds());
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].field, "weekly_hours");
        assert_eq!(warnings[0].severity, Severity::Medium);
    }

    #[test]
    fn test_unmatched_and_incomplete_rows_are_skipped() {
        let (wage, mut contract) = pair(3_000_000, 2_000_000);
        contract.employee_name = "이서연".to_string();
        assert!(check_wage_consistency(&[wage.clone()], &[contract], &thresholds()).is_empty());

        let (_, mut contract) = pair(0, 0);
        contract.monthly_salary = None;
        assert!(check_wage_consistency(&[wage], &[contract], &thresholds()).is_empty());
    }
}
