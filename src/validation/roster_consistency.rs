//! Employee list consistency between the wage ledger and the insurance roster.

use std::collections::HashMap;

use crate::models::{DocumentType, InsuranceRecord, Severity, ValidationWarning, WageRecord};
use crate::reconciliation::normalize_name;

/// Multiset difference of normalized names between the two lists.
///
/// Each surplus occurrence is reported on its own: a name on the wage
/// ledger twice and on the roster once produces one MEDIUM warning.
pub fn check_roster_consistency(
    wage_records: &[WageRecord],
    insurance_records: &[InsuranceRecord],
) -> Vec<ValidationWarning> {
    let wage_names: Vec<(&str, String)> = wage_records
        .iter()
        .map(|r| (r.name.as_str(), normalize_name(&r.name)))
        .collect();
    let roster_names: Vec<(&str, String)> = insurance_records
        .iter()
        .map(|r| (r.name.as_str(), normalize_name(&r.name)))
        .collect();

    let mut warnings = Vec::new();

    for name in surplus(&wage_names, &roster_names) {
        warnings.push(ValidationWarning {
            field: "employee_list".to_string(),
            source: DocumentType::InsuranceRoster,
            severity: Severity::Medium,
            message: format!(
                "{} is on the wage ledger but not on the insurance roster (possibly uninsured)",
                name
            ),
            suggested_action: "Check the employee's employment insurance enrollment".to_string(),
            employee_name: Some(name.to_string()),
        });
    }

    for name in surplus(&roster_names, &wage_names) {
        warnings.push(ValidationWarning {
            field: "employee_list".to_string(),
            source: DocumentType::WageLedger,
            severity: Severity::Low,
            message: format!(
                "{} is on the insurance roster but not on the wage ledger (possibly a different period or terminated)",
                name
            ),
            suggested_action: "Confirm the roster and ledger cover the same period".to_string(),
            employee_name: Some(name.to_string()),
        });
    }

    warnings
}

/// Entries of `left` not cancelled by an equal key in `right`, in `left` order.
fn surplus<'a>(left: &[(&'a str, String)], right: &[(&str, String)]) -> Vec<&'a str> {
    let mut available: HashMap<&str, usize> = HashMap::new();
    for (_, key) in right {
        *available.entry(key.as_str()).or_default() += 1;
    }

    let mut result = Vec::new();
    for (name, key) in left {
        if key.is_empty() {
            continue;
        }
        match available.get_mut(key.as_str()) {
            Some(count) if *count > 0 => *count -= 1,
            _ => result.push(*name),
        }
    }
    result
}
