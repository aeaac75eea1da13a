//! Detection of involuntary separations that block new-hire subsidies.
//!
//! Most hiring subsidies are refused when the employer dismissed staff
//! around the hiring period, so every involuntary exit is surfaced.

use crate::config::InvoluntaryTerminationConfig;
use crate::models::{DocumentType, InsuranceRecord, Severity, ValidationWarning, WageRecord};

/// Returns the policy label of an involuntary reason, or `None` when the
/// reason is voluntary or unknown.
///
/// A reason is involuntary when it is one of the configured loss codes or
/// its text contains one of the configured keywords.
pub fn involuntary_reason<'a>(
    reason: &str,
    policy: &'a InvoluntaryTerminationConfig,
) -> Option<&'a str> {
    let reason = reason.trim();
    if let Some(label) = policy.codes.get(reason) {
        return Some(label.as_str());
    }
    policy
        .keywords
        .iter()
        .find(|keyword| reason.contains(keyword.as_str()))
        .map(String::as_str)
}

/// Flags involuntary roster exits (HIGH each) and terminated wage ledger
/// employees (MEDIUM each).
pub fn check_reduction_prevention(
    wage_records: &[WageRecord],
    insurance_records: &[InsuranceRecord],
    policy: &InvoluntaryTerminationConfig,
) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    for record in insurance_records {
        let Some(code) = record.loss_reason_code.as_deref() else {
            continue;
        };
        let Some(label) = involuntary_reason(code, policy) else {
            continue;
        };
        let date = record.loss_date.as_deref().unwrap_or("unknown date");
        warnings.push(ValidationWarning {
            field: "termination".to_string(),
            source: DocumentType::InsuranceRoster,
            severity: Severity::High,
            message: format!(
                "{} left on {} for an involuntary reason ({}: {})",
                record.name,
                date,
                code.trim(),
                label
            ),
            suggested_action:
                "Dismissals near the hiring period can disqualify new-hire subsidies; check the dates"
                    .to_string(),
            employee_name: Some(record.name.clone()),
        });
    }

    for record in wage_records {
        let terminated = record.is_current_employee == Some(false)
            || record
                .termination_date
                .as_deref()
                .is_some_and(|d| !d.trim().is_empty());
        if !terminated {
            continue;
        }
        warnings.push(ValidationWarning {
            field: "is_current_employee".to_string(),
            source: DocumentType::WageLedger,
            severity: Severity::Medium,
            message: format!(
                "{} is marked as terminated and is excluded from subsidy calculation",
                record.name
            ),
            suggested_action: "Confirm the termination date and reason".to_string(),
            employee_name: Some(record.name.clone()),
        });
    }

    warnings
}
