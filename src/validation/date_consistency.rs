//! Hire-date consistency across documents.

use chrono::NaiveDate;

use crate::config::CrossValidationConfig;
use crate::models::{
    DocumentType, EmploymentContract, InsuranceRecord, Severity, ValidationWarning, WageRecord,
    parse_document_date,
};
use crate::reconciliation::{match_employee_across_documents, names_match, normalize_name};

/// Compares wage ledger hire dates against insurance enrollment dates, and
/// the hire date (the ledger's, else the enrollment date) against contract
/// start dates. Also flags date text that cannot be read.
///
/// A gap above `date_high_days` is HIGH, above `date_medium_days` is MEDIUM.
pub fn check_date_consistency(
    wage_records: &[WageRecord],
    insurance_records: &[InsuranceRecord],
    contracts: &[EmploymentContract],
    thresholds: &CrossValidationConfig,
) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    for record in wage_records {
        if let Some(raw) = unreadable(record.hire_date.as_deref()) {
            warnings.push(unreadable_date(&record.name, raw, DocumentType::WageLedger));
        }
    }
    for record in insurance_records {
        if let Some(raw) = unreadable(record.enrollment_date.as_deref()) {
            warnings.push(unreadable_date(&record.name, raw, DocumentType::InsuranceRoster));
        }
    }
    for contract in contracts {
        if let Some(raw) = unreadable(contract.contract_start_date.as_deref()) {
            warnings.push(unreadable_date(
                &contract.employee_name,
                raw,
                DocumentType::EmploymentContract,
            ));
        }
    }

    for wage in wage_records {
        let ledger_hired = wage.hire_date.as_deref().and_then(parse_document_date);
        let enrolled = find_insurance(&wage.name, insurance_records)
            .and_then(|r| r.enrollment_date.as_deref())
            .and_then(parse_document_date);

        if let (Some(hired), Some(enrolled)) = (ledger_hired, enrolled) {
            warnings.extend(compare(
                &wage.name,
                hired,
                enrolled,
                DocumentType::InsuranceRoster,
                "insurance enrollment date",
                thresholds,
            ));
        }

        // Same fallback as the merger: ledger hire date, else enrollment.
        let Some(hired) = ledger_hired.or(enrolled) else {
            continue;
        };
        let started = match_employee_across_documents(wage, contracts)
            .contract_index
            .and_then(|i| contracts[i].contract_start_date.as_deref())
            .and_then(parse_document_date);
        if let Some(started) = started {
            warnings.extend(compare(
                &wage.name,
                hired,
                started,
                DocumentType::EmploymentContract,
                "contract start date",
                thresholds,
            ));
        }
    }

    warnings
}

fn unreadable(raw: Option<&str>) -> Option<&str> {
    let raw = raw?.trim();
    if raw.is_empty() || parse_document_date(raw).is_some() {
        None
    } else {
        Some(raw)
    }
}

fn unreadable_date(name: &str, raw: &str, source: DocumentType) -> ValidationWarning {
    ValidationWarning {
        field: "hire_date".to_string(),
        source,
        severity: Severity::Medium,
        message: format!("{}: date '{}' could not be read", name, raw),
        suggested_action: "Enter the date as YYYY-MM-DD; employment duration is treated as 0 months"
            .to_string(),
        employee_name: Some(name.to_string()),
    }
}

fn find_insurance<'a>(name: &str, records: &'a [InsuranceRecord]) -> Option<&'a InsuranceRecord> {
    let key = normalize_name(name);
    records
        .iter()
        .find(|r| normalize_name(&r.name) == key)
        .or_else(|| records.iter().find(|r| names_match(&key, &r.name)))
}

fn compare(
    name: &str,
    hired: NaiveDate,
    other: NaiveDate,
    source: DocumentType,
    label: &str,
    thresholds: &CrossValidationConfig,
) -> Option<ValidationWarning> {
    let days = (hired - other).num_days().abs();
    let severity = if days > thresholds.date_high_days {
        Severity::High
    } else if days > thresholds.date_medium_days {
        Severity::Medium
    } else {
        return None;
    };

    Some(ValidationWarning {
        field: "hire_date".to_string(),
        source,
        severity,
        message: format!(
            "{}: hire date {} differs from the {} {} by {} days",
            name, hired, label, other, days
        ),
        suggested_action: "Confirm the actual hire date with the employer".to_string(),
        employee_name: Some(name.to_string()),
    })
}
