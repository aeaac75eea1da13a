//! Fixtures shared by the calculation unit tests.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::{ConfigLoader, SubsidyConfig};
use crate::models::{
    AnalysisOptions, CanonicalEmployee, DocumentType, RegionClassification, RegionType, WorkType,
    YouthType,
};

pub fn context(
    region: RegionType,
    youth_type: YouthType,
) -> (SubsidyConfig, RegionClassification, AnalysisOptions) {
    let config = ConfigLoader::embedded().unwrap().config().clone();
    let region = RegionClassification {
        region,
        matched_keyword: None,
        defaulted: false,
    };
    let options = AnalysisOptions {
        youth_type,
        ..Default::default()
    };
    (config, region, options)
}

/// A current, insured, full-time employee with a contract.
pub fn employee_aged(age: Option<u32>) -> CanonicalEmployee {
    let (is_youth, is_senior) = CanonicalEmployee::age_flags(age);
    CanonicalEmployee {
        name: "김민준".to_string(),
        name_key: "김민준".to_string(),
        resident_id: None,
        age,
        birth_year: age.map(|a| 2026 - a as i32),
        is_youth,
        is_senior,
        hire_date: NaiveDate::from_ymd_opt(2025, 1, 2),
        hire_date_raw: Some("2025-01-02".to_string()),
        employment_months: 13,
        weekly_hours: Some(Decimal::from(40)),
        monthly_salary: Some(Decimal::from(2_500_000)),
        has_employment_insurance: true,
        insurance: None,
        work_type: Some(WorkType::FullTime),
        is_current_employee: true,
        termination: None,
        sources: vec![DocumentType::WageLedger, DocumentType::EmploymentContract],
    }
}
