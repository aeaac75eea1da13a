//! The reconciled, one-per-person employee record.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::document::{DocumentType, InsuranceFlags, WorkType};

/// Why and when an employee left, as far as the documents tell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminationInfo {
    /// Termination or insurance-loss date.
    pub date: Option<NaiveDate>,
    /// Reason code or free text.
    pub reason: Option<String>,
}

/// One employee reconciled from every supplied document.
///
/// Age-derived flags are computed once by the merger and never recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalEmployee {
    /// Display name from the highest-priority source.
    pub name: String,
    /// Normalized join key.
    pub name_key: String,
    /// Resident registration number, possibly masked.
    pub resident_id: Option<String>,
    /// Completed years of age on the evaluation date.
    pub age: Option<u32>,
    /// Birth year.
    pub birth_year: Option<i32>,
    /// Age 15 to 34 inclusive.
    pub is_youth: bool,
    /// Age 60 or over.
    pub is_senior: bool,
    /// Hire date, when a source supplied a parseable one.
    pub hire_date: Option<NaiveDate>,
    /// Raw text of the chosen hire-date source.
    pub hire_date_raw: Option<String>,
    /// Completed months of employment.
    pub employment_months: u32,
    /// Weekly hours.
    pub weekly_hours: Option<Decimal>,
    /// Monthly salary.
    pub monthly_salary: Option<Decimal>,
    /// Employment insurance coverage, possibly assumed.
    pub has_employment_insurance: bool,
    /// Four-flag detail when a roster or contract supplied it.
    pub insurance: Option<InsuranceFlags>,
    /// Work arrangement.
    pub work_type: Option<WorkType>,
    /// False once any source reports the employee has left.
    pub is_current_employee: bool,
    /// Termination details, if any source reported them.
    pub termination: Option<TerminationInfo>,
    /// Document types that contributed to this record.
    pub sources: Vec<DocumentType>,
}

impl CanonicalEmployee {
    /// Derives the youth/senior flags from an age, using the engine's bands.
    ///
    /// ```
    /// use subsidy_engine::models::CanonicalEmployee;
    ///
    /// assert_eq!(CanonicalEmployee::age_flags(Some(34)), (true, false));
    /// assert_eq!(CanonicalEmployee::age_flags(Some(35)), (false, false));
    /// assert_eq!(CanonicalEmployee::age_flags(Some(60)), (false, true));
    /// assert_eq!(CanonicalEmployee::age_flags(None), (false, false));
    /// ```
    pub fn age_flags(age: Option<u32>) -> (bool, bool) {
        match age {
            Some(age) => ((15..=34).contains(&age), age >= 60),
            None => (false, false),
        }
    }

    /// Returns true when the employment contract was among the sources.
    pub fn has_contract(&self) -> bool {
        self.sources.contains(&DocumentType::EmploymentContract)
    }

    /// Returns true when age could not be determined from any source.
    pub fn age_unknown(&self) -> bool {
        self.age.is_none()
    }
}
