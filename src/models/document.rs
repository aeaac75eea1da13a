//! Structured document records handed over by the extraction layer.
//!
//! Every field the extractor may fail to read is optional. Dates are kept as
//! the raw text the extractor produced; they are parsed during reconciliation
//! so that an unreadable date degrades to a warning instead of a rejection.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The kind of source document a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// Monthly wage ledger (임금대장).
    WageLedger,
    /// Four-insurance enrollment roster (4대보험 가입자 명부).
    InsuranceRoster,
    /// Individual employment contract (근로계약서).
    EmploymentContract,
    /// Business registration certificate (사업자등록증).
    BusinessRegistration,
}

/// Work arrangement as written on a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkType {
    /// Open-ended full-time employment.
    FullTime,
    /// Part-time employment.
    PartTime,
    /// Fixed-term contract employment.
    Contract,
}

/// The four statutory social insurance flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsuranceFlags {
    /// 고용보험.
    #[serde(default)]
    pub employment_insurance: bool,
    /// 국민연금.
    #[serde(default)]
    pub national_pension: bool,
    /// 건강보험.
    #[serde(default)]
    pub health_insurance: bool,
    /// 산재보험.
    #[serde(default)]
    pub industrial_accident: bool,
}

/// One employee row of a wage ledger.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WageRecord {
    /// Employee name as printed.
    pub name: String,
    /// Resident registration number, possibly masked.
    #[serde(default)]
    pub resident_id: Option<String>,
    /// Hire date text.
    #[serde(default)]
    pub hire_date: Option<String>,
    /// Monthly gross wage.
    #[serde(default)]
    pub monthly_wage: Option<Decimal>,
    /// Contracted weekly hours.
    #[serde(default)]
    pub weekly_hours: Option<Decimal>,
    /// Work arrangement.
    #[serde(default)]
    pub work_type: Option<WorkType>,
    /// Whether the ledger lists the employee as currently employed.
    #[serde(default)]
    pub is_current_employee: Option<bool>,
    /// Termination date text, when the ledger marks a leaver.
    #[serde(default)]
    pub termination_date: Option<String>,
    /// Termination reason code or text.
    #[serde(default)]
    pub termination_reason: Option<String>,
}

/// A wage ledger for one pay period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WageLedger {
    /// Pay period label (e.g. "2026-01").
    #[serde(default)]
    pub period: Option<String>,
    /// Employee rows in document order.
    #[serde(default)]
    pub employees: Vec<WageRecord>,
    /// Printed wage total.
    #[serde(default)]
    pub total_wage: Option<Decimal>,
}

/// One employee row of an insurance roster.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsuranceRecord {
    /// Employee name as printed.
    pub name: String,
    /// Resident registration number, possibly masked.
    #[serde(default)]
    pub resident_id: Option<String>,
    /// The four insurance flags.
    #[serde(default)]
    pub insurance: InsuranceFlags,
    /// Enrollment (acquisition) date text.
    #[serde(default)]
    pub enrollment_date: Option<String>,
    /// Loss (disqualification) date text, when the employee left.
    #[serde(default)]
    pub loss_date: Option<String>,
    /// Loss reason code or text.
    #[serde(default)]
    pub loss_reason_code: Option<String>,
}

/// A four-insurance enrollment roster.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsuranceRoster {
    /// Employee rows in document order.
    #[serde(default)]
    pub employees: Vec<InsuranceRecord>,
}

/// A single employment contract.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmploymentContract {
    /// Employee name as printed.
    pub employee_name: String,
    /// Employer name as printed.
    #[serde(default)]
    pub employer_name: Option<String>,
    /// Resident registration number, possibly masked.
    #[serde(default)]
    pub resident_id: Option<String>,
    /// Age written on the contract, when no resident ID is available.
    #[serde(default)]
    pub age: Option<u32>,
    /// Contract start date text.
    #[serde(default)]
    pub contract_start_date: Option<String>,
    /// Contract end date text.
    #[serde(default)]
    pub contract_end_date: Option<String>,
    /// Agreed monthly salary.
    #[serde(default)]
    pub monthly_salary: Option<Decimal>,
    /// Agreed weekly hours.
    #[serde(default)]
    pub weekly_hours: Option<Decimal>,
    /// Work arrangement.
    #[serde(default)]
    pub work_type: Option<WorkType>,
    /// Insurance clauses ticked on the contract.
    #[serde(default)]
    pub insurance: Option<InsuranceFlags>,
}

/// Business registration certificate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BusinessRegistration {
    /// Registered business name.
    #[serde(default)]
    pub business_name: Option<String>,
    /// Business registration number.
    #[serde(default)]
    pub business_number: Option<String>,
    /// Representative name.
    #[serde(default)]
    pub representative: Option<String>,
    /// Business address; drives region classification.
    #[serde(default)]
    pub address: Option<String>,
}

/// Everything extracted from one customer's upload.
///
/// Any document may be missing; an entirely empty bundle is valid input and
/// yields an all-ineligible report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentBundle {
    /// Wage ledger, if supplied.
    #[serde(default)]
    pub wage_ledger: Option<WageLedger>,
    /// Insurance roster, if supplied.
    #[serde(default)]
    pub insurance_roster: Option<InsuranceRoster>,
    /// Employment contracts, if supplied.
    #[serde(default)]
    pub contracts: Option<Vec<EmploymentContract>>,
    /// Business registration, if supplied.
    #[serde(default)]
    pub business_registration: Option<BusinessRegistration>,
}

impl DocumentBundle {
    /// Returns true when no document at all was supplied.
    pub fn is_empty(&self) -> bool {
        self.wage_ledger.is_none()
            && self.insurance_roster.is_none()
            && self.contracts.is_none()
            && self.business_registration.is_none()
    }

    /// Wage ledger rows, or an empty slice.
    pub fn wage_records(&self) -> &[WageRecord] {
        self.wage_ledger
            .as_ref()
            .map(|l| l.employees.as_slice())
            .unwrap_or(&[])
    }

    /// Insurance roster rows, or an empty slice.
    pub fn insurance_records(&self) -> &[InsuranceRecord] {
        self.insurance_roster
            .as_ref()
            .map(|r| r.employees.as_slice())
            .unwrap_or(&[])
    }

    /// Contracts, or an empty slice.
    pub fn contract_records(&self) -> &[EmploymentContract] {
        self.contracts.as_deref().unwrap_or(&[])
    }
}
