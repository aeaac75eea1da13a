//! Core data models for the subsidy engine.
//!
//! This module contains the document inputs, the reconciled employee record,
//! and every result structure the engine produces.

mod calculation_result;
mod date;
mod document;
mod employee;
mod program;
mod report;
mod warning;

pub use calculation_result::{
    ApplicationChecklistItem, BreakdownStep, CalculationBreakdown, EmployeeProgramResult,
    ExcludedSubsidy, IneligibleProgram, PaymentMilestone, PerEmployeeCalculation,
    SubsidyCalculation,
};
pub use date::{completed_months, completed_years, parse_document_date};
pub use document::{
    BusinessRegistration, DocumentBundle, DocumentType, EmploymentContract, InsuranceFlags,
    InsuranceRecord, InsuranceRoster, WageLedger, WageRecord, WorkType,
};
pub use employee::{CanonicalEmployee, TerminationInfo};
pub use program::{
    AnalysisOptions, EligibilityStatus, LeaveType, ParentalLeaveInfo, Program, RegionType,
    YouthType,
};
pub use report::{EmployeeSummary, MatchStatistics, RegionClassification, SubsidyReport};
pub use warning::{CrossValidationResult, Severity, ValidationWarning};
