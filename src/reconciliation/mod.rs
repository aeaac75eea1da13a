//! Cross-document employee reconciliation.
//!
//! The same person appears in the wage ledger, the insurance roster and the
//! employment contracts under slightly different spellings. This module
//! resolves those rows to one [`CanonicalEmployee`](crate::models::CanonicalEmployee)
//! per normalized name.
//!
//! - [`resident_id`] parses and compares masked resident registration numbers
//! - [`identity`] matches wage ledger rows to contracts
//! - [`merger`] fills canonical fields by source priority

pub mod identity;
pub mod merger;
pub mod resident_id;

pub use identity::{
    Disambiguation, EmployeeMatch, IdentityMatchReport, NameMatchKind,
    match_employee_across_documents, match_wage_ledger_to_contracts, names_match, normalize_name,
};
pub use merger::merge_employee_data;
pub use resident_id::{ResidentId, age_from_resident_id, resident_ids_match};
