//! Cross-document validation warnings.

use serde::{Deserialize, Serialize};

use super::document::DocumentType;

/// How much a warning should worry the reviewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    /// Probably benign.
    Low,
    /// Worth checking before filing.
    Medium,
    /// Likely to block or claw back a subsidy.
    High,
}

/// A single inconsistency found between documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationWarning {
    /// The field the warning is about (e.g. "monthly_wage").
    pub field: String,
    /// The document the suspicious value came from.
    pub source: DocumentType,
    /// Severity level.
    pub severity: Severity,
    /// Human-readable description.
    pub message: String,
    /// What the reviewer should do about it.
    pub suggested_action: String,
    /// Employee the warning concerns, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_name: Option<String>,
}

/// Output of the cross-validator: advisory only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossValidationResult {
    /// Warnings in check order.
    pub warnings: Vec<ValidationWarning>,
    /// Data-quality confidence, 0 to 100.
    pub confidence: u32,
}
