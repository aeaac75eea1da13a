//! Aggregate data-quality confidence.

use crate::config::SeverityPenalties;
use crate::models::{Severity, ValidationWarning};

/// Starts at 100 and subtracts the configured penalty for every warning,
/// stopping at 0.
pub fn confidence_score(warnings: &[ValidationWarning], penalties: &SeverityPenalties) -> u32 {
    let deducted: u32 = warnings
        .iter()
        .map(|w| match w.severity {
            Severity::High => penalties.high,
            Severity::Medium => penalties.medium,
            Severity::Low => penalties.low,
        })
        .fold(0u32, u32::saturating_add);
    100u32.saturating_sub(deducted)
}
