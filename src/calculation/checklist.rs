//! Application checklist generation.

use crate::config::SubsidyConfig;
use crate::models::{ApplicationChecklistItem, SubsidyCalculation};

/// Builds filing guidance for each surviving claimable program.
///
/// Unverified requirements are appended to the configured notes so the
/// applicant knows what to prove before filing.
pub fn build_checklist(
    eligible: &[SubsidyCalculation],
    config: &SubsidyConfig,
) -> Vec<ApplicationChecklistItem> {
    eligible
        .iter()
        .filter(|c| c.status.is_claimable())
        .filter_map(|calc| {
            let metadata = config.programs().get(&calc.program)?;
            let checklist = &metadata.checklist;

            let mut notes = checklist.notes.clone();
            notes.extend(
                calc.requirements_unverified
                    .iter()
                    .map(|code| format!("Provide evidence for: {}", code)),
            );

            Some(ApplicationChecklistItem {
                program: calc.program,
                program_name: metadata.name.clone(),
                status: calc.status,
                required_documents: checklist.required_documents.clone(),
                application_venue: checklist.application_venue.clone(),
                application_window: checklist.application_window.clone(),
                contact: checklist.contact.clone(),
                notes,
            })
        })
        .collect()
}
