//! Duplicate-exclusion resolution.
//!
//! Rules are applied in configuration order over one working set; a program
//! dropped by an earlier rule is absent for later ones.

use tracing::debug;

use crate::config::ExclusionRule;
use crate::models::{ExcludedSubsidy, Program, SubsidyCalculation};

/// Returns the exclusions that fire for the given set of programs.
///
/// # Examples
///
/// ```
/// use subsidy_engine::calculation::excluded_programs;
/// use subsidy_engine::config::ExclusionRule;
/// use subsidy_engine::models::Program;
///
/// let rules = vec![ExclusionRule {
///     programs: [Program::YouthJobLeap, Program::EmploymentPromotion],
///     winner: Program::YouthJobLeap,
///     reason: "no double claims".to_string(),
/// }];
/// let excluded = excluded_programs(
///     &[Program::YouthJobLeap, Program::EmploymentPromotion],
///     &rules,
/// );
/// assert_eq!(excluded.len(), 1);
/// assert_eq!(excluded[0].program, Program::EmploymentPromotion);
/// assert_eq!(excluded[0].excluded_by, Program::YouthJobLeap);
/// ```
pub fn excluded_programs(present: &[Program], rules: &[ExclusionRule]) -> Vec<ExcludedSubsidy> {
    let mut working: Vec<Program> = present.to_vec();
    let mut excluded = Vec::new();

    for rule in rules {
        let [a, b] = rule.programs;
        if !(working.contains(&a) && working.contains(&b)) {
            continue;
        }
        let loser = rule.loser();
        working.retain(|p| *p != loser);
        debug!(program = %loser, excluded_by = %rule.winner, "Duplicate exclusion applied");
        excluded.push(ExcludedSubsidy {
            program: loser,
            reason: rule.reason.clone(),
            excluded_by: rule.winner,
        });
    }

    excluded
}

/// Splits program results into surviving claimable results and exclusions.
///
/// NOT_ELIGIBLE results never take part and never appear in the output.
pub fn resolve_exclusions(
    calculations: &[SubsidyCalculation],
    rules: &[ExclusionRule],
) -> (Vec<SubsidyCalculation>, Vec<ExcludedSubsidy>) {
    let claimable: Vec<&SubsidyCalculation> = calculations
        .iter()
        .filter(|c| c.status.is_claimable())
        .collect();
    let present: Vec<Program> = claimable.iter().map(|c| c.program).collect();
    let excluded = excluded_programs(&present, rules);

    let eligible = claimable
        .into_iter()
        .filter(|c| !excluded.iter().any(|e| e.program == c.program))
        .cloned()
        .collect();

    (eligible, excluded)
}
