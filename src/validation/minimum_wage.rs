//! Statutory minimum wage compliance.

use rust_decimal::Decimal;

use crate::config::MinimumWageConfig;
use crate::models::{DocumentType, Severity, ValidationWarning};

/// A pay figure to check, taken from either the wage ledger or a contract.
#[derive(Debug, Clone, Copy)]
pub struct PayFigure<'a> {
    /// Employee name as written.
    pub name: &'a str,
    /// Monthly pay.
    pub monthly_pay: Decimal,
    /// Weekly hours, if recorded.
    pub weekly_hours: Option<Decimal>,
    /// Where the figure came from.
    pub source: DocumentType,
}

/// Flags pay below the statutory minimum.
///
/// Full-time work (at least `full_time_weekly_hours`) must meet the monthly
/// minimum. Part-time
/// work from `part_time_min_weekly_hours` upward must meet
/// `part_time_tolerance` of the monthly minimum prorated by
/// `weekly_hours / reference_weekly_hours`. Shorter weeks, and figures with
/// no recorded hours, are not checked.
///
/// # Examples
///
/// ```
/// use subsidy_engine::config::ConfigLoader;
/// use subsidy_engine::models::{DocumentType, Severity};
/// use subsidy_engine::validation::{PayFigure, check_minimum_wage};
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::embedded().unwrap();
/// let figure = PayFigure {
///     name: "김민준",
///     monthly_pay: Decimal::from(2_000_000),
///     weekly_hours: Some(Decimal::from(40)),
///     source: DocumentType::WageLedger,
/// };
///
/// let warnings = check_minimum_wage(&[figure], &loader.config().policy().minimum_wage);
/// assert_eq!(warnings[0].severity, Severity::High);
/// ```
pub fn check_minimum_wage(
    figures: &[PayFigure<'_>],
    minimum: &MinimumWageConfig,
) -> Vec<ValidationWarning> {
    figures
        .iter()
        .filter_map(|figure| check_one(figure, minimum))
        .collect()
}

fn check_one(figure: &PayFigure<'_>, minimum: &MinimumWageConfig) -> Option<ValidationWarning> {
    let hours = figure.weekly_hours?;

    let (required, label) = if hours >= minimum.full_time_weekly_hours {
        (minimum.monthly, "full-time monthly minimum")
    } else if hours >= minimum.part_time_min_weekly_hours {
        let prorated = minimum.monthly * hours / minimum.reference_weekly_hours;
        (
            (prorated * minimum.part_time_tolerance).round_dp(0),
            "prorated part-time minimum",
        )
    } else {
        return None;
    };

    if figure.monthly_pay >= required {
        return None;
    }

    Some(ValidationWarning {
        field: "monthly_wage".to_string(),
        source: figure.source,
        severity: Severity::High,
        message: format!(
            "{}: monthly pay {} at {} weekly hours is below the {} of {}",
            figure.name,
            figure.monthly_pay.normalize(),
            hours.normalize(),
            label,
            required.normalize()
        ),
        suggested_action:
            "Check for a minimum wage violation; subsidies may be refused for underpaid staff"
                .to_string(),
        employee_name: Some(figure.name.to_string()),
    })
}
