//! Parental Employment Stability (육아휴직 등 고용안정장려금).
//!
//! Evaluated once per business for the leave described in the request.
//! Parental leave for a child of at most 12 months, taken for at least 3
//! consecutive months, is paid at the special rate (1,000,000 for the first
//! 3 months, 300,000 for the remaining 9). Every other parental leave is
//! paid at the flat standard rate; maternity and reduced-hours leave have
//! their own flat rates.

use rust_decimal::Decimal;

use crate::config::{FlatRate, ParentalRates};
use crate::models::{
    CalculationBreakdown, CanonicalEmployee, EligibilityStatus, LeaveType, ParentalLeaveInfo,
    PaymentMilestone, Program, SubsidyCalculation,
};
use crate::reconciliation::names_match;

use super::breakdown::BreakdownBuilder;
use super::rule::RuleContext;

/// Amount for one leave, with the explanation of the rate branch chosen.
#[derive(Debug, Clone, PartialEq)]
pub struct ParentalLeaveAmount {
    /// Rate of the first (or only) band.
    pub monthly_amount: Decimal,
    /// Total months paid.
    pub total_months: u32,
    /// Calculation trail.
    pub breakdown: CalculationBreakdown,
    /// Which branch fired and why.
    pub note: String,
}

/// Business-level result plus the employee the leave belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct ParentalLeaveResult {
    /// Aggregate result.
    pub calculation: SubsidyCalculation,
    /// Index of the named employee among the canonical employees.
    pub employee_index: Option<usize>,
}

/// Computes the amount for a leave record; `None` estimates the standard
/// parental-leave rate.
///
/// # Examples
///
/// ```
/// use subsidy_engine::calculation::parental_leave_amount;
/// use subsidy_engine::config::ConfigLoader;
/// use subsidy_engine::models::{LeaveType, ParentalLeaveInfo};
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::embedded().unwrap();
/// let rates = &loader.config().rates().parental_employment_stability;
///
/// let leave = ParentalLeaveInfo {
///     leave_type: LeaveType::ParentalLeave,
///     employee_name: None,
///     child_age_months: Some(6),
///     consecutive_leave_months: Some(6),
/// };
/// let amount = parental_leave_amount(Some(&leave), rates);
/// assert_eq!(amount.breakdown.total_amount, Decimal::from(5_700_000));
/// ```
pub fn parental_leave_amount(
    leave: Option<&ParentalLeaveInfo>,
    rates: &ParentalRates,
) -> ParentalLeaveAmount {
    let Some(leave) = leave else {
        return flat(
            &rates.standard,
            "standard",
            "Leave details were not supplied; estimated at the standard parental leave rate"
                .to_string(),
        );
    };

    match leave.leave_type {
        LeaveType::MaternityLeave => flat(
            &rates.maternity,
            "maternity",
            "Maternity leave: flat maternity rate".to_string(),
        ),
        LeaveType::ReducedHours => flat(
            &rates.reduced_hours,
            "reduced_hours",
            "Reduced working hours during childcare: flat reduced-hours rate".to_string(),
        ),
        LeaveType::ParentalLeave => {
            let special = &rates.special;
            let blocker = match (leave.child_age_months, leave.consecutive_leave_months) {
                (None, _) => Some("child age unknown".to_string()),
                (Some(age), _) if age > special.max_child_age_months => Some(format!(
                    "child age {} months exceeds {} months",
                    age, special.max_child_age_months
                )),
                (_, None) => Some("consecutive leave length unknown".to_string()),
                (_, Some(months)) if months < special.min_consecutive_leave_months => {
                    Some(format!(
                        "consecutive leave of {} months is shorter than {} months",
                        months, special.min_consecutive_leave_months
                    ))
                }
                _ => None,
            };
            match blocker {
                Some(why) => flat(
                    &rates.standard,
                    "standard",
                    format!("Standard parental leave rate applied: {}", why),
                ),
                None => special_rate(rates, leave),
            }
        }
    }
}

fn flat(rate: &FlatRate, branch: &str, note: String) -> ParentalLeaveAmount {
    let mut builder = BreakdownBuilder::new();
    builder.step(
        "Monthly rate lookup",
        None,
        serde_json::json!({ "branch": branch }),
        rate.monthly_amount,
    );
    builder.step(
        "Support duration lookup",
        None,
        serde_json::json!({ "unit": "months" }),
        Decimal::from(rate.months),
    );
    let base = builder.step(
        "Base amount",
        Some("rate × months"),
        serde_json::json!({
            "rate": rate.monthly_amount.normalize().to_string(),
            "months": rate.months,
        }),
        rate.monthly_amount * Decimal::from(rate.months),
    );
    let schedule = vec![PaymentMilestone {
        timing: format!("months 1-{}", rate.months),
        amount: base,
    }];

    ParentalLeaveAmount {
        monthly_amount: rate.monthly_amount,
        total_months: rate.months,
        breakdown: builder.finish(base, Decimal::ZERO, schedule),
        note,
    }
}

fn special_rate(rates: &ParentalRates, leave: &ParentalLeaveInfo) -> ParentalLeaveAmount {
    let special = &rates.special;
    let first_end = special.first_months;
    let total_months = special.first_months + special.remaining_months;

    let mut builder = BreakdownBuilder::new();
    builder.step(
        "Special rate lookup",
        None,
        serde_json::json!({
            "branch": "special",
            "child_age_months": leave.child_age_months,
            "consecutive_leave_months": leave.consecutive_leave_months,
        }),
        special.first_monthly_amount,
    );
    builder.step(
        "Support duration lookup",
        None,
        serde_json::json!({ "unit": "months" }),
        Decimal::from(total_months),
    );
    let first = builder.step(
        format!("First band (months 1-{})", first_end),
        Some("first_rate × first_months"),
        serde_json::json!({
            "rate": special.first_monthly_amount.normalize().to_string(),
            "months": special.first_months,
        }),
        special.first_monthly_amount * Decimal::from(special.first_months),
    );
    let remaining = builder.step(
        format!("Remaining band (months {}-{})", first_end + 1, total_months),
        Some("remaining_rate × remaining_months"),
        serde_json::json!({
            "rate": special.remaining_monthly_amount.normalize().to_string(),
            "months": special.remaining_months,
        }),
        special.remaining_monthly_amount * Decimal::from(special.remaining_months),
    );
    let base = first + remaining;
    let schedule = vec![
        PaymentMilestone {
            timing: format!("months 1-{}", first_end),
            amount: first,
        },
        PaymentMilestone {
            timing: format!("months {}-{}", first_end + 1, total_months),
            amount: remaining,
        },
    ];

    ParentalLeaveAmount {
        monthly_amount: special.first_monthly_amount,
        total_months,
        breakdown: builder.finish(base, Decimal::ZERO, schedule),
        note: format!(
            "Special parental leave rate applied: child aged {} months or less with {} or more consecutive months of leave",
            special.max_child_age_months, special.min_consecutive_leave_months
        ),
    }
}

/// Evaluates Parental Employment Stability for the business.
///
/// An employment contract must be on file, for the named employee when the
/// leave record names one. Without a leave record the result is
/// NEEDS_REVIEW at the standard estimate.
pub fn calculate_parental_leave(
    employees: &[CanonicalEmployee],
    ctx: &RuleContext<'_>,
) -> ParentalLeaveResult {
    let program = Program::ParentalEmploymentStability;
    let leave = ctx.options.parental_leave.as_ref();
    let mut notes = Vec::new();

    let named = leave.and_then(|l| l.employee_name.as_deref());
    let employee_index = named.and_then(|name| {
        employees
            .iter()
            .position(|e| names_match(&e.name, name))
    });
    if let (Some(name), None) = (named, employee_index) {
        notes.push(format!("{} was not found in the supplied documents", name));
    }

    let has_contract = match (named, employee_index) {
        (_, Some(index)) => employees[index].has_contract(),
        (Some(_), None) => false,
        (None, None) => employees.iter().any(CanonicalEmployee::has_contract),
    };

    let mut calculation = SubsidyCalculation {
        program,
        program_name: ctx.config.program_name(program),
        status: EligibilityStatus::NotEligible,
        qualifying_count: 0,
        monthly_amount: Decimal::ZERO,
        total_months: 0,
        total_amount: Decimal::ZERO,
        requirements_met: Vec::new(),
        requirements_not_met: Vec::new(),
        requirements_unverified: Vec::new(),
        notes,
        region: None,
        incentive_amount: None,
        quarterly_amount: None,
        breakdown: None,
    };

    if !has_contract {
        calculation
            .requirements_not_met
            .push("employment_contract".to_string());
        calculation
            .notes
            .push("No employment contract on file for the employee on leave".to_string());
        return ParentalLeaveResult {
            calculation,
            employee_index,
        };
    }
    calculation
        .requirements_met
        .push("employment_contract".to_string());

    let amount = parental_leave_amount(leave, &ctx.config.rates().parental_employment_stability);
    if leave.is_some() {
        calculation.status = EligibilityStatus::Eligible;
        calculation
            .requirements_met
            .push("parental_leave_record".to_string());
    } else {
        calculation.status = EligibilityStatus::NeedsReview;
        calculation
            .requirements_unverified
            .push("parental_leave_record".to_string());
    }
    calculation.notes.push(amount.note);
    calculation.qualifying_count = 1;
    calculation.monthly_amount = amount.monthly_amount;
    calculation.total_months = amount.total_months;
    calculation.total_amount = amount.breakdown.total_amount;
    calculation.breakdown = Some(amount.breakdown);

    ParentalLeaveResult {
        calculation,
        employee_index,
    }
}
