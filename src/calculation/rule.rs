//! Shared eligibility model for programs evaluated employee by employee.
//!
//! A program is described by an [`EmployeeRule`]: the requirements each
//! employee must meet, any program-wide requirements, the requirements no
//! document can prove, and the per-employee [`RateCard`]. The aggregate and
//! per-employee results are both derived from that description.

use rust_decimal::Decimal;

use crate::config::SubsidyConfig;
use crate::models::{
    AnalysisOptions, CalculationBreakdown, CanonicalEmployee, EligibilityStatus,
    EmployeeProgramResult, IneligibleProgram, Program, RegionClassification, RegionType,
    SubsidyCalculation,
};

use super::breakdown::{BreakdownBuilder, split_payments, yearly_quarter_payments};

/// Inputs shared by every program evaluation in one run.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    /// Loaded configuration.
    pub config: &'a SubsidyConfig,
    /// Business region.
    pub region: &'a RegionClassification,
    /// Caller options.
    pub options: &'a AnalysisOptions,
}

/// Outcome of one requirement for one employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Check {
    /// Satisfied.
    Met,
    /// Confirmed failed, with the reason.
    NotMet(String),
    /// Cannot be decided from the data, with the reason.
    Unknown(String),
}

/// A named requirement and its outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    /// Requirement code reported in met/unmet lists.
    pub code: &'static str,
    /// Outcome.
    pub check: Check,
}

impl Requirement {
    /// A satisfied requirement.
    pub fn met(code: &'static str) -> Self {
        Self {
            code,
            check: Check::Met,
        }
    }

    /// A failed requirement.
    pub fn not_met(code: &'static str, reason: impl Into<String>) -> Self {
        Self {
            code,
            check: Check::NotMet(reason.into()),
        }
    }

    /// An undecidable requirement.
    pub fn unknown(code: &'static str, reason: impl Into<String>) -> Self {
        Self {
            code,
            check: Check::Unknown(reason.into()),
        }
    }

    /// Met when `condition` holds, otherwise failed with `reason`.
    pub fn when(code: &'static str, condition: bool, reason: impl FnOnce() -> String) -> Self {
        if condition {
            Self::met(code)
        } else {
            Self::not_met(code, reason())
        }
    }

    /// True when satisfied.
    pub fn is_met(&self) -> bool {
        matches!(self.check, Check::Met)
    }

    /// True when confirmed failed.
    pub fn is_not_met(&self) -> bool {
        matches!(self.check, Check::NotMet(_))
    }

    /// True when undecidable.
    pub fn is_unknown(&self) -> bool {
        matches!(self.check, Check::Unknown(_))
    }

    fn reason(&self) -> Option<&str> {
        match &self.check {
            Check::Met => None,
            Check::NotMet(reason) | Check::Unknown(reason) => Some(reason),
        }
    }
}

/// Employee still employed.
pub fn current_employee(employee: &CanonicalEmployee) -> Requirement {
    Requirement::when("current_employee", employee.is_current_employee, || {
        "employment has ended".to_string()
    })
}

/// Employee enrolled in employment insurance.
pub fn employment_insurance(employee: &CanonicalEmployee) -> Requirement {
    Requirement::when(
        "employment_insurance",
        employee.has_employment_insurance,
        || "not enrolled in employment insurance".to_string(),
    )
}

/// Employee aged 15 to 34.
pub fn youth_age(employee: &CanonicalEmployee) -> Requirement {
    match employee.age {
        None => Requirement::unknown("youth_age", AGE_UNKNOWN),
        Some(age) => Requirement::when("youth_age", employee.is_youth, || {
            format!("age {} is outside 15-34", age)
        }),
    }
}

/// Employee aged 60 or older.
pub fn senior_age(employee: &CanonicalEmployee) -> Requirement {
    match employee.age {
        None => Requirement::unknown("senior_age", AGE_UNKNOWN),
        Some(age) => Requirement::when("senior_age", employee.is_senior, || {
            format!("age {} is under 60", age)
        }),
    }
}

const AGE_UNKNOWN: &str = "age could not be determined from the resident ID or contract";

/// Payment period of a rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatePeriod {
    /// Paid per month.
    Month,
    /// Paid per quarter.
    Quarter,
}

/// Amounts for one qualifying employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateCard {
    /// Amount per period.
    pub rate: Decimal,
    /// Number of periods.
    pub periods: u32,
    /// Length of a period.
    pub period: RatePeriod,
    /// One-off incentive, for programs that pay one.
    pub incentive: Option<Decimal>,
    /// Months after which the base is paid, in equal parts.
    pub base_payouts: &'static [u32],
    /// Months after which the incentive is paid, in equal parts.
    pub incentive_payouts: &'static [u32],
}

impl RateCard {
    /// Monthly equivalent of the rate.
    pub fn monthly_amount(&self) -> Decimal {
        match self.period {
            RatePeriod::Month => self.rate,
            RatePeriod::Quarter => self.rate / Decimal::from(3),
        }
    }

    /// Support duration in months.
    pub fn total_months(&self) -> u32 {
        match self.period {
            RatePeriod::Month => self.periods,
            RatePeriod::Quarter => self.periods * 3,
        }
    }

    /// Base amount for `count` employees.
    pub fn base(&self, count: u32) -> Decimal {
        self.rate * Decimal::from(self.periods) * Decimal::from(count)
    }

    /// Incentive amount for `count` employees.
    pub fn incentive_total(&self, count: u32) -> Decimal {
        self.incentive.unwrap_or(Decimal::ZERO) * Decimal::from(count)
    }

    /// Breakdown for `count` employees.
    pub fn breakdown(
        &self,
        count: u32,
        program: Program,
        region: Option<RegionType>,
    ) -> CalculationBreakdown {
        let (rate_label, unit) = match self.period {
            RatePeriod::Month => ("Monthly rate lookup", "months"),
            RatePeriod::Quarter => ("Quarterly rate lookup", "quarters"),
        };

        let mut builder = BreakdownBuilder::new();
        builder.step(
            rate_label,
            None,
            serde_json::json!({
                "program": program.code(),
                "region": region,
            }),
            self.rate,
        );
        builder.step(
            "Support duration lookup",
            None,
            serde_json::json!({ "unit": unit }),
            Decimal::from(self.periods),
        );
        let base = builder.step(
            "Base amount",
            Some("rate × periods × employees"),
            serde_json::json!({
                "rate": self.rate.normalize().to_string(),
                "periods": self.periods,
                "employees": count,
            }),
            self.base(count),
        );

        let incentive = match self.incentive {
            Some(per_employee) => builder.step(
                "Incentive",
                Some("incentive × employees"),
                serde_json::json!({
                    "incentive": per_employee.normalize().to_string(),
                    "employees": count,
                }),
                self.incentive_total(count),
            ),
            None => Decimal::ZERO,
        };

        let schedule = match self.period {
            RatePeriod::Month => {
                let mut schedule = split_payments(base, self.base_payouts);
                schedule.extend(split_payments(incentive, self.incentive_payouts));
                schedule
            }
            RatePeriod::Quarter => {
                yearly_quarter_payments(self.rate * Decimal::from(count), self.periods)
            }
        };

        builder.finish(base, incentive, schedule)
    }
}

/// Eligibility description of a program evaluated per employee.
pub trait EmployeeRule {
    /// The program.
    fn program(&self) -> Program;

    /// Codes returned by [`assess`](Self::assess), in order.
    fn requirement_codes(&self) -> &'static [&'static str];

    /// Per-employee requirements.
    fn assess(&self, employee: &CanonicalEmployee) -> Vec<Requirement>;

    /// Requirements that apply to the whole business.
    fn program_requirements(&self) -> Vec<Requirement> {
        Vec::new()
    }

    /// Requirements no supplied document can prove; these cap the result
    /// at NEEDS_REVIEW.
    fn unverified(&self) -> &'static [&'static str] {
        &[]
    }

    /// Amounts for one qualifying employee.
    fn rate_card(&self) -> RateCard;

    /// Notes attached to every result.
    fn notes(&self) -> Vec<String> {
        Vec::new()
    }
}

fn region_for(program: Program, ctx: &RuleContext<'_>) -> Option<RegionType> {
    ctx.config
        .is_region_sensitive(program)
        .then_some(ctx.region.region)
}

fn check_of<'r>(assessment: &'r [Requirement], code: &str) -> Option<&'r Requirement> {
    assessment.iter().find(|r| r.code == code)
}

/// Aggregates a rule over all employees.
///
/// Employees meeting every requirement are counted. When none do but some
/// fail nothing except an undecidable age, those are counted instead and
/// the result is NEEDS_REVIEW as an upper-bound estimate.
pub fn evaluate_rule<R: EmployeeRule + ?Sized>(
    rule: &R,
    employees: &[CanonicalEmployee],
    ctx: &RuleContext<'_>,
) -> SubsidyCalculation {
    let program = rule.program();
    let program_checks = rule.program_requirements();
    let assessments: Vec<Vec<Requirement>> = employees.iter().map(|e| rule.assess(e)).collect();

    let qualifying = assessments
        .iter()
        .filter(|a| a.iter().all(Requirement::is_met))
        .count() as u32;
    let plausible: Vec<&Vec<Requirement>> = assessments
        .iter()
        .filter(|a| !a.iter().any(Requirement::is_not_met) && a.iter().any(Requirement::is_unknown))
        .collect();
    let plausible_count = plausible.len() as u32;
    let blocked = program_checks.iter().any(Requirement::is_not_met);

    let (status, count) = if blocked {
        (EligibilityStatus::NotEligible, 0)
    } else if qualifying > 0 {
        if rule.unverified().is_empty() {
            (EligibilityStatus::Eligible, qualifying)
        } else {
            (EligibilityStatus::NeedsReview, qualifying)
        }
    } else if plausible_count > 0 {
        (EligibilityStatus::NeedsReview, plausible_count)
    } else {
        (EligibilityStatus::NotEligible, 0)
    };

    let mut requirements_met = Vec::new();
    let mut requirements_not_met = Vec::new();
    let mut requirements_unverified: Vec<String> =
        rule.unverified().iter().map(|c| c.to_string()).collect();
    let mut notes = rule.notes();

    for check in &program_checks {
        if check.is_met() {
            requirements_met.push(check.code.to_string());
        } else {
            requirements_not_met.push(check.code.to_string());
            if let Some(reason) = check.reason() {
                notes.push(reason.to_string());
            }
        }
    }

    let total = employees.len();
    for &code in rule.requirement_codes() {
        if status.is_claimable() && qualifying > 0 {
            requirements_met.push(code.to_string());
        } else if status.is_claimable() {
            let all_met = plausible
                .iter()
                .all(|a| check_of(a, code).is_some_and(Requirement::is_met));
            if all_met {
                requirements_met.push(code.to_string());
            } else {
                requirements_unverified.push(code.to_string());
            }
        } else if total == 0 {
            requirements_not_met.push(code.to_string());
        } else {
            let failed = assessments
                .iter()
                .filter(|a| check_of(a, code).is_some_and(Requirement::is_not_met))
                .count();
            let any_met = assessments
                .iter()
                .any(|a| check_of(a, code).is_some_and(Requirement::is_met));
            if failed > 0 {
                requirements_not_met.push(code.to_string());
                notes.push(format!(
                    "{} of {} employee(s) did not meet {}",
                    failed, total, code
                ));
            } else if any_met {
                requirements_met.push(code.to_string());
            } else {
                requirements_unverified.push(code.to_string());
            }
        }
    }

    if total == 0 {
        notes.push("No employees were found in the supplied documents".to_string());
    }
    if status.is_claimable() {
        if qualifying == 0 {
            notes.push(format!(
                "{} employee(s) have an undetermined age; the amount is an upper-bound estimate pending age confirmation",
                plausible_count
            ));
        } else if plausible_count > 0 {
            notes.push(format!(
                "{} employee(s) with an undetermined age are not included; confirm their ages to add them",
                plausible_count
            ));
        }
        if !rule.unverified().is_empty() {
            notes.push(format!(
                "Must be confirmed with supporting documents before filing: {}",
                rule.unverified().join(", ")
            ));
        }
    }

    let region = region_for(program, ctx);
    let card = rule.rate_card();
    let claimable = status.is_claimable();
    let breakdown = claimable.then(|| card.breakdown(count, program, region));

    SubsidyCalculation {
        program,
        program_name: ctx.config.program_name(program),
        status,
        qualifying_count: count,
        monthly_amount: card.monthly_amount() * Decimal::from(count),
        total_months: if claimable { card.total_months() } else { 0 },
        total_amount: breakdown
            .as_ref()
            .map(|b| b.total_amount)
            .unwrap_or(Decimal::ZERO),
        requirements_met,
        requirements_not_met,
        requirements_unverified,
        notes,
        region,
        incentive_amount: card
            .incentive
            .filter(|_| claimable)
            .map(|_| card.incentive_total(count)),
        quarterly_amount: (claimable && card.period == RatePeriod::Quarter)
            .then(|| card.rate * Decimal::from(count)),
        breakdown,
    }
}

/// A program's outcome for one employee.
#[derive(Debug, Clone, PartialEq)]
pub enum EmployeeOutcome {
    /// ELIGIBLE or NEEDS_REVIEW, with the employee's amount.
    Claimable(EmployeeProgramResult),
    /// At least one requirement failed.
    Ineligible(IneligibleProgram),
}

/// Evaluates a rule for a single employee.
pub fn assess_employee<R: EmployeeRule + ?Sized>(
    rule: &R,
    employee: &CanonicalEmployee,
    ctx: &RuleContext<'_>,
) -> EmployeeOutcome {
    let program = rule.program();
    let program_name = ctx.config.program_name(program);
    let mut requirements = rule.assess(employee);
    requirements.extend(rule.program_requirements());

    let failed: Vec<&Requirement> = requirements.iter().filter(|r| r.is_not_met()).collect();
    if !failed.is_empty() {
        return EmployeeOutcome::Ineligible(IneligibleProgram {
            program,
            program_name,
            reasons: failed
                .iter()
                .filter_map(|r| r.reason())
                .map(str::to_string)
                .collect(),
            missing_requirements: failed.iter().map(|r| r.code.to_string()).collect(),
        });
    }

    let status = if requirements.iter().any(Requirement::is_unknown) || !rule.unverified().is_empty()
    {
        EligibilityStatus::NeedsReview
    } else {
        EligibilityStatus::Eligible
    };
    let breakdown = rule
        .rate_card()
        .breakdown(1, program, region_for(program, ctx));

    EmployeeOutcome::Claimable(EmployeeProgramResult {
        program,
        program_name,
        status,
        amount: breakdown.total_amount,
        breakdown,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(period: RatePeriod, incentive: Option<i64>) -> RateCard {
        RateCard {
            rate: Decimal::from(600_000),
            periods: 12,
            period,
            incentive: incentive.map(Decimal::from),
            base_payouts: &[6, 12],
            incentive_payouts: &[18, 24],
        }
    }

    #[test]
    fn test_monthly_card_breakdown() {
        let breakdown = card(RatePeriod::Month, Some(4_800_000)).breakdown(
            2,
            Program::YouthJobLeap,
            Some(RegionType::NonCapital),
        );
        assert_eq!(breakdown.base_amount, Decimal::from(14_400_000));
        assert_eq!(breakdown.incentive_amount, Decimal::from(9_600_000));
        assert_eq!(breakdown.total_amount, Decimal::from(24_000_000));
        assert!(breakdown.is_consistent());

        let descriptions: Vec<&str> = breakdown
            .steps
            .iter()
            .map(|s| s.description.as_str())
            .collect();
        assert_eq!(
            descriptions,
            vec![
                "Monthly rate lookup",
                "Support duration lookup",
                "Base amount",
                "Incentive",
                "Final total"
            ]
        );

        let timings: Vec<&str> = breakdown
            .payment_schedule
            .iter()
            .map(|m| m.timing.as_str())
            .collect();
        assert_eq!(
            timings,
            vec![
                "after 6 months retained",
                "after 12 months retained",
                "after 18 months retained",
                "after 24 months retained"
            ]
        );
    }

    #[test]
    fn test_quarterly_card() {
        let quarterly = RateCard {
            rate: Decimal::from(900_000),
            periods: 12,
            period: RatePeriod::Quarter,
            incentive: None,
            base_payouts: &[],
            incentive_payouts: &[],
        };
        assert_eq!(quarterly.monthly_amount(), Decimal::from(300_000));
        assert_eq!(quarterly.total_months(), 36);

        let breakdown = quarterly.breakdown(1, Program::SeniorContinuedEmployment, None);
        assert_eq!(breakdown.total_amount, Decimal::from(10_800_000));
        assert_eq!(breakdown.steps.len(), 4);
        assert_eq!(breakdown.payment_schedule.len(), 3);
        let scheduled: Decimal = breakdown.payment_schedule.iter().map(|m| m.amount).sum();
        assert_eq!(scheduled, breakdown.total_amount);
    }

    #[test]
    fn test_requirement_when() {
        assert!(Requirement::when("x", true, || unreachable!()).is_met());
        let failed = Requirement::when("x", false, || "why".to_string());
        assert!(failed.is_not_met());
        assert_eq!(failed.reason(), Some("why"));
    }
}
