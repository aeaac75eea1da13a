//! Configuration types for subsidy evaluation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::BTreeMap;

use crate::models::{Program, RegionType};

/// Metadata about the rule set.
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyMetadata {
    /// Rule-set code.
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// Version or effective date.
    pub version: String,
    /// Subsidy year the constants apply to.
    pub effective_year: i32,
}

/// Statutory minimum wage and the hour bands used to apply it.
#[derive(Debug, Clone, Deserialize)]
pub struct MinimumWageConfig {
    /// Hourly minimum wage.
    pub hourly: Decimal,
    /// Monthly minimum wage for a full-time (209h) month.
    pub monthly: Decimal,
    /// Weekly hours at or above which an employee counts as full-time.
    pub full_time_weekly_hours: Decimal,
    /// Lowest weekly hours of the part-time band.
    pub part_time_min_weekly_hours: Decimal,
    /// Weekly hours the monthly minimum corresponds to.
    pub reference_weekly_hours: Decimal,
    /// Fraction of the prorated minimum a part-timer must reach.
    pub part_time_tolerance: Decimal,
}

/// Address keywords for region classification.
#[derive(Debug, Clone, Deserialize)]
pub struct RegionKeywords {
    /// Keywords that place an address in the capital area.
    pub capital: Vec<String>,
    /// Keywords that place an address outside the capital area.
    pub non_capital: Vec<String>,
}

/// Insurance-loss reasons treated as involuntary termination.
#[derive(Debug, Clone, Deserialize)]
pub struct InvoluntaryTerminationConfig {
    /// Loss reason code to description.
    pub codes: BTreeMap<String, String>,
    /// Free-text markers of involuntary termination.
    pub keywords: Vec<String>,
}

/// Confidence penalty per warning severity.
#[derive(Debug, Clone, Deserialize)]
pub struct SeverityPenalties {
    /// Penalty for a HIGH warning.
    pub high: u32,
    /// Penalty for a MEDIUM warning.
    pub medium: u32,
    /// Penalty for a LOW warning.
    pub low: u32,
}

/// Thresholds for the cross-validator.
#[derive(Debug, Clone, Deserialize)]
pub struct CrossValidationConfig {
    /// Relative salary difference above which a MEDIUM warning is raised.
    pub salary_medium_ratio: Decimal,
    /// Relative salary difference above which a HIGH warning is raised.
    pub salary_high_ratio: Decimal,
    /// Absolute weekly-hours difference above which a MEDIUM warning is raised.
    pub hours_medium_difference: Decimal,
    /// Day difference above which a MEDIUM date warning is raised.
    pub date_medium_days: i64,
    /// Day difference above which a HIGH date warning is raised.
    pub date_high_days: i64,
    /// Confidence penalties.
    pub penalties: SeverityPenalties,
}

/// Contents of policy.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyConfig {
    /// Rule-set metadata.
    pub metadata: PolicyMetadata,
    /// Minimum wage.
    pub minimum_wage: MinimumWageConfig,
    /// Region keywords.
    pub region: RegionKeywords,
    /// Involuntary termination reasons.
    pub involuntary_termination: InvoluntaryTerminationConfig,
    /// Cross-validation thresholds.
    pub cross_validation: CrossValidationConfig,
}

/// A flat monthly rate paid for a number of months.
#[derive(Debug, Clone, Deserialize)]
pub struct FlatRate {
    /// Amount per month.
    pub monthly_amount: Decimal,
    /// Months paid.
    pub months: u32,
}

/// Youth Job Leap incentive amounts by sub-type.
#[derive(Debug, Clone, Deserialize)]
pub struct YouthIncentiveRates {
    /// General youth.
    pub general: Decimal,
    /// Youth with employment difficulty.
    pub employment_difficulty: Decimal,
}

/// Youth Job Leap rates.
#[derive(Debug, Clone, Deserialize)]
pub struct YouthJobLeapRates {
    /// Amount per month.
    pub monthly_amount: Decimal,
    /// Months paid.
    pub months: u32,
    /// Non-capital incentive per employee.
    pub incentive: YouthIncentiveRates,
}

/// Employment Promotion rates.
#[derive(Debug, Clone, Deserialize)]
pub struct EmploymentPromotionRates {
    /// Amount per month.
    pub monthly_amount: Decimal,
    /// Months paid.
    pub months: u32,
    /// Lowest monthly wage that qualifies.
    pub minimum_monthly_wage: Decimal,
}

/// Regular Conversion rates.
#[derive(Debug, Clone, Deserialize)]
pub struct RegularConversionRates {
    /// Amount per month.
    pub monthly_amount: Decimal,
    /// Months paid.
    pub months: u32,
    /// Months of service required before conversion.
    pub minimum_tenure_months: u32,
}

/// An amount that differs between capital and non-capital areas.
#[derive(Debug, Clone, Deserialize)]
pub struct RegionalAmount {
    /// Capital-area amount.
    pub capital: Decimal,
    /// Non-capital amount.
    pub non_capital: Decimal,
}

impl RegionalAmount {
    /// Returns the amount for `region`.
    pub fn for_region(&self, region: RegionType) -> Decimal {
        match region {
            RegionType::Capital => self.capital,
            RegionType::NonCapital => self.non_capital,
        }
    }
}

/// Senior Continued Employment rates.
#[derive(Debug, Clone, Deserialize)]
pub struct SeniorContinuedRates {
    /// Amount per quarter by region.
    pub quarterly_amount: RegionalAmount,
    /// Quarters paid.
    pub quarters: u32,
}

/// Senior Employment Support rates.
#[derive(Debug, Clone, Deserialize)]
pub struct SeniorSupportRates {
    /// Amount per quarter.
    pub quarterly_amount: Decimal,
    /// Quarters paid.
    pub quarters: u32,
}

/// The early-childhood parental leave special rate.
#[derive(Debug, Clone, Deserialize)]
pub struct SpecialParentalRate {
    /// Oldest child age (months) that still qualifies.
    pub max_child_age_months: u32,
    /// Shortest continuous leave (months) that qualifies.
    pub min_consecutive_leave_months: u32,
    /// Monthly amount for the first band.
    pub first_monthly_amount: Decimal,
    /// Months in the first band.
    pub first_months: u32,
    /// Monthly amount for the remaining band.
    pub remaining_monthly_amount: Decimal,
    /// Months in the remaining band.
    pub remaining_months: u32,
}

/// Parental Employment Stability rates.
#[derive(Debug, Clone, Deserialize)]
pub struct ParentalRates {
    /// Special rate for leave taken while the child is an infant.
    pub special: SpecialParentalRate,
    /// Standard parental leave rate.
    pub standard: FlatRate,
    /// Maternity leave rate.
    pub maternity: FlatRate,
    /// Reduced working hours rate.
    pub reduced_hours: FlatRate,
}

/// Contents of rates.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct RatesConfig {
    /// Youth Job Leap.
    pub youth_job_leap: YouthJobLeapRates,
    /// Employment Promotion.
    pub employment_promotion: EmploymentPromotionRates,
    /// Regular Conversion.
    pub regular_conversion: RegularConversionRates,
    /// Senior Continued Employment.
    pub senior_continued_employment: SeniorContinuedRates,
    /// Senior Employment Support.
    pub senior_employment_support: SeniorSupportRates,
    /// Parental Employment Stability.
    pub parental_employment_stability: ParentalRates,
}

/// Filing guidance for one program.
#[derive(Debug, Clone, Deserialize)]
pub struct ChecklistMetadata {
    /// Documents to prepare.
    pub required_documents: Vec<String>,
    /// Where to apply.
    pub application_venue: String,
    /// When to apply.
    pub application_window: String,
    /// Who to contact.
    pub contact: String,
    /// Extra remarks.
    #[serde(default)]
    pub notes: Vec<String>,
}

/// Static description of one program.
#[derive(Debug, Clone, Deserialize)]
pub struct ProgramMetadata {
    /// Display name.
    pub name: String,
    /// Whether the region changes the outcome or amount.
    pub region_sensitive: bool,
    /// Filing guidance.
    pub checklist: ChecklistMetadata,
}

/// Contents of programs.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct ProgramsConfig {
    /// Metadata by program.
    pub programs: BTreeMap<Program, ProgramMetadata>,
}

/// A pair of programs that cannot both be claimed for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExclusionRule {
    /// The two mutually exclusive programs.
    pub programs: [Program; 2],
    /// The program that is kept when both apply.
    pub winner: Program,
    /// Explanation recorded on the exclusion.
    pub reason: String,
}

impl ExclusionRule {
    /// The program dropped when both apply.
    pub fn loser(&self) -> Program {
        if self.programs[0] == self.winner {
            self.programs[1]
        } else {
            self.programs[0]
        }
    }

    /// Returns true when `program` is one of the rule's pair.
    pub fn involves(&self, program: Program) -> bool {
        self.programs.contains(&program)
    }
}

/// Contents of exclusions.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct ExclusionsConfig {
    /// Rules in application order.
    pub rules: Vec<ExclusionRule>,
}

/// The complete, immutable subsidy configuration.
#[derive(Debug, Clone)]
pub struct SubsidyConfig {
    policy: PolicyConfig,
    rates: RatesConfig,
    programs: BTreeMap<Program, ProgramMetadata>,
    exclusions: Vec<ExclusionRule>,
}

impl SubsidyConfig {
    /// Creates a new SubsidyConfig from its component parts.
    pub fn new(
        policy: PolicyConfig,
        rates: RatesConfig,
        programs: BTreeMap<Program, ProgramMetadata>,
        exclusions: Vec<ExclusionRule>,
    ) -> Self {
        Self {
            policy,
            rates,
            programs,
            exclusions,
        }
    }

    /// Returns the policy constants.
    pub fn policy(&self) -> &PolicyConfig {
        &self.policy
    }

    /// Returns the program rates.
    pub fn rates(&self) -> &RatesConfig {
        &self.rates
    }

    /// Returns all program metadata.
    pub fn programs(&self) -> &BTreeMap<Program, ProgramMetadata> {
        &self.programs
    }

    /// Returns the exclusion rules in application order.
    pub fn exclusions(&self) -> &[ExclusionRule] {
        &self.exclusions
    }

    /// Display name of a program, falling back to its code.
    pub fn program_name(&self, program: Program) -> String {
        self.programs
            .get(&program)
            .map(|m| m.name.clone())
            .unwrap_or_else(|| program.code().to_string())
    }

    /// Whether the region affects a program.
    pub fn is_region_sensitive(&self, program: Program) -> bool {
        self.programs
            .get(&program)
            .is_some_and(|m| m.region_sensitive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule() -> ExclusionRule {
        ExclusionRule {
            programs: [Program::YouthJobLeap, Program::EmploymentPromotion],
            winner: Program::YouthJobLeap,
            reason: "duplicate".to_string(),
        }
    }

    #[test]
    fn test_exclusion_rule_loser() {
        assert_eq!(rule().loser(), Program::EmploymentPromotion);

        let reversed = ExclusionRule {
            winner: Program::EmploymentPromotion,
            ..rule()
        };
        assert_eq!(reversed.loser(), Program::YouthJobLeap);
    }

    #[test]
    fn test_exclusion_rule_involves() {
        assert!(rule().involves(Program::EmploymentPromotion));
        assert!(!rule().involves(Program::SeniorEmploymentSupport));
    }

    #[test]
    fn test_regional_amount_lookup() {
        let amount = RegionalAmount {
            capital: Decimal::from(900_000),
            non_capital: Decimal::from(1_200_000),
        };
        assert_eq!(amount.for_region(RegionType::Capital), Decimal::from(900_000));
        assert_eq!(
            amount.for_region(RegionType::NonCapital),
            Decimal::from(1_200_000)
        );
    }

    #[test]
    fn test_deserialize_exclusion_rule_from_yaml() {
        let yaml = "programs: [senior_continued_employment, senior_employment_support]\nwinner: senior_continued_employment\nreason: no double claims\n";
        let rule: ExclusionRule = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(rule.loser(), Program::SeniorEmploymentSupport);
    }
}
