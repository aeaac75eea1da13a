//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading subsidy
//! configurations from YAML files, either from a directory or from the copy
//! compiled into the crate.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::Program;

use super::types::{
    ChecklistMetadata, ExclusionsConfig, PolicyConfig, ProgramMetadata, ProgramsConfig,
    RatesConfig, SubsidyConfig,
};

const EMBEDDED_POLICY: &str = include_str!("../../config/subsidy_2026/policy.yaml");
const EMBEDDED_RATES: &str = include_str!("../../config/subsidy_2026/rates.yaml");
const EMBEDDED_PROGRAMS: &str = include_str!("../../config/subsidy_2026/programs.yaml");
const EMBEDDED_EXCLUSIONS: &str = include_str!("../../config/subsidy_2026/exclusions.yaml");

/// Loads and provides access to subsidy configuration.
///
/// # Directory Structure
///
/// ```text
/// config/subsidy_2026/
/// ├── policy.yaml      # Minimum wage, region keywords, validation thresholds
/// ├── rates.yaml       # Program amounts and durations
/// ├── programs.yaml    # Program names and filing checklists
/// └── exclusions.yaml  # Duplicate-exclusion rules
/// ```
///
/// # Example
///
/// ```
/// use subsidy_engine::config::ConfigLoader;
/// use subsidy_engine::models::Program;
///
/// let loader = ConfigLoader::embedded().unwrap();
/// assert_eq!(loader.program_name(Program::YouthJobLeap), "청년일자리도약장려금");
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: SubsidyConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if any file is missing, contains invalid YAML, or the
    /// files are inconsistent with each other.
    ///
    /// ```no_run
    /// use subsidy_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/subsidy_2026")?;
    /// # Ok::<(), subsidy_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let policy = Self::load_yaml::<PolicyConfig>(&path.join("policy.yaml"))?;
        let rates = Self::load_yaml::<RatesConfig>(&path.join("rates.yaml"))?;
        let programs = Self::load_yaml::<ProgramsConfig>(&path.join("programs.yaml"))?;
        let exclusions = Self::load_yaml::<ExclusionsConfig>(&path.join("exclusions.yaml"))?;

        Self::from_parts(policy, rates, programs, exclusions)
    }

    /// Parses the configuration compiled into the crate.
    pub fn embedded() -> EngineResult<Self> {
        let policy = Self::parse_yaml::<PolicyConfig>(EMBEDDED_POLICY, "embedded:policy.yaml")?;
        let rates = Self::parse_yaml::<RatesConfig>(EMBEDDED_RATES, "embedded:rates.yaml")?;
        let programs =
            Self::parse_yaml::<ProgramsConfig>(EMBEDDED_PROGRAMS, "embedded:programs.yaml")?;
        let exclusions =
            Self::parse_yaml::<ExclusionsConfig>(EMBEDDED_EXCLUSIONS, "embedded:exclusions.yaml")?;

        Self::from_parts(policy, rates, programs, exclusions)
    }

    fn from_parts(
        policy: PolicyConfig,
        rates: RatesConfig,
        programs: ProgramsConfig,
        exclusions: ExclusionsConfig,
    ) -> EngineResult<Self> {
        for program in Program::ALL {
            if !programs.programs.contains_key(&program) {
                return Err(EngineError::InvalidConfig {
                    message: format!("program '{}' has no metadata", program),
                });
            }
        }

        for rule in &exclusions.rules {
            let [first, second] = rule.programs;
            if first == second {
                return Err(EngineError::InvalidConfig {
                    message: format!("exclusion rule pairs '{}' with itself", first),
                });
            }
            if !rule.involves(rule.winner) {
                return Err(EngineError::InvalidConfig {
                    message: format!(
                        "exclusion winner '{}' is not one of '{}' and '{}'",
                        rule.winner, first, second
                    ),
                });
            }
        }

        let config = SubsidyConfig::new(policy, rates, programs.programs, exclusions.rules);
        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::parse_yaml(&content, &path_str)
    }

    fn parse_yaml<T: serde::de::DeserializeOwned>(content: &str, label: &str) -> EngineResult<T> {
        serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
            path: label.to_string(),
            message: e.to_string(),
        })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &SubsidyConfig {
        &self.config
    }

    /// Display name of a program.
    pub fn program_name(&self, program: Program) -> String {
        self.config.program_name(program)
    }

    /// Static metadata of a program.
    pub fn program_metadata(&self, program: Program) -> EngineResult<&ProgramMetadata> {
        self.config
            .programs()
            .get(&program)
            .ok_or_else(|| EngineError::InvalidConfig {
                message: format!("program '{}' has no metadata", program),
            })
    }

    /// Filing checklist of a program.
    pub fn checklist(&self, program: Program) -> EngineResult<&ChecklistMetadata> {
        self.program_metadata(program).map(|m| &m.checklist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/subsidy_2026"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.config().policy().metadata.effective_year, 2026);
    }

    #[test]
    fn test_embedded_matches_directory() {
        let from_dir = ConfigLoader::load(config_path()).unwrap();
        let embedded = ConfigLoader::embedded().unwrap();

        assert_eq!(
            from_dir.config().exclusions(),
            embedded.config().exclusions()
        );
        assert_eq!(
            from_dir.config().policy().minimum_wage.monthly,
            embedded.config().policy().minimum_wage.monthly
        );
    }

    #[test]
    fn test_rates_loaded_correctly() {
        let loader = ConfigLoader::embedded().unwrap();
        let rates = loader.config().rates();

        assert_eq!(rates.youth_job_leap.monthly_amount, dec("600000"));
        assert_eq!(rates.youth_job_leap.months, 12);
        assert_eq!(rates.youth_job_leap.incentive.general, dec("4800000"));
        assert_eq!(
            rates.youth_job_leap.incentive.employment_difficulty,
            dec("7200000")
        );
        assert_eq!(
            rates.employment_promotion.minimum_monthly_wage,
            dec("1210000")
        );
        assert_eq!(
            rates.senior_continued_employment.quarterly_amount.capital,
            dec("900000")
        );
        assert_eq!(rates.senior_employment_support.quarters, 8);
        assert_eq!(
            rates.parental_employment_stability.special.first_monthly_amount,
            dec("1000000")
        );
    }

    #[test]
    fn test_policy_thresholds_loaded_correctly() {
        let loader = ConfigLoader::embedded().unwrap();
        let policy = loader.config().policy();

        assert_eq!(policy.minimum_wage.hourly, dec("10320"));
        assert_eq!(policy.minimum_wage.part_time_tolerance, dec("0.9"));
        assert_eq!(policy.cross_validation.salary_medium_ratio, dec("0.10"));
        assert_eq!(policy.cross_validation.penalties.high, 15);
        assert!(policy.involuntary_termination.codes.contains_key("23"));
        assert!(policy.region.capital.iter().any(|k| k == "경기"));
    }

    #[test]
    fn test_every_program_has_checklist() {
        let loader = ConfigLoader::embedded().unwrap();
        for program in Program::ALL {
            let checklist = loader.checklist(program).unwrap();
            assert!(!checklist.required_documents.is_empty());
            assert!(!checklist.application_venue.is_empty());
        }
    }

    #[test]
    fn test_region_sensitivity_flags() {
        let loader = ConfigLoader::embedded().unwrap();
        assert!(loader.config().is_region_sensitive(Program::YouthJobLeap));
        assert!(
            loader
                .config()
                .is_region_sensitive(Program::SeniorContinuedEmployment)
        );
        assert!(!loader.config().is_region_sensitive(Program::EmploymentPromotion));
    }

    #[test]
    fn test_exclusion_rules_loaded_in_order() {
        let loader = ConfigLoader::embedded().unwrap();
        let rules = loader.config().exclusions();

        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].winner, Program::YouthJobLeap);
        assert_eq!(rules[0].loser(), Program::EmploymentPromotion);
        assert_eq!(rules[1].winner, Program::SeniorContinuedEmployment);
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("policy.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_exclusion_winner_rejected() {
        let policy = ConfigLoader::parse_yaml::<PolicyConfig>(EMBEDDED_POLICY, "p").unwrap();
        let rates = ConfigLoader::parse_yaml::<RatesConfig>(EMBEDDED_RATES, "r").unwrap();
        let programs =
            ConfigLoader::parse_yaml::<ProgramsConfig>(EMBEDDED_PROGRAMS, "g").unwrap();
        let exclusions = ConfigLoader::parse_yaml::<ExclusionsConfig>(
            "rules:\n  - programs: [youth_job_leap, employment_promotion]\n    winner: employment_retention\n    reason: bad\n",
            "e",
        )
        .unwrap();

        let result = ConfigLoader::from_parts(policy, rates, programs, exclusions);
        assert!(matches!(result, Err(EngineError::InvalidConfig { .. })));
    }

    #[test]
    fn test_parse_error_reports_label() {
        let result = ConfigLoader::parse_yaml::<RatesConfig>("youth_job_leap: [", "broken.yaml");
        match result {
            Err(EngineError::ConfigParseError { path, .. }) => assert_eq!(path, "broken.yaml"),
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }
}
