//! Configuration loading and management for the subsidy engine.
//!
//! Program rates, policy thresholds, exclusion rules and filing checklists
//! are read from YAML once and shared read-only for the life of the process.
//!
//! # Example
//!
//! ```
//! use subsidy_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::embedded().unwrap();
//! println!("Loaded rules: {}", config.config().policy().metadata.name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    ChecklistMetadata, CrossValidationConfig, EmploymentPromotionRates, ExclusionRule,
    ExclusionsConfig, FlatRate, InvoluntaryTerminationConfig, MinimumWageConfig, ParentalRates,
    PolicyConfig, PolicyMetadata, ProgramMetadata, ProgramsConfig, RatesConfig, RegionKeywords,
    RegionalAmount, RegularConversionRates, SeniorContinuedRates, SeniorSupportRates,
    SeverityPenalties, SpecialParentalRate, SubsidyConfig, YouthIncentiveRates, YouthJobLeapRates,
};
