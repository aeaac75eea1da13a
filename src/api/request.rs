//! Request types for the subsidy engine API.
//!
//! This module defines the JSON request structure for the `/analyze` endpoint.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AnalysisOptions, DocumentBundle, ParentalLeaveInfo, Program, RegionType, YouthType,
};

/// Request body for the `/analyze` endpoint.
///
/// Carries the documents already extracted by the upstream collaborator and
/// the caller's analysis options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Extracted documents; any of them may be absent.
    #[serde(default)]
    pub documents: DocumentBundle,
    /// Analysis options.
    #[serde(default)]
    pub options: AnalysisOptionsRequest,
}

/// Options in an analysis request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisOptionsRequest {
    /// Programs to evaluate; omitted means all. An empty list is rejected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub programs: Option<Vec<Program>>,
    /// Youth Job Leap sub-type.
    #[serde(default)]
    pub youth_type: YouthType,
    /// Explicit region overriding the business address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<RegionType>,
    /// Leave case for Parental Employment Stability.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parental_leave: Option<ParentalLeaveInfo>,
    /// Evaluation date; today when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub as_of: Option<NaiveDate>,
}

impl TryFrom<AnalysisOptionsRequest> for AnalysisOptions {
    type Error = EngineError;

    fn try_from(req: AnalysisOptionsRequest) -> EngineResult<Self> {
        let programs = match req.programs {
            Some(programs) if programs.is_empty() => {
                return Err(EngineError::InvalidRequest {
                    field: "options.programs".to_string(),
                    message: "at least one program must be requested".to_string(),
                });
            }
            Some(programs) => programs,
            None => Vec::new(),
        };

        Ok(AnalysisOptions {
            programs,
            youth_type: req.youth_type,
            region: req.region,
            parental_leave: req.parental_leave,
            as_of: req.as_of,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_body_defaults() {
        let request: AnalysisRequest = serde_json::from_str("{}").unwrap();
        assert!(request.documents.is_empty());

        let options = AnalysisOptions::try_from(request.options).unwrap();
        assert_eq!(options.requested_programs(), Program::ALL.to_vec());
        assert_eq!(options.youth_type, YouthType::General);
    }

    #[test]
    fn test_empty_program_list_rejected() {
        let request: AnalysisRequest =
            serde_json::from_str(r#"{"options": {"programs": []}}"#).unwrap();
        let err = AnalysisOptions::try_from(request.options).unwrap_err();
        assert!(matches!(err, EngineError::InvalidRequest { .. }));
    }

    #[test]
    fn test_options_conversion() {
        let json = r#"{
            "options": {
                "programs": ["youth_job_leap"],
                "youth_type": "employment_difficulty",
                "region": "non_capital",
                "as_of": "2026-03-01"
            }
        }"#;
        let request: AnalysisRequest = serde_json::from_str(json).unwrap();
        let options = AnalysisOptions::try_from(request.options).unwrap();

        assert_eq!(options.programs, vec![Program::YouthJobLeap]);
        assert_eq!(options.youth_type, YouthType::EmploymentDifficulty);
        assert_eq!(options.region, Some(RegionType::NonCapital));
        assert_eq!(options.as_of, NaiveDate::from_ymd_opt(2026, 3, 1));
    }
}
