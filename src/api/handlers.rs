//! HTTP request handlers for the subsidy engine API.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::SubsidyEngine;
use crate::clock::{Clock, FixedClock, SystemClock};
use crate::models::AnalysisOptions;

use super::request::AnalysisRequest;
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/analyze", post(analyze_handler))
        .with_state(state)
}

fn error_response(status: StatusCode, error: ApiError) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(error),
    )
        .into_response()
}

/// Handler for POST /analyze.
///
/// Accepts an extracted document bundle and returns the subsidy report.
async fn analyze_handler(
    State(state): State<AppState>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing analysis request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    ApiError::validation_error(body_text)
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    warn!(correlation_id = %correlation_id, "Missing JSON content type");
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return error_response(StatusCode::BAD_REQUEST, error);
        }
    };

    let options = match AnalysisOptions::try_from(request.options) {
        Ok(options) => options,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Invalid analysis options"
            );
            let api_error: ApiErrorResponse = err.into();
            return error_response(api_error.status, api_error.error);
        }
    };

    let clock: Box<dyn Clock + Send> = match options.as_of {
        Some(date) => Box::new(FixedClock::new(date)),
        None => Box::new(SystemClock),
    };

    let start_time = Instant::now();
    let engine = SubsidyEngine::new(state.config().config());
    let report = engine.analyze(&request.documents, &options, clock.as_ref());

    info!(
        correlation_id = %correlation_id,
        employees = report.employee_summary.total,
        eligible_programs = report.eligible_calculations.len(),
        total_eligible_amount = %report.total_eligible_amount,
        warnings = report.validation.warnings.len(),
        duration_us = start_time.elapsed().as_micros(),
        "Analysis completed successfully"
    );

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(report),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::models::{EligibilityStatus, Program, SubsidyReport};
    use axum::body::Body;
    use axum::http::Request;
    use rust_decimal::Decimal;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        AppState::new(ConfigLoader::load("./config/subsidy_2026").expect("Failed to load config"))
    }

    fn post(body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/analyze")
            .header("Content-Type", "application/json")
            .body(body.into())
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_request_returns_report() {
        let router = create_router(create_test_state());
        let body = r#"{
            "documents": {
                "wage_ledger": {
                    "employees": [{
                        "name": "김민준",
                        "resident_id": "980315-1******",
                        "hire_date": "2025-03-02",
                        "monthly_wage": "2500000",
                        "weekly_hours": "40",
                        "work_type": "FULL_TIME"
                    }]
                },
                "business_registration": { "address": "대전광역시 유성구 대학로 99" }
            },
            "options": { "programs": ["youth_job_leap"], "as_of": "2026-03-01" }
        }"#;

        let response = router.oneshot(post(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let report: SubsidyReport = serde_json::from_slice(&body).unwrap();

        assert_eq!(report.generated_on.to_string(), "2026-03-01");
        assert_eq!(report.calculations.len(), 1);
        let youth = &report.calculations[0];
        assert_eq!(youth.program, Program::YouthJobLeap);
        assert_eq!(youth.status, EligibilityStatus::Eligible);
        assert_eq!(youth.total_amount, Decimal::from(12_000_000));
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let router = create_router(create_test_state());
        let response = router.oneshot(post("{invalid json")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_unknown_program_returns_validation_error() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(post(r#"{"options": {"programs": ["lottery"]}}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_empty_program_list_returns_400() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(post(r#"{"options": {"programs": []}}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "INVALID_REQUEST");
    }

    #[tokio::test]
    async fn test_missing_content_type_returns_400() {
        let router = create_router(create_test_state());
        let request = Request::builder()
            .method("POST")
            .uri("/analyze")
            .body(Body::from("{}"))
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
