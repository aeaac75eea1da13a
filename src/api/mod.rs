//! HTTP API module for the subsidy engine.
//!
//! A thin JSON adapter: `POST /analyze` takes extracted documents and
//! returns the structured subsidy report.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{AnalysisOptionsRequest, AnalysisRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
