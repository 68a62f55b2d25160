//! JSON error responses.
//!
//! Every failure leaves the server as `{detail, error_code, success: false}`
//! with a status that tells the caller whether retrying makes sense.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use briefly_ingest::ExtractionError;
use briefly_llm::SummarizeError;

use crate::pipeline::PipelineError;

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    pub detail: String,
    pub error_code: &'static str,
    pub success: bool,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error_code: &'static str,
    pub detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, error_code: &'static str, detail: impl Into<String>) -> Self {
        Self {
            status,
            error_code,
            detail: detail.into(),
        }
    }

    pub fn invalid_option(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, "INVALID_OPTION", detail)
    }

    pub fn file_too_large(max_mb: u32) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "FILE_TOO_LARGE",
            format!("File too large (max {max_mb}MB)"),
        )
    }

    pub fn quota_exceeded() -> Self {
        Self::new(
            StatusCode::TOO_MANY_REQUESTS,
            "QUOTA_EXCEEDED",
            "Monthly API quota exceeded. Please try again next month or upgrade.",
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                detail: self.detail,
                error_code: self.error_code,
                success: false,
            }),
        )
            .into_response()
    }
}

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        let detail = err.to_string();
        match err {
            PipelineError::NoText => Self::new(StatusCode::BAD_REQUEST, "NO_TEXT_FOUND", detail),
            PipelineError::Extraction(ExtractionError::UnsupportedType(_)) => {
                Self::new(StatusCode::BAD_REQUEST, "INVALID_FILE_TYPE", detail)
            }
            PipelineError::Extraction(ExtractionError::PdfError(_)) => {
                Self::new(StatusCode::BAD_REQUEST, "EXTRACTION_FAILED", detail)
            }
            PipelineError::Summarize(e) => e.into(),
            PipelineError::DeadlineExceeded => {
                Self::new(StatusCode::GATEWAY_TIMEOUT, "PROCESSING_TIMEOUT", detail)
            }
            PipelineError::Disconnected => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL", detail)
            }
        }
    }
}

impl From<SummarizeError> for ApiError {
    fn from(err: SummarizeError) -> Self {
        let detail = err.to_string();
        match err {
            SummarizeError::NotConfigured(_) => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIGURATION_ERROR",
                "Server configuration error: HF API token not set",
            ),
            SummarizeError::RateLimited => {
                Self::new(StatusCode::TOO_MANY_REQUESTS, "UPSTREAM_RATE_LIMITED", detail)
            }
            SummarizeError::Unavailable => {
                Self::new(StatusCode::SERVICE_UNAVAILABLE, "UPSTREAM_UNAVAILABLE", detail)
            }
            SummarizeError::Timeout { .. } => {
                Self::new(StatusCode::GATEWAY_TIMEOUT, "CHUNK_TIMEOUT", detail)
            }
            SummarizeError::MalformedResponse(_) => {
                Self::new(StatusCode::BAD_GATEWAY, "UPSTREAM_MALFORMED_RESPONSE", detail)
            }
            SummarizeError::ApiError { .. } | SummarizeError::HttpError(_) => {
                Self::new(StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", detail)
            }
        }
    }
}
