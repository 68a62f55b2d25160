//! PDF summarize endpoints, blocking and SSE.
//!
//! Both routes accept the same multipart form and run the same boundary
//! checks. Anything rejected here never reaches extraction and never
//! touches the monthly quota.

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::sse::{Event, Sse};
use axum::Json;
use bytes::Bytes;
use serde::Serialize;
use tokio::time::Instant;
use tokio_stream::StreamExt;
use tracing::{info, warn};

use briefly_core::{LengthOption, ToneOption};
use briefly_ingest::{is_supported_document, ExtractionError};

use crate::error::{ApiError, ErrorBody};
use crate::pipeline::{PipelineError, SummarizeInput, SummaryMetadata, SummaryResult};
use crate::state::AppState;

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct SummarizeResponse {
    pub summary: String,
    pub formatted_summary: String,
    pub extracted_text_preview: String,
    pub success: bool,
    pub metadata: SummaryMetadata,
}

impl From<SummaryResult> for SummarizeResponse {
    fn from(result: SummaryResult) -> Self {
        Self {
            summary: result.summary,
            formatted_summary: result.formatted_summary,
            extracted_text_preview: result.extracted_text_preview,
            success: true,
            metadata: result.metadata,
        }
    }
}

/// Multipart form as sent, before validation.
#[derive(Default)]
struct SummarizeForm {
    file: Option<(String, Bytes)>,
    length_option: Option<String>,
    tone_option: Option<String>,
}

/// Summarize a PDF
///
/// Accepts multipart/form-data with a `file` field (PDF) and optional
/// `length_option` (`Short`, `Medium`, `Long`) and `tone_option`
/// (`Neutral`, `Professional`, `Casual`) fields. Option values are
/// case-sensitive. Returns the full summary once every chunk has been
/// summarized.
#[utoipa::path(
    post,
    path = "/api/summarize",
    tag = "Summarize",
    request_body(content_type = "multipart/form-data", description = "PDF upload with summary options"),
    responses(
        (status = 200, description = "Summary produced", body = SummarizeResponse),
        (status = 400, description = "Invalid file, file too large, or no extractable text", body = ErrorBody),
        (status = 422, description = "Missing file or invalid option", body = ErrorBody),
        (status = 429, description = "Rate limit or monthly quota exceeded", body = ErrorBody),
        (status = 500, description = "Server misconfiguration", body = ErrorBody),
        (status = 502, description = "Upstream summarizer error", body = ErrorBody),
        (status = 503, description = "Upstream summarizer unavailable", body = ErrorBody),
        (status = 504, description = "Chunk or request timeout", body = ErrorBody)
    )
)]
pub async fn summarize(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<SummarizeResponse>, ApiError> {
    let input = accept(&state, multipart).await?;
    let filename = input.filename.clone();
    info!(
        filename = %filename,
        size_bytes = input.bytes.len(),
        length_option = %input.length,
        tone_option = %input.tone,
        "summarize_request"
    );

    match state.pipeline.run(input).await {
        Ok(result) => Ok(Json(result.into())),
        Err(err) => {
            warn!(
                error = %err,
                filename = %filename,
                retryable = err.is_retryable(),
                "summarize_error"
            );
            Err(err.into())
        }
    }
}

/// Summarize a PDF with live progress
///
/// Same form as `/api/summarize`. After the upload passes validation the
/// response is an SSE stream.
///
/// Events emitted:
/// - `extraction_started`  -- text extraction began
/// - `extraction_complete` -- word count and a 500-character preview
/// - `chunk_processing`    -- before each chunk is sent, with progress
/// - `chunk_complete`      -- after each chunk, with its partial summary
/// - `formatting`          -- partial summaries are being joined
/// - `complete`            -- terminal, full result
/// - `error`               -- terminal, failure message
#[utoipa::path(
    post,
    path = "/api/summarize-stream",
    tag = "Summarize",
    request_body(content_type = "multipart/form-data", description = "PDF upload with summary options"),
    responses(
        (status = 200, description = "SSE event stream", content_type = "text/event-stream"),
        (status = 400, description = "Invalid file or file too large", body = ErrorBody),
        (status = 422, description = "Missing file or invalid option", body = ErrorBody),
        (status = 429, description = "Rate limit or monthly quota exceeded", body = ErrorBody)
    )
)]
pub async fn summarize_stream(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Sse<impl futures::Stream<Item = Result<Event, Infallible>>>, ApiError> {
    let input = accept(&state, multipart).await?;
    info!(
        filename = %input.filename,
        size_bytes = input.bytes.len(),
        length_option = %input.length,
        tone_option = %input.tone,
        "streaming_request"
    );

    let events = state
        .pipeline
        .stream(input)
        .map(|event| Ok::<_, Infallible>(event.to_sse()));
    Ok(Sse::new(events))
}

/// Read and validate the upload. Order: options, presence, type, size, quota.
async fn accept(state: &AppState, multipart: Multipart) -> Result<SummarizeInput, ApiError> {
    let accepted_at = Instant::now();
    let max_mb = state.config.upload.max_file_size_mb;
    let form = read_form(multipart, max_mb).await?;

    let length = parse_option::<LengthOption>(form.length_option.as_deref())?;
    let tone = parse_option::<ToneOption>(form.tone_option.as_deref())?;

    let (filename, bytes) = form.file.ok_or_else(|| {
        ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, "MISSING_FILE", "No file provided")
    })?;

    if !is_supported_document(&filename) {
        return Err(PipelineError::from(ExtractionError::UnsupportedType(filename)).into());
    }

    if bytes.len() > state.config.upload.max_file_bytes() {
        warn!(filename = %filename, size_bytes = bytes.len(), max_mb, "file_too_large");
        return Err(ApiError::file_too_large(max_mb));
    }

    if state.usage.is_exceeded() {
        let snapshot = state.usage.snapshot();
        warn!(month = %snapshot.month, used = snapshot.used, limit = snapshot.limit, "monthly_quota_exceeded");
        return Err(ApiError::quota_exceeded());
    }

    Ok(SummarizeInput {
        bytes,
        filename,
        length,
        tone,
        accepted_at,
    })
}

async fn read_form(mut multipart: Multipart, max_mb: u32) -> Result<SummarizeForm, ApiError> {
    let mut form = SummarizeForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, max_mb))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(|e| multipart_error(e, max_mb))?;
                form.file = Some((filename, bytes));
            }
            Some("length_option") => {
                form.length_option = Some(field.text().await.map_err(|e| multipart_error(e, max_mb))?);
            }
            Some("tone_option") => {
                form.tone_option = Some(field.text().await.map_err(|e| multipart_error(e, max_mb))?);
            }
            _ => {}
        }
    }

    Ok(form)
}

fn parse_option<T>(raw: Option<&str>) -> Result<T, ApiError>
where
    T: std::str::FromStr<Err = briefly_core::BrieflyError> + Default,
{
    match raw {
        None => Ok(T::default()),
        Some(value) => value
            .parse()
            .map_err(|e: briefly_core::BrieflyError| ApiError::invalid_option(e.to_string())),
    }
}

/// A body over the server-wide limit surfaces here as a 413.
fn multipart_error(err: axum::extract::multipart::MultipartError, max_mb: u32) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return ApiError::new(
            StatusCode::PAYLOAD_TOO_LARGE,
            "FILE_TOO_LARGE",
            format!("File too large (max {max_mb}MB)"),
        );
    }
    ApiError::new(
        StatusCode::BAD_REQUEST,
        "INVALID_FORM",
        format!("Multipart error: {}", err.body_text()),
    )
}
