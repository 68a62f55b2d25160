//! OpenAPI documentation aggregator.
//!
//! Collects all `#[utoipa::path]`-annotated handlers and `ToSchema`-derived
//! types into a single OpenAPI 3.1 spec, served via Scalar UI at `/docs`.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "PDF Summarizer API",
        version = "0.1.0",
        description = "Upload a PDF and receive an abstractive summary, as one response or as a live event stream.",
    ),
    tags(
        (name = "Health", description = "Liveness and monthly quota usage"),
        (name = "Summarize", description = "PDF upload, extraction and chunked summarization"),
    ),
    paths(
        // Health
        crate::api::health::health,
        crate::api::health::usage,
        // Summarize
        crate::api::summarize::summarize,
        crate::api::summarize::summarize_stream,
    ),
    components(schemas(
        crate::api::health::HealthResponse,
        crate::api::health::UsageResponse,
        crate::api::summarize::SummarizeResponse,
        crate::pipeline::SummaryMetadata,
        crate::pipeline::SummaryResult,
        crate::error::ErrorBody,
    ))
)]
pub struct ApiDoc;
