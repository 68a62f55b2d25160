use async_trait::async_trait;
use briefly_core::ToneOption;

use crate::prompt::LengthParams;

/// One chunk to summarize, with its position for error reporting.
#[derive(Debug, Clone, Copy)]
pub struct ChunkRequest<'a> {
    pub text: &'a str,
    pub tone: ToneOption,
    pub params: LengthParams,
    /// 0-based chunk index.
    pub index: usize,
    pub total: usize,
}

/// Trait for remote summarization backends. One call per chunk.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize_chunk(&self, request: ChunkRequest<'_>) -> Result<String, SummarizeError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SummarizeError {
    #[error("{0}")]
    NotConfigured(String),
    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,
    #[error("Hugging Face API is temporarily unavailable. Please try again.")]
    Unavailable,
    #[error("API error: {status} - {body}")]
    ApiError { status: u16, body: String },
    /// `chunk` is 1-based.
    #[error("Timeout while processing chunk {chunk}/{total}")]
    Timeout { chunk: usize, total: usize },
    #[error("Unexpected HF API response format: {0}")]
    MalformedResponse(String),
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
}

impl SummarizeError {
    /// Whether the caller may reasonably retry the same request later.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited | Self::Unavailable | Self::Timeout { .. } | Self::HttpError(_)
        )
    }
}
