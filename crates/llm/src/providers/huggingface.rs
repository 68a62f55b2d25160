use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use briefly_core::config::{SummarizerConfig, HF_TOKEN_KEY};
use serde_json::json;
use tracing::debug;

use crate::prompt::{build_prompt, LengthParams};
use crate::provider::{ChunkRequest, SummarizeError, Summarizer};

/// Yields the current API token, or `None` when it is not configured.
pub type TokenSource = Arc<dyn Fn() -> Option<String> + Send + Sync>;

/// Hugging Face Inference API summarization client.
pub struct HuggingFaceSummarizer {
    client: reqwest::Client,
    api_url: String,
    token: TokenSource,
}

impl HuggingFaceSummarizer {
    pub fn new(
        api_url: impl Into<String>,
        call_timeout: Duration,
        token: TokenSource,
    ) -> Result<Self, SummarizeError> {
        let client = reqwest::Client::builder().timeout(call_timeout).build()?;
        Ok(Self {
            client,
            api_url: api_url.into(),
            token,
        })
    }

    /// Client whose token is re-read from the environment on every call.
    pub fn from_config(config: &SummarizerConfig) -> Result<Self, SummarizeError> {
        let source = config.clone();
        Self::new(
            config.api_url.clone(),
            Duration::from_secs(config.call_timeout_secs),
            Arc::new(move || source.api_token()),
        )
    }

    fn build_request_body(prompt: &str, params: LengthParams) -> serde_json::Value {
        json!({
            "inputs": prompt,
            "parameters": {
                "max_length": params.max_length,
                "min_length": params.min_length,
                "do_sample": false,
            },
        })
    }
}

#[async_trait]
impl Summarizer for HuggingFaceSummarizer {
    async fn summarize_chunk(&self, request: ChunkRequest<'_>) -> Result<String, SummarizeError> {
        let token = (self.token)().ok_or_else(|| {
            SummarizeError::NotConfigured(format!("{HF_TOKEN_KEY} environment variable not set"))
        })?;

        let prompt = build_prompt(request.tone, request.text);
        let body = Self::build_request_body(&prompt, request.params);
        let on_transport_error = |e: reqwest::Error| {
            if e.is_timeout() {
                SummarizeError::Timeout {
                    chunk: request.index + 1,
                    total: request.total,
                }
            } else {
                SummarizeError::HttpError(e)
            }
        };

        debug!(
            chunk = request.index + 1,
            total = request.total,
            chars = request.text.chars().count(),
            "Hugging Face request to {}",
            self.api_url
        );

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(on_transport_error)?;

        let status = response.status();
        let text = response.text().await.map_err(on_transport_error)?;

        if !status.is_success() {
            return Err(map_status(status.as_u16(), text));
        }

        parse_summary(&text)
    }
}

/// Map a non-2xx status to its error kind.
pub(crate) fn map_status(status: u16, body: String) -> SummarizeError {
    match status {
        429 => SummarizeError::RateLimited,
        503 => SummarizeError::Unavailable,
        _ => SummarizeError::ApiError { status, body },
    }
}

/// Pull `[0].summary_text` out of a successful response body.
pub(crate) fn parse_summary(body: &str) -> Result<String, SummarizeError> {
    let malformed = || SummarizeError::MalformedResponse(body.to_string());
    let value: serde_json::Value = serde_json::from_str(body).map_err(|_| malformed())?;
    value
        .as_array()
        .and_then(|items| items.first())
        .and_then(|first| first.get("summary_text"))
        .and_then(|s| s.as_str())
        .map(str::to_string)
        .ok_or_else(malformed)
}
