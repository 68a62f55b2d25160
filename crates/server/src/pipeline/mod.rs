//! Summarize pipeline: extract, summarize chunk by chunk, format.
//!
//! One run walks `extracting -> summarizing(0..n) -> formatting -> complete`
//! and stops at the first failure. Chunks are summarized strictly in order,
//! one remote call at a time. Partial summaries are never returned.
//!
//! `run` returns only the final result. `stream` emits a `ProgressEvent` at
//! every phase boundary and ends with `complete` or a single `error`.

mod events;

pub use events::ProgressEvent;

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use serde::Serialize;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, info, warn, Instrument};

use briefly_core::{LengthOption, ToneOption, UsageTracker};
use briefly_ingest::{chunk_text, format_paragraphs, ExtractionError, TextExtractor};
use briefly_llm::{length_params, ChunkRequest, SummarizeError, Summarizer};

/// Characters of extracted text echoed back to the caller.
pub const PREVIEW_CHARS: usize = 500;

/// Validated summarize request.
#[derive(Debug, Clone)]
pub struct SummarizeInput {
    pub bytes: Bytes,
    pub filename: String,
    pub length: LengthOption,
    pub tone: ToneOption,
    /// When the request was accepted. The deadline counts from here.
    pub accepted_at: Instant,
}

#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct SummaryMetadata {
    pub original_word_count: usize,
    pub summary_word_count: usize,
    /// `len(summary) / len(text)` in characters, rounded to 3 decimals.
    pub compression_ratio: f64,
}

impl SummaryMetadata {
    fn new(text: &str, summary: &str) -> Self {
        let text_chars = text.chars().count().max(1) as f64;
        let ratio = summary.chars().count() as f64 / text_chars;
        Self {
            original_word_count: word_count(text),
            summary_word_count: word_count(summary),
            compression_ratio: (ratio * 1000.0).round() / 1000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct SummaryResult {
    pub summary: String,
    pub formatted_summary: String,
    pub extracted_text_preview: String,
    pub metadata: SummaryMetadata,
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("No text found in PDF. The file may contain only images.")]
    NoText,
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error(transparent)]
    Summarize(#[from] SummarizeError),
    #[error("Processing timeout - document too large or processing took too long")]
    DeadlineExceeded,
    #[error("progress consumer disconnected")]
    Disconnected,
}

impl PipelineError {
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Summarize(e) => e.is_retryable(),
            Self::DeadlineExceeded => true,
            _ => false,
        }
    }

    /// Message carried by the terminal `error` event.
    fn event_message(&self) -> String {
        match self {
            Self::NoText => self.to_string(),
            other => format!("Error: {other}"),
        }
    }
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// First `PREVIEW_CHARS` characters, with `...` appended when truncated.
pub fn preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Where phase events go. `Silent` drops them.
enum Progress<'a> {
    Silent,
    Channel(&'a mpsc::Sender<ProgressEvent>),
}

impl Progress<'_> {
    async fn emit(&self, event: ProgressEvent) -> Result<(), PipelineError> {
        match self {
            Progress::Silent => Ok(()),
            Progress::Channel(tx) => tx.send(event).await.map_err(|_| PipelineError::Disconnected),
        }
    }
}

#[derive(Clone)]
pub struct SummaryPipeline {
    extractor: Arc<dyn TextExtractor>,
    summarizer: Arc<dyn Summarizer>,
    usage: Arc<UsageTracker>,
    max_chunk_size: usize,
    deadline: Duration,
}

impl SummaryPipeline {
    pub fn new(
        extractor: Arc<dyn TextExtractor>,
        summarizer: Arc<dyn Summarizer>,
        usage: Arc<UsageTracker>,
        max_chunk_size: usize,
        deadline: Duration,
    ) -> Self {
        Self {
            extractor,
            summarizer,
            usage,
            max_chunk_size,
            deadline,
        }
    }

    /// Run to completion and return the final result only.
    pub async fn run(&self, input: SummarizeInput) -> Result<SummaryResult, PipelineError> {
        let deadline = input.accepted_at + self.deadline;
        tokio::time::timeout_at(deadline, self.execute(input, Progress::Silent))
            .await
            .map_err(|_| PipelineError::DeadlineExceeded)?
    }

    /// Run in the background, yielding one event per phase transition.
    ///
    /// The stream is finite and ends after `complete` or `error`. Dropping it
    /// cancels the run, including any remote call in flight.
    pub fn stream(&self, input: SummarizeInput) -> ReceiverStream<ProgressEvent> {
        let (tx, rx) = mpsc::channel(16);
        let pipeline = self.clone();

        tokio::spawn(
            async move {
                let filename = input.filename.clone();
                let deadline = input.accepted_at + pipeline.deadline;
                let run = tokio::time::timeout_at(
                    deadline,
                    pipeline.execute(input, Progress::Channel(&tx)),
                );

                let outcome = tokio::select! {
                    outcome = run => outcome.unwrap_or(Err(PipelineError::DeadlineExceeded)),
                    _ = tx.closed() => Err(PipelineError::Disconnected),
                };

                match outcome {
                    Ok(_) => info!(filename = %filename, "streaming_complete"),
                    Err(PipelineError::Disconnected) => {
                        info!(filename = %filename, "stream consumer went away, run cancelled");
                    }
                    Err(err) => {
                        warn!(error = %err, filename = %filename, "streaming_error");
                        let _ = tx.send(ProgressEvent::error(err.event_message())).await;
                    }
                }
            }
            .in_current_span(),
        );

        ReceiverStream::new(rx)
    }

    async fn execute(
        &self,
        input: SummarizeInput,
        progress: Progress<'_>,
    ) -> Result<SummaryResult, PipelineError> {
        progress.emit(ProgressEvent::extraction_started()).await?;

        let text = self.extract(input.bytes.clone()).await?;
        if text.trim().is_empty() {
            return Err(PipelineError::NoText);
        }

        let text_chars = text.chars().count();
        self.usage.track(text_chars as u64);
        info!(chars_used = text_chars, remaining = self.usage.remaining(), "quota_usage");

        let original_words = word_count(&text);
        info!(
            text_length = text_chars,
            word_count = original_words,
            filename = %input.filename,
            "pdf_extracted"
        );

        let text_preview = preview(&text);
        progress
            .emit(ProgressEvent::extraction_complete(original_words, text_preview.clone()))
            .await?;

        let chunks = chunk_text(&text, self.max_chunk_size);
        let total = chunks.len();
        let params = length_params(input.length);
        let mut parts = Vec::with_capacity(total);

        for chunk in &chunks {
            progress.emit(ProgressEvent::chunk_processing(chunk.index, total)).await?;
            debug!(
                chunk_index = chunk.index,
                total,
                chars = chunk.content.chars().count(),
                "summarizing chunk"
            );

            let summary = self
                .summarizer
                .summarize_chunk(ChunkRequest {
                    text: &chunk.content,
                    tone: input.tone,
                    params,
                    index: chunk.index,
                    total,
                })
                .await?;

            progress
                .emit(ProgressEvent::chunk_complete(chunk.index, total, summary.clone()))
                .await?;
            parts.push(summary);
        }

        progress.emit(ProgressEvent::formatting()).await?;

        let summary = parts.join(" ");
        let formatted_summary = format_paragraphs(&summary);
        info!(
            summary_length = summary.chars().count(),
            chunks = total,
            length_option = %input.length,
            tone_option = %input.tone,
            "summarization_complete"
        );

        let result = SummaryResult {
            metadata: SummaryMetadata::new(&text, &summary),
            summary,
            formatted_summary,
            extracted_text_preview: text_preview,
        };
        progress.emit(ProgressEvent::Complete(result.clone())).await?;
        Ok(result)
    }

    /// Extraction runs on a blocking worker; a panic inside the extractor is
    /// reported as a failed extraction.
    async fn extract(&self, bytes: Bytes) -> Result<String, PipelineError> {
        let extractor = self.extractor.clone();
        let text = tokio::task::spawn_blocking(move || extractor.extract(&bytes))
            .await
            .map_err(|e| ExtractionError::PdfError(format!("extraction worker failed: {e}")))??;
        Ok(text)
    }
}
