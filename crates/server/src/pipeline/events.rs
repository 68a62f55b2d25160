//! Progress events emitted by the streaming summarize endpoint.

use axum::response::sse::Event;
use serde::Serialize;

use super::SummaryResult;

/// One phase transition of a summarize run, in emission order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ProgressEvent {
    ExtractionStarted {
        message: String,
    },
    ExtractionComplete {
        message: String,
        word_count: usize,
        preview: String,
    },
    ChunkProcessing {
        message: String,
        progress: f64,
    },
    ChunkComplete {
        message: String,
        summary: String,
        progress: f64,
    },
    Formatting {
        message: String,
    },
    Complete(SummaryResult),
    Error {
        message: String,
    },
}

impl ProgressEvent {
    pub fn extraction_started() -> Self {
        Self::ExtractionStarted {
            message: "Extracting text from PDF...".into(),
        }
    }

    pub fn extraction_complete(word_count: usize, preview: String) -> Self {
        Self::ExtractionComplete {
            message: "Text extracted successfully".into(),
            word_count,
            preview,
        }
    }

    /// Emitted before chunk `index` (0-based) is sent.
    pub fn chunk_processing(index: usize, total: usize) -> Self {
        Self::ChunkProcessing {
            message: format!("Processing chunk {} of {}", index + 1, total),
            progress: percent(index, total),
        }
    }

    /// Emitted after chunk `index` (0-based) comes back.
    pub fn chunk_complete(index: usize, total: usize, summary: String) -> Self {
        Self::ChunkComplete {
            message: format!("Chunk {} summarized", index + 1),
            summary,
            progress: percent(index + 1, total),
        }
    }

    pub fn formatting() -> Self {
        Self::Formatting {
            message: "Formatting summary...".into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    /// SSE event name.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ExtractionStarted { .. } => "extraction_started",
            Self::ExtractionComplete { .. } => "extraction_complete",
            Self::ChunkProcessing { .. } => "chunk_processing",
            Self::ChunkComplete { .. } => "chunk_complete",
            Self::Formatting { .. } => "formatting",
            Self::Complete(_) => "complete",
            Self::Error { .. } => "error",
        }
    }

    /// JSON payload carried in the SSE `data:` line.
    pub fn data(&self) -> serde_json::Value {
        serde_json::to_value(self)
            .ok()
            .and_then(|mut v| v.get_mut("data").map(serde_json::Value::take))
            .unwrap_or_else(|| serde_json::json!({}))
    }

    pub fn to_sse(&self) -> Event {
        Event::default().event(self.kind()).data(self.data().to_string())
    }
}

fn percent(done: usize, total: usize) -> f64 {
    if total == 0 {
        return 100.0;
    }
    done as f64 / total as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::SummaryMetadata;

    #[test]
    fn kind_matches_serialized_tag() {
        let events = [
            ProgressEvent::extraction_started(),
            ProgressEvent::extraction_complete(3, "abc".into()),
            ProgressEvent::chunk_processing(0, 2),
            ProgressEvent::chunk_complete(0, 2, "s".into()),
            ProgressEvent::formatting(),
            ProgressEvent::error("Error: boom"),
        ];
        for event in events {
            let value = serde_json::to_value(&event).unwrap();
            assert_eq!(value["event"], event.kind());
        }
    }

    #[test]
    fn chunk_progress_brackets_each_call() {
        match ProgressEvent::chunk_processing(1, 4) {
            ProgressEvent::ChunkProcessing { message, progress } => {
                assert_eq!(message, "Processing chunk 2 of 4");
                assert_eq!(progress, 25.0);
            }
            other => panic!("unexpected: {other:?}"),
        }
        match ProgressEvent::chunk_complete(1, 4, "sum".into()) {
            ProgressEvent::ChunkComplete { message, progress, summary } => {
                assert_eq!(message, "Chunk 2 summarized");
                assert_eq!(progress, 50.0);
                assert_eq!(summary, "sum");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn data_is_the_bare_payload() {
        let data = ProgressEvent::extraction_complete(42, "preview...".into()).data();
        assert_eq!(
            data,
            serde_json::json!({
                "message": "Text extracted successfully",
                "word_count": 42,
                "preview": "preview...",
            })
        );
    }

    #[test]
    fn complete_payload_has_result_fields_only() {
        let event = ProgressEvent::Complete(SummaryResult {
            summary: "S.".into(),
            formatted_summary: "S.".into(),
            extracted_text_preview: "T".into(),
            metadata: SummaryMetadata {
                original_word_count: 1,
                summary_word_count: 1,
                compression_ratio: 2.0,
            },
        });
        let data = event.data();
        let mut keys: Vec<&str> = data.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["extracted_text_preview", "formatted_summary", "metadata", "summary"]);
        assert_eq!(event.kind(), "complete");
    }
}
