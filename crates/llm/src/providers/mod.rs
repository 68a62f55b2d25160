pub mod huggingface;

use std::sync::Arc;

use briefly_core::config::SummarizerConfig;

use crate::provider::{SummarizeError, Summarizer};

/// Create the remote summarizer described by config.
///
/// A missing credential is not an error here; it is detected on each call.
pub fn create_summarizer(config: &SummarizerConfig) -> Result<Arc<dyn Summarizer>, SummarizeError> {
    Ok(Arc::new(huggingface::HuggingFaceSummarizer::from_config(config)?))
}
