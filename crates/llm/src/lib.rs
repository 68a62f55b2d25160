pub mod prompt;
pub mod provider;
pub mod providers;

pub use prompt::{build_prompt, length_params, tone_instruction, LengthParams};
pub use provider::{ChunkRequest, SummarizeError, Summarizer};
pub use providers::huggingface::{HuggingFaceSummarizer, TokenSource};
