//! Request parameters derived from the summary options.

use briefly_core::{LengthOption, ToneOption};
use serde::Serialize;

/// Output bounds handed to the remote model, in tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LengthParams {
    pub min_length: u32,
    pub max_length: u32,
}

pub fn length_params(length: LengthOption) -> LengthParams {
    let (min_length, max_length) = match length {
        LengthOption::Short => (30, 60),
        LengthOption::Medium => (50, 120),
        LengthOption::Long => (80, 200),
    };
    LengthParams { min_length, max_length }
}

pub fn tone_instruction(tone: ToneOption) -> &'static str {
    match tone {
        ToneOption::Neutral => "Summarize the following content clearly and concisely:",
        ToneOption::Professional => {
            "Write a formal and professional executive summary of the following content:"
        }
        ToneOption::Casual => {
            "Explain the following content in a friendly and easy-to-understand tone:"
        }
    }
}

/// `<instruction> <chunk>`
pub fn build_prompt(tone: ToneOption, chunk_text: &str) -> String {
    format!("{} {}", tone_instruction(tone), chunk_text)
}
