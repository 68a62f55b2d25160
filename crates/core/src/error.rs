use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BrieflyError {
    #[error("Invalid {field}: '{value}' (expected one of: {expected})")]
    InvalidOption {
        field: &'static str,
        value: String,
        expected: &'static str,
    },
}
