//! Closed option sets accepted by the summarize endpoints.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BrieflyError;

/// Requested summary size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LengthOption {
    Short,
    #[default]
    Medium,
    Long,
}

impl LengthOption {
    pub const ALL: [LengthOption; 3] = [Self::Short, Self::Medium, Self::Long];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Short => "Short",
            Self::Medium => "Medium",
            Self::Long => "Long",
        }
    }
}

impl fmt::Display for LengthOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LengthOption {
    type Err = BrieflyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Short" => Ok(Self::Short),
            "Medium" => Ok(Self::Medium),
            "Long" => Ok(Self::Long),
            other => Err(BrieflyError::InvalidOption {
                field: "length_option",
                value: other.to_string(),
                expected: "Short, Medium, Long",
            }),
        }
    }
}

/// Requested summary style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ToneOption {
    #[default]
    Neutral,
    Professional,
    Casual,
}

impl ToneOption {
    pub const ALL: [ToneOption; 3] = [Self::Neutral, Self::Professional, Self::Casual];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Neutral => "Neutral",
            Self::Professional => "Professional",
            Self::Casual => "Casual",
        }
    }
}

impl fmt::Display for ToneOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToneOption {
    type Err = BrieflyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Neutral" => Ok(Self::Neutral),
            "Professional" => Ok(Self::Professional),
            "Casual" => Ok(Self::Casual),
            other => Err(BrieflyError::InvalidOption {
                field: "tone_option",
                value: other.to_string(),
                expected: "Neutral, Professional, Casual",
            }),
        }
    }
}
