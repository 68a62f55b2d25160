pub mod config;
pub mod error;
pub mod options;
pub mod quota;

pub use config::Config;
pub use error::*;
pub use options::{LengthOption, ToneOption};
pub use quota::{UsageSnapshot, UsageTracker};
