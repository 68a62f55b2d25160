//! HTTP endpoint modules.
//!
//! `health` owns liveness and quota reporting, `summarize` owns the upload
//! routes. OpenAPI aggregation lives in `doc`.

pub mod doc;
mod health;
mod summarize;

pub use health::{health, usage, HealthResponse, UsageResponse};
pub use summarize::{summarize, summarize_stream, SummarizeResponse};
