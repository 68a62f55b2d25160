use std::sync::Arc;

use briefly_core::{Config, UsageTracker};

use crate::pipeline::SummaryPipeline;
use crate::rate_limit::RateLimiter;

/// Shared handler state. Cloned per request behind an `Arc`.
pub struct AppState {
    pub config: Config,
    /// Same tracker the pipeline writes to; handlers read it for the
    /// pre-flight quota check and `/api/usage`.
    pub usage: Arc<UsageTracker>,
    pub rate_limiter: RateLimiter,
    pub pipeline: SummaryPipeline,
}
