//! Application configuration builders.
//!
//! Constructs the extractor, summarizer, quota tracker and pipeline from `Config`.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use briefly_core::{Config, UsageTracker};
use briefly_ingest::PdfExtractor;
use briefly_llm::providers::create_summarizer;

use crate::pipeline::SummaryPipeline;
use crate::rate_limit::RateLimiter;
use crate::state::AppState;

/// Load configuration from `.env` and environment variables. An explicit
/// profile overrides `BRIEFLY_PROFILE`.
pub fn load_config(profile: Option<&str>) -> Config {
    briefly_core::config::load_dotenv();
    match profile {
        Some(p) => Config::for_profile(p),
        None => Config::from_env(),
    }
}

/// Wire every subsystem for `config` into one shared state.
///
/// A missing HF token is not fatal: the server starts and each summarize
/// request fails with a configuration error until the token is set.
pub fn build_state(config: Config) -> anyhow::Result<Arc<AppState>> {
    let summarizer = create_summarizer(&config.summarizer)?;
    if config.summarizer.is_configured() {
        info!(url = %config.summarizer.api_url, "summarizer ready");
    } else {
        warn!("HF_API_TOKEN is not set; summarize requests will fail until it is configured");
    }

    let usage = Arc::new(UsageTracker::new(config.quota.monthly_char_limit));
    let pipeline = SummaryPipeline::new(
        Arc::new(PdfExtractor),
        summarizer,
        usage.clone(),
        config.summarizer.max_chunk_size,
        Duration::from_secs(config.summarizer.request_timeout_secs),
    );
    let rate_limiter = RateLimiter::hourly(config.rate_limit.per_hour);

    Ok(Arc::new(AppState {
        config,
        usage,
        rate_limiter,
        pipeline,
    }))
}
