use std::env;

use serde::{Deserialize, Serialize};

/// Env key holding the remote inference credential. Only the key is kept in
/// `Config`; the value is resolved on every call.
pub const HF_TOKEN_KEY: &str = "HF_API_TOKEN";

pub const DEFAULT_HF_API_URL: &str =
    "https://router.huggingface.co/hf-inference/models/facebook/bart-large-cnn";

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_u16(profile: &str, key: &str, default: u16) -> u16 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn profiled_env_u32(profile: &str, key: &str, default: u32) -> u32 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn profiled_env_u64(profile: &str, key: &str, default: u64) -> u64 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub server: ServerConfig,
    pub upload: UploadConfig,
    pub summarizer: SummarizerConfig,
    pub quota: QuotaConfig,
    pub rate_limit: RateLimitConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `BRIEFLY_PROFILE`. When set (e.g. `PROD`), every
    /// key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("BRIEFLY_PROFILE", "");
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            server: ServerConfig::from_env_profiled(p),
            upload: UploadConfig::from_env_profiled(p),
            summarizer: SummarizerConfig::from_env_profiled(p),
            quota: QuotaConfig::from_env_profiled(p),
            rate_limit: RateLimitConfig::from_env_profiled(p),
            logging: LoggingConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a redacted summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!("  server:      {}:{}", self.server.host, self.server.port);
        tracing::info!("  cors:        {}", self.server.cors_origins.join(", "));
        tracing::info!("  upload:      max_file_size={}MB", self.upload.max_file_size_mb);
        tracing::info!(
            "  summarizer:  url={}, chunk_size={}, call_timeout={}s, request_timeout={}s, token={}",
            self.summarizer.api_url,
            self.summarizer.max_chunk_size,
            self.summarizer.call_timeout_secs,
            self.summarizer.request_timeout_secs,
            if self.summarizer.is_configured() { "set" } else { "MISSING" },
        );
        tracing::info!("  quota:       monthly_char_limit={}", self.quota.monthly_char_limit);
        tracing::info!("  rate_limit:  {}/hour per client", self.rate_limit.per_hour);
    }

    /// Return a redacted view safe for printing or API responses (no secrets).
    pub fn redacted_summary(&self) -> serde_json::Value {
        serde_json::json!({
            "profile": self.profile_label(),
            "server": {
                "host": self.server.host,
                "port": self.server.port,
                "cors_origins": self.server.cors_origins,
            },
            "upload": { "max_file_size_mb": self.upload.max_file_size_mb },
            "summarizer": {
                "api_url": self.summarizer.api_url,
                "max_chunk_size": self.summarizer.max_chunk_size,
                "call_timeout_secs": self.summarizer.call_timeout_secs,
                "request_timeout_secs": self.summarizer.request_timeout_secs,
                "configured": self.summarizer.is_configured(),
            },
            "quota": { "monthly_char_limit": self.quota.monthly_char_limit },
            "rate_limit": { "per_hour": self.rate_limit.per_hour },
            "logging": { "level": self.logging.level },
        })
    }
}

// ── Server ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
}

impl ServerConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            host: profiled_env_or(p, "HOST", "0.0.0.0"),
            port: profiled_env_u16(p, "PORT", 8000),
            cors_origins: parse_origins(&profiled_env_or(p, "CORS_ORIGINS", "http://localhost:5173")),
        }
    }
}

/// Split a comma-separated origin list, trimming blanks.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|o| o.trim())
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}

// ── Upload ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    pub max_file_size_mb: u32,
}

impl UploadConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            max_file_size_mb: profiled_env_u32(p, "MAX_FILE_SIZE_MB", 10),
        }
    }

    pub fn max_file_bytes(&self) -> usize {
        self.max_file_size_mb as usize * 1024 * 1024
    }
}

// ── Remote summarizer ─────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizerConfig {
    /// Profile used to resolve the credential at call time.
    pub profile: String,
    pub api_url: String,
    /// Per remote call budget.
    pub call_timeout_secs: u64,
    /// End-to-end budget for one summarize request.
    pub request_timeout_secs: u64,
    pub max_chunk_size: usize,
}

impl SummarizerConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            profile: p.to_string(),
            api_url: profiled_env_or(p, "HF_API_URL", DEFAULT_HF_API_URL),
            call_timeout_secs: profiled_env_u64(p, "HF_API_TIMEOUT_SECS", 30),
            request_timeout_secs: profiled_env_u64(p, "REQUEST_TIMEOUT_SECS", 50),
            max_chunk_size: profiled_env_u32(p, "MAX_CHUNK_SIZE", 1000).max(1) as usize,
        }
    }

    /// Current credential value, read from the environment on every call.
    pub fn api_token(&self) -> Option<String> {
        profiled_env_opt(&self.profile, HF_TOKEN_KEY)
    }

    pub fn is_configured(&self) -> bool {
        self.api_token().is_some()
    }
}

// ── Monthly quota ─────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotaConfig {
    pub monthly_char_limit: u64,
}

impl QuotaConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            monthly_char_limit: profiled_env_u64(p, "MONTHLY_CHAR_LIMIT", 30_000),
        }
    }
}

// ── Per-client rate limiting ──────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    pub per_hour: u32,
}

impl RateLimitConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            per_hour: profiled_env_u32(p, "RATE_LIMIT_PER_HOUR", 10),
        }
    }
}

// ── Logging ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
}

impl LoggingConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            level: profiled_env_or(p, "LOG_LEVEL", "info").to_lowercase(),
        }
    }
}
