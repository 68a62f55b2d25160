//! Per-client fixed-window rate limiting for the summarize endpoints.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::extract::{ConnectInfo, Request, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::warn;

use crate::state::AppState;

const HOUR: Duration = Duration::from_secs(3600);
/// Expired windows are swept once the table grows past this many clients.
const SWEEP_THRESHOLD: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateDecision {
    pub allowed: bool,
    pub limit: u32,
    pub remaining: u32,
    /// Time until the client's current window resets.
    pub reset_after: Duration,
}

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

/// Counts requests per client key in fixed windows. A limit of 0 disables it.
pub struct RateLimiter {
    limit: u32,
    window: Duration,
    clients: Mutex<HashMap<String, Window>>,
}

impl RateLimiter {
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            limit,
            window,
            clients: Mutex::new(HashMap::new()),
        }
    }

    pub fn hourly(limit: u32) -> Self {
        Self::new(limit, HOUR)
    }

    pub fn check(&self, client: &str) -> RateDecision {
        self.check_at(client, Instant::now())
    }

    /// Count one request from `client` at `now`. Rejected requests do not
    /// extend or consume the window.
    pub fn check_at(&self, client: &str, now: Instant) -> RateDecision {
        if self.limit == 0 {
            return RateDecision {
                allowed: true,
                limit: 0,
                remaining: 0,
                reset_after: Duration::ZERO,
            };
        }

        let mut clients = self.clients.lock().unwrap_or_else(|e| e.into_inner());
        if clients.len() > SWEEP_THRESHOLD {
            let window = self.window;
            clients.retain(|_, w| now.duration_since(w.started) < window);
        }

        let entry = clients.entry(client.to_string()).or_insert(Window {
            started: now,
            count: 0,
        });
        if now.duration_since(entry.started) >= self.window {
            *entry = Window {
                started: now,
                count: 0,
            };
        }

        let reset_after = self.window.saturating_sub(now.duration_since(entry.started));
        if entry.count >= self.limit {
            return RateDecision {
                allowed: false,
                limit: self.limit,
                remaining: 0,
                reset_after,
            };
        }

        entry.count += 1;
        RateDecision {
            allowed: true,
            limit: self.limit,
            remaining: self.limit - entry.count,
            reset_after,
        }
    }
}

/// Client key: first `X-Forwarded-For` hop, else the peer address.
pub fn client_key(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| "unknown".to_string())
}

#[derive(Serialize)]
struct RateLimitBody {
    detail: &'static str,
    error_code: &'static str,
    retry_after: &'static str,
}

/// Middleware guarding the summarize routes.
pub async fn enforce(State(state): State<Arc<AppState>>, request: Request, next: Next) -> Response {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let client = client_key(request.headers(), peer);
    let decision = state.rate_limiter.check(&client);

    if !decision.allowed {
        warn!(client = %client, path = %request.uri().path(), "rate_limit_exceeded");
        let mut response = (
            StatusCode::TOO_MANY_REQUESTS,
            Json(RateLimitBody {
                detail: "Too many requests. Please try again later.",
                error_code: "RATE_LIMIT_EXCEEDED",
                retry_after: "60 minutes",
            }),
        )
            .into_response();
        let headers = response.headers_mut();
        headers.insert("retry-after", HeaderValue::from(HOUR.as_secs()));
        headers.insert("x-ratelimit-limit", HeaderValue::from(decision.limit));
        headers.insert("x-ratelimit-reset", HeaderValue::from(reset_epoch(decision.reset_after)));
        return response;
    }

    let mut response = next.run(request).await;
    if decision.limit > 0 {
        let headers = response.headers_mut();
        headers.insert("x-ratelimit-limit", HeaderValue::from(decision.limit));
        headers.insert("x-ratelimit-remaining", HeaderValue::from(decision.remaining));
    }
    response
}

/// Unix timestamp at which a window that resets in `after` rolls over.
fn reset_epoch(after: Duration) -> i64 {
    chrono::Utc::now().timestamp() + after.as_secs() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_up_to_limit_then_rejects() {
        let limiter = RateLimiter::hourly(3);
        let now = Instant::now();
        let remaining: Vec<u32> = (0..3).map(|_| limiter.check_at("1.2.3.4", now).remaining).collect();
        assert_eq!(remaining, vec![2, 1, 0]);

        let fourth = limiter.check_at("1.2.3.4", now);
        assert!(!fourth.allowed);
        assert_eq!(fourth.reset_after, HOUR);
    }

    #[test]
    fn clients_are_counted_separately() {
        let limiter = RateLimiter::hourly(1);
        let now = Instant::now();
        assert!(limiter.check_at("a", now).allowed);
        assert!(!limiter.check_at("a", now).allowed);
        assert!(limiter.check_at("b", now).allowed);
    }

    #[test]
    fn window_resets_after_it_elapses() {
        let limiter = RateLimiter::new(1, Duration::from_secs(10));
        let start = Instant::now();
        assert!(limiter.check_at("a", start).allowed);
        assert!(!limiter.check_at("a", start + Duration::from_secs(9)).allowed);
        let later = limiter.check_at("a", start + Duration::from_secs(10));
        assert!(later.allowed);
        assert_eq!(later.reset_after, Duration::from_secs(10));
    }

    #[test]
    fn zero_limit_disables_limiting() {
        let limiter = RateLimiter::hourly(0);
        let now = Instant::now();
        assert!((0..100).all(|_| limiter.check_at("a", now).allowed));
    }

    #[test]
    fn client_key_prefers_forwarded_for() {
        let mut headers = HeaderMap::new();
        let peer: SocketAddr = "10.0.0.9:5555".parse().unwrap();
        assert_eq!(client_key(&headers, Some(peer)), "10.0.0.9");
        assert_eq!(client_key(&headers, None), "unknown");

        headers.insert("x-forwarded-for", HeaderValue::from_static("203.0.113.7, 10.0.0.1"));
        assert_eq!(client_key(&headers, Some(peer)), "203.0.113.7");
    }
}
