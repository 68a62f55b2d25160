//! HTTP router construction.
//!
//! Assembles all Axum routes, middleware, and OpenAPI docs into a single `Router`.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::warn;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::state::AppState;
use crate::{api, middleware, rate_limit};

/// Multipart framing headroom on top of the file cap, so an upload slightly
/// over the cap still reaches the handler and gets a typed rejection.
const MIN_BODY_HEADROOM: usize = 1024 * 1024;

/// Build the complete application router with all routes and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    let body_limit = upload_body_limit(state.config.upload.max_file_bytes());

    let summarize = Router::new()
        .route("/api/summarize", post(api::summarize))
        .route("/api/summarize-stream", post(api::summarize_stream))
        .route_layer(from_fn_with_state(state.clone(), rate_limit::enforce))
        .layer(DefaultBodyLimit::max(body_limit));

    let app = Router::new()
        .route("/api/health", get(api::health))
        .route("/api/usage", get(api::usage))
        .merge(summarize);

    let cors = cors_layer(&state.config.server.cors_origins);

    middleware::with_security_headers(app)
        .layer(cors)
        .with_state(state)
        .merge(Scalar::with_url("/docs", api::doc::ApiDoc::openapi()))
        .layer(from_fn(middleware::request_id))
}

pub fn upload_body_limit(max_file_bytes: usize) -> usize {
    max_file_bytes + max_file_bytes.max(MIN_BODY_HEADROOM)
}

/// CORS for the configured origins. `*` allows any origin; credentials are
/// never allowed.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!(origin = %origin, error = %e, "ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}
