//! HTTP middleware implementations

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue, Method},
    middleware::Next,
    response::Response,
};
use std::time::{Duration, Instant};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::CorsConfig;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request ID extension
#[derive(Clone, Debug)]
pub struct RequestId(pub String);

/// Propagates the caller's `x-request-id` or assigns a fresh one
pub async fn request_id_middleware(
    mut request: Request,
    next: Next,
) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    request.extensions_mut().insert(RequestId(request_id.clone()));

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

/// Logging middleware
pub async fn logging_middleware(
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let uri = request.uri().clone();

    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|r| r.0.clone())
        .unwrap_or_else(|| "unknown".to_string());

    let response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status();

    if status.is_success() {
        info!(
            request_id = %request_id,
            method = %method,
            uri = %uri,
            status = status.as_u16(),
            duration_ms = duration.as_millis() as u64,
            "Request completed"
        );
    } else {
        warn!(
            request_id = %request_id,
            method = %method,
            uri = %uri,
            status = status.as_u16(),
            duration_ms = duration.as_millis() as u64,
            "Request failed"
        );
    }

    response
}

/// Build the CORS layer from configuration
pub fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    if !config.enabled {
        return CorsLayer::very_permissive();
    }

    let mut cors = CorsLayer::new();

    // Browsers reject a wildcard origin when credentials are allowed
    if config.allows_any_origin() && !config.allow_credentials {
        cors = cors.allow_origin(Any);
    } else if config.allows_any_origin() {
        cors = cors.allow_origin(AllowOrigin::mirror_request());
    } else {
        let origins: Vec<HeaderValue> = config.allowed_origins.iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(AllowOrigin::list(origins));
    }

    let methods: Vec<Method> = config.allowed_methods.iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    cors = cors.allow_methods(methods);

    let headers: Vec<HeaderName> = config.allowed_headers.iter()
        .filter_map(|h| h.parse().ok())
        .collect();
    cors = cors.allow_headers(headers);

    let exposed: Vec<HeaderName> = config.exposed_headers.iter()
        .filter_map(|h| h.parse().ok())
        .collect();
    cors = cors.expose_headers(exposed);

    if config.allow_credentials {
        cors = cors.allow_credentials(true);
    }

    cors.max_age(Duration::from_secs(config.max_age_seconds))
}
