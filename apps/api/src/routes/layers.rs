use std::time::Duration;

use axum::{
    error_handling::HandleErrorLayer,
    http::{header, HeaderValue, Method, StatusCode},
    BoxError, Json, Router,
};
use serde_json::{json, Value};
use tower::{buffer::BufferLayer, limit::RateLimitLayer, load_shed::LoadShedLayer, ServiceBuilder};
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::config::Config;

const BUFFER_CAPACITY: usize = 1024;

/// Wraps the router in the HTTP middleware stack: tracing, CORS,
/// security headers and the global rate limit.
pub fn with_http_layers(router: Router, config: &Config) -> Router {
    // `Router::layer` wraps each route on its own; the limiter wraps the
    // whole router instead so every route draws from one budget.
    let limited = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(handle_middleware_error))
        .layer(BufferLayer::new(BUFFER_CAPACITY))
        .layer(LoadShedLayer::new())
        .layer(RateLimitLayer::new(
            config.rate_limit_per_minute.max(1),
            Duration::from_secs(60),
        ))
        .service(router);

    Router::new()
        .fallback_service(limited)
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ))
        .layer(cors_layer(&config.cors_origins))
        .layer(TraceLayer::new_for_http())
}

/// Explicit origins allow credentials; with none configured the layer is
/// permissive and credentials are not allowed.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{o}'");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

async fn handle_middleware_error(err: BoxError) -> (StatusCode, Json<Value>) {
    if err.is::<tower::load_shed::error::Overloaded>() {
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({
                "error": { "code": "RATE_LIMITED", "message": "Too many requests" }
            })),
        );
    }

    tracing::error!("Middleware error: {err}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": { "code": "INTERNAL_ERROR", "message": err.to_string() }
        })),
    )
}
