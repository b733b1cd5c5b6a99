use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use base64::{engine::general_purpose::STANDARD, Engine};

use crate::config::BasicCredentials;
use crate::errors::AppError;
use crate::state::AppState;

/// Basic-auth gate for the mutating profile routes.
/// A no-op when no credentials are configured.
pub async fn require_basic_auth(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if let Some(expected) = &state.config.basic_auth {
        check_credentials(request.headers(), expected)?;
    }
    Ok(next.run(request).await)
}

/// Missing header or foreign scheme is `Unauthorized` (triggers a challenge);
/// anything that fails to decode or match is `Forbidden`.
fn check_credentials(headers: &HeaderMap, expected: &BasicCredentials) -> Result<(), AppError> {
    let encoded = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split_once(' '))
        .filter(|(scheme, encoded)| {
            scheme.eq_ignore_ascii_case("Basic") && !encoded.is_empty()
        })
        .map(|(_, encoded)| encoded.trim())
        .ok_or(AppError::Unauthorized)?;

    let decoded = STANDARD
        .decode(encoded)
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .ok_or(AppError::Forbidden)?;

    match decoded.split_once(':') {
        Some((user, pass)) if user == expected.username && pass == expected.password => Ok(()),
        _ => {
            tracing::warn!("Rejected basic-auth credentials");
            Err(AppError::Forbidden)
        }
    }
}
