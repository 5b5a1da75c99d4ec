use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use base64::{engine::general_purpose::STANDARD, Engine};

use crate::error::ApiError;
use crate::AppState;

/// Authenticated caller, inserted into request extensions
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub username: String,
}

/// Username and password from an `Authorization: Basic` header
#[derive(Debug, PartialEq, Eq)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

/// HTTP Basic authentication gate; runs before any handler or body extractor
pub async fn basic_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let credentials = extract_basic_credentials(request.headers()).map_err(|msg| {
        tracing::debug!("Rejected request to {}: {}", request.uri().path(), msg);
        ApiError::unauthorized()
    })?;

    // Argon2 verification is CPU-bound; keep it off the async workers
    let store = state.credentials.clone();
    let username = tokio::task::spawn_blocking(move || {
        store.verify(&credentials.username, &credentials.password)
    })
    .await
    .ok()
    .flatten()
    .ok_or_else(|| {
        tracing::warn!("Invalid credentials for request to {}", request.uri().path());
        ApiError::unauthorized()
    })?;

    request.extensions_mut().insert(AuthUser { username });

    Ok(next.run(request).await)
}

/// Extract Basic credentials from the Authorization header
pub fn extract_basic_credentials(headers: &HeaderMap) -> Result<BasicCredentials, String> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    let (scheme, encoded) = auth_str
        .split_once(' ')
        .ok_or_else(|| "Authorization header must use Basic format".to_string())?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return Err("Authorization header must use Basic format".to_string());
    }

    let decoded = STANDARD
        .decode(encoded.trim())
        .map_err(|_| "Invalid base64 in Basic credentials".to_string())?;
    let decoded = String::from_utf8(decoded).map_err(|_| "Basic credentials are not UTF-8".to_string())?;

    let (username, password) = decoded
        .split_once(':')
        .ok_or_else(|| "Basic credentials missing ':' separator".to_string())?;

    Ok(BasicCredentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}
