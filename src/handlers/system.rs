use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::AppState;

pub const CONNECTED_MESSAGE: &str = "Online Connected to DB";
pub const DISCONNECTED_MESSAGE: &str = "Online Not connected to DB";

/// GET /health - database connectivity probe; always 200
pub async fn health(State(state): State<AppState>) -> ApiResult<&'static str> {
    let message = if state.gateway.is_connected().await {
        CONNECTED_MESSAGE
    } else {
        DISCONNECTED_MESSAGE
    };
    Ok(ApiResponse::success(message))
}

/// GET / - redirect to the health probe
pub async fn root(State(state): State<AppState>) -> Response {
    let location = format!("{}/health", state.route_prefix);
    let mut response = ApiResponse::with_status(location.clone(), StatusCode::FOUND).into_response();
    match location.parse() {
        Ok(value) => {
            response.headers_mut().insert(header::LOCATION, value);
            response
        }
        Err(_) => ApiError::bad_request(format!("Invalid redirect target: {}", location)).into_response(),
    }
}

/// Fallback for unknown paths
pub async fn not_found() -> ApiError {
    ApiError::not_found()
}
