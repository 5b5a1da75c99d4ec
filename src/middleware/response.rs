use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::{json, Value};

use crate::error::ApiError;

pub const NO_RECORDS_MESSAGE: &str = "No records found";
pub const UPDATED_MESSAGE: &str = "Updated successfully";

/// Wrapper for API responses that renders the `{status, data}` envelope
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub status_code: Option<StatusCode>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a successful API response with default 200 status
    pub fn success(data: T) -> Self {
        Self {
            data,
            status_code: None,
        }
    }

    /// Create an API response with custom status code
    pub fn with_status(data: T, status_code: StatusCode) -> Self {
        Self {
            data,
            status_code: Some(status_code),
        }
    }
}

impl ApiResponse<Value> {
    /// Result rows, or the fixed message when there are none
    pub fn rows(rows: Vec<Vec<Value>>) -> Self {
        if rows.is_empty() {
            Self::success(Value::String(NO_RECORDS_MESSAGE.to_string()))
        } else {
            Self::success(Value::Array(rows.into_iter().map(Value::Array).collect()))
        }
    }

    pub fn updated() -> Self {
        Self::success(Value::String(UPDATED_MESSAGE.to_string()))
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = self.status_code.unwrap_or(StatusCode::OK);

        let data_value = match serde_json::to_value(&self.data) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Failed to serialize response data: {}", e);
                return ApiError::bad_request(format!("Failed to serialize response data: {}", e))
                    .into_response();
            }
        };

        let envelope = json!({
            "status": status.as_u16(),
            "data": data_value
        });

        (status, Json(envelope)).into_response()
    }
}

/// Router-generated 405s have an empty body; give them the envelope.
/// The `Allow` header is carried over.
pub async fn envelope_method_not_allowed(response: Response) -> Response {
    if response.status() != StatusCode::METHOD_NOT_ALLOWED {
        return response;
    }

    let allow = response.headers().get(header::ALLOW).cloned();
    let mut enveloped = ApiError::method_not_allowed().into_response();
    if let Some(allow) = allow {
        enveloped.headers_mut().insert(header::ALLOW, allow);
    }
    enveloped
}

pub type ApiResult<T> = Result<ApiResponse<T>, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn empty_rows_render_no_records_message() {
        let response = ApiResponse::rows(Vec::new()).into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({"status": 200, "data": "No records found"})
        );
    }

    #[tokio::test]
    async fn rows_render_as_arrays() {
        let rows = vec![vec![json!(1), json!("work")], vec![json!(2), Value::Null]];
        let response = ApiResponse::rows(rows).into_response();
        assert_eq!(
            body_json(response).await,
            json!({"status": 200, "data": [[1, "work"], [2, null]]})
        );
    }

    #[tokio::test]
    async fn updated_message() {
        let response = ApiResponse::updated().into_response();
        assert_eq!(
            body_json(response).await,
            json!({"status": 200, "data": "Updated successfully"})
        );
    }

    #[tokio::test]
    async fn custom_status_is_mirrored_in_envelope() {
        let response = ApiResponse::with_status("moved", StatusCode::ACCEPTED).into_response();
        assert_eq!(response.status(), StatusCode::ACCEPTED);
        assert_eq!(body_json(response).await["status"], 202);
    }

    #[tokio::test]
    async fn method_not_allowed_gets_envelope() {
        let raw = Response::builder()
            .status(StatusCode::METHOD_NOT_ALLOWED)
            .header(header::ALLOW, "GET,HEAD")
            .body(axum::body::Body::empty())
            .unwrap();
        let response = envelope_method_not_allowed(raw).await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers().get(header::ALLOW).unwrap(), "GET,HEAD");
        assert_eq!(
            body_json(response).await,
            json!({
                "status": 405,
                "data": "405 Method Not Allowed: The method is not allowed for the requested URL."
            })
        );
    }
}
