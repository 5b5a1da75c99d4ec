// HTTP API Error Types
use axum::{
    http::{header, HeaderValue, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};
use sqlx::mysql::MySqlDatabaseError;

use crate::database::manager::DatabaseError;

/// Fixed body for rejected credentials
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized access";

pub const NOT_FOUND_DESCRIPTION: &str = "The requested URL was not found on the server. \
If you entered the URL manually please check your spelling and try again.";

pub const METHOD_NOT_ALLOWED_DESCRIPTION: &str = "The method is not allowed for the requested URL.";

/// HTTP API error; every variant renders through the `{status, data}` envelope
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),

    // 401 Unauthorized
    Unauthorized,

    // 404 Not Found
    NotFound(String),

    // 405 Method Not Allowed
    MethodNotAllowed(String),

    // 500 Internal Server Error (driver-level failures)
    Database(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Underlying description, without the status prefix
    pub fn description(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::Unauthorized => UNAUTHORIZED_MESSAGE,
            ApiError::NotFound(msg) => msg,
            ApiError::MethodNotAllowed(msg) => msg,
            ApiError::Database(msg) => msg,
        }
    }

    /// The `data` string of the envelope: `"<code> <reason>: <description>"`.
    /// Auth failures carry the bare message.
    pub fn message(&self) -> String {
        match self {
            ApiError::Unauthorized => UNAUTHORIZED_MESSAGE.to_string(),
            other => {
                let status = other.status_code();
                format!(
                    "{} {}: {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Error"),
                    other.description()
                )
            }
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        json!({
            "status": self.status_code().as_u16(),
            "data": self.message(),
        })
    }
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn unauthorized() -> Self {
        ApiError::Unauthorized
    }

    pub fn not_found() -> Self {
        ApiError::NotFound(NOT_FOUND_DESCRIPTION.to_string())
    }

    pub fn method_not_allowed() -> Self {
        ApiError::MethodNotAllowed(METHOD_NOT_ALLOWED_DESCRIPTION.to_string())
    }

    pub fn database(message: impl Into<String>) -> Self {
        ApiError::Database(message.into())
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::Sqlx(sqlx_err) => {
                tracing::error!("SQLx error: {}", sqlx_err);
                ApiError::database(driver_message(&sqlx_err))
            }
            other => {
                tracing::error!("Database error: {}", other);
                ApiError::database(other.to_string())
            }
        }
    }
}

/// Raw driver text, e.g. `(1054, "Unknown column 'x' in 'field list'")`
/// for server-side errors, the sqlx display form otherwise.
fn driver_message(err: &sqlx::Error) -> String {
    match err {
        sqlx::Error::Database(db_err) => match db_err.try_downcast_ref::<MySqlDatabaseError>() {
            Some(mysql) => format!("({}, \"{}\")", mysql.number(), mysql.message()),
            None => db_err.message().to_string(),
        },
        other => other.to_string(),
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let mut response = (status, Json(self.to_json())).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static("Basic realm=\"Authentication Required\""),
            );
        }
        response
    }
}
