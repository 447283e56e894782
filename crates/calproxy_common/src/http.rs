use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::{CalproxyError, HttpStatusCode};

// Include the client module
pub mod client;

/// Extension trait for CalproxyError to convert it to an Axum HTTP response.
pub trait IntoHttpResponse {
    /// Converts the error into an Axum HTTP response.
    fn into_http_response(self) -> Response;
}

impl IntoHttpResponse for CalproxyError {
    fn into_http_response(self) -> Response {
        // Upstream statuses are forwarded; anything unusable becomes a 502
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::BAD_GATEWAY);

        (status_code, Json(self.body())).into_response()
    }
}

/// Implement IntoResponse for CalproxyError to make it easier to use in Axum handlers.
impl IntoResponse for CalproxyError {
    fn into_response(self) -> Response {
        self.into_http_response()
    }
}

// Extractor rejections are rendered like every other error
impl From<JsonRejection> for CalproxyError {
    fn from(rejection: JsonRejection) -> Self {
        CalproxyError::RequestRejected {
            status: rejection.status().as_u16(),
            message: "Invalid request body".to_string(),
            details: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for CalproxyError {
    fn from(rejection: QueryRejection) -> Self {
        CalproxyError::RequestRejected {
            status: rejection.status().as_u16(),
            message: "Invalid query string".to_string(),
            details: rejection.body_text(),
        }
    }
}

/// Converts a `Result<T, CalproxyError>` into an Axum JSON result.
pub fn handle_json_result<T>(result: Result<T, CalproxyError>) -> Result<Json<T>, Response>
where
    T: serde::Serialize,
{
    result.map(Json).map_err(|err| err.into_response())
}
