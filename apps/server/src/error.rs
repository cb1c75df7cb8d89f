//! HTTP error mapping.
//!
//! Every failure leaving the server is a structured JSON body of the form
//! `{"error": <tag>, "message": <string>}`. Caller mistakes map to 400,
//! upstream dependency failures to 502; the CORS layer applies to error
//! responses as well, so browser callers can always read the body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use quotegate_market_data::GatewayError;
use serde::Serialize;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A query parameter was missing or failed to parse.
    #[error("Missing or invalid query parameter: {0}")]
    BadQuery(&'static str),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match &self {
            ApiError::BadQuery(_) => (StatusCode::BAD_REQUEST, "BAD_QUERY"),
            ApiError::Gateway(e) if e.is_caller_fault() => (StatusCode::BAD_REQUEST, e.kind()),
            ApiError::Gateway(e) => (StatusCode::BAD_GATEWAY, e.kind()),
        };
        let message = self.to_string();
        (status, Json(ErrorBody { error, message })).into_response()
    }
}
