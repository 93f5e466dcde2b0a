//! The `{success, data, error}` envelope every endpoint answers with.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use hospeda_core::{ErrorResponse, HospedaError};
use serde::{Deserialize, Serialize};
use tracing::error;

/// Response envelope. Exactly one of `data` and `error` is present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorResponse>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn failure(error: ErrorResponse) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

/// Handler error; wraps the domain error so it can become a response.
#[derive(Debug)]
pub struct AppError(pub HospedaError);

impl From<HospedaError> for AppError {
    fn from(err: HospedaError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error_response(&self.0)
    }
}

/// Renders a domain error with its mapped status. 5xx errors are logged here
/// since handlers only propagate them.
pub fn error_response(err: &HospedaError) -> Response {
    if err.is_server_error() {
        error!(code = err.error_code(), "Request failed: {}", err);
    }
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let envelope = ApiResponse::failure(ErrorResponse::from_error(err));
    (status, Json(envelope)).into_response()
}

pub type ApiResult<T> = Result<Json<ApiResponse<T>>, AppError>;

/// 201 with the envelope.
pub type Created<T> = (StatusCode, Json<ApiResponse<T>>);

pub fn ok<T: Serialize>(data: T) -> ApiResult<T> {
    Ok(Json(ApiResponse::success(data)))
}

pub fn created<T: Serialize>(data: T) -> Created<T> {
    (StatusCode::CREATED, Json(ApiResponse::success(data)))
}

/// Deletes answer 204 with an empty body.
pub fn no_content() -> StatusCode {
    StatusCode::NO_CONTENT
}
