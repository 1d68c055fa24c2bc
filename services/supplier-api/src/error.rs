use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use vendora_utils::{ErrorResponse, VendoraError};

/// Axum-facing wrapper so handlers can bubble `VendoraError` with `?` and
/// still produce the shared JSON error body.
#[derive(Debug)]
pub struct ApiError(pub VendoraError);

pub type ApiResult<T> = Result<T, ApiError>;

impl From<VendoraError> for ApiError {
    fn from(error: VendoraError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }
        (status, Json(ErrorResponse::from(self.0))).into_response()
    }
}
