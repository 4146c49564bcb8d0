use axum::{http::StatusCode, response::Json};
use trimflow_utils::{log_error, log_warn, ErrorResponse, TrimflowError};

pub type ApiError = (StatusCode, Json<ErrorResponse>);
pub type ApiResult<T> = Result<T, ApiError>;

/// Map a library error onto its HTTP status and JSON body.
pub fn api_error(error: TrimflowError) -> ApiError {
    let status = StatusCode::from_u16(error.http_status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    if status.is_server_error() {
        log_error!(error, "Request failed");
    } else {
        log_warn!("Request rejected: {}", error);
    }

    (status, Json(ErrorResponse::from(error)))
}

pub fn bad_request(field: &str, message: impl Into<String>) -> ApiError {
    api_error(TrimflowError::validation(field, message))
}
