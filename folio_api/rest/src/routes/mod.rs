use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::{ApiError, ApiIssue};

pub mod contact;
pub mod health;

pub fn internal_server_error(err: impl Into<anyhow::Error>) -> Response {
    let err = err.into();
    tracing::error!("internal server error: {err:#}");
    error(StatusCode::INTERNAL_SERVER_ERROR, ApiError::ServerError)
}

fn validation_error(issues: impl IntoIterator<Item = ApiIssue>) -> Response {
    error(
        StatusCode::UNPROCESSABLE_ENTITY,
        ApiError::Validation {
            issues: issues.into_iter().collect(),
        },
    )
}

fn error(code: StatusCode, error: ApiError) -> Response {
    (code, Json(error)).into_response()
}
