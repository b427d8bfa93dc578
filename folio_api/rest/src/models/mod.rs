use serde::Serialize;

pub mod contact;

/// Body of every error response.
#[derive(Debug, Serialize)]
#[serde(tag = "error", rename_all = "snake_case")]
pub enum ApiError {
    Validation { issues: Vec<ApiIssue> },
    ServerError,
}

/// A single rejected input. An empty path refers to the request body as a
/// whole.
#[derive(Debug, Serialize)]
pub struct ApiIssue {
    pub path: Vec<&'static str>,
    pub message: String,
}
