use folio_models::contact::{validation::ContactFieldError, ContactSubmission};
use serde::{Deserialize, Serialize};

use super::ApiIssue;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiContactSubmission {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub message: String,
}

impl From<ApiContactSubmission> for ContactSubmission {
    fn from(value: ApiContactSubmission) -> Self {
        Self {
            first_name: value.first_name,
            last_name: value.last_name,
            email: value.email,
            message: value.message,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiContactAccepted {
    pub ok: bool,
}

impl From<&ContactFieldError> for ApiIssue {
    fn from(value: &ContactFieldError) -> Self {
        Self {
            path: vec![value.field.as_str()],
            message: value.message().into(),
        }
    }
}
