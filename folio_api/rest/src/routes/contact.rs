use std::sync::Arc;

use anyhow::anyhow;
use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use folio_core_contact_contracts::{ContactFeatureService, ContactSubmitError};

use super::{internal_server_error, validation_error};
use crate::models::{
    contact::{ApiContactAccepted, ApiContactSubmission},
    ApiIssue,
};

pub fn router(service: Arc<impl ContactFeatureService>) -> Router<()> {
    Router::new()
        .route("/api/contact", routing::post(submit))
        .with_state(service)
}

async fn submit(
    service: State<Arc<impl ContactFeatureService>>,
    body: Result<Json<ApiContactSubmission>, JsonRejection>,
) -> Response {
    let Json(submission) = match body {
        Ok(body) => body,
        Err(rejection) => {
            return validation_error([ApiIssue {
                path: Vec::new(),
                message: rejection.body_text(),
            }]);
        }
    };

    match service.submit(submission.into()).await {
        Ok(()) => Json(ApiContactAccepted { ok: true }).into_response(),
        Err(ContactSubmitError::Validation(errors)) => {
            validation_error(errors.iter().map(ApiIssue::from))
        }
        Err(ContactSubmitError::Send) => {
            internal_server_error(anyhow!("mail transport refused the contact notification"))
        }
        Err(ContactSubmitError::Other(err)) => internal_server_error(err),
    }
}
