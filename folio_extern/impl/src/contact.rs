use std::sync::Arc;

use anyhow::Context;
use folio_extern_contracts::contact::{ContactApiIssue, ContactApiService, ContactApiSubmitError};
use folio_models::contact::ContactSubmission;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use crate::http::HttpClient;

#[derive(Debug, Clone)]
pub struct ContactApiServiceImpl {
    config: ContactApiServiceConfig,
    client: HttpClient,
}

#[derive(Debug, Clone)]
pub struct ContactApiServiceConfig {
    endpoint: Arc<Url>,
}

impl ContactApiServiceConfig {
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

impl ContactApiServiceImpl {
    pub fn new(config: ContactApiServiceConfig) -> Self {
        Self {
            config,
            client: Default::default(),
        }
    }
}

impl ContactApiService for ContactApiServiceImpl {
    async fn submit(&self, submission: &ContactSubmission) -> Result<(), ContactApiSubmitError> {
        let response = self
            .client
            .post((*self.config.endpoint).clone())
            .json(submission)
            .send()
            .await
            .context("Failed to send contact submission")?;

        let status = response.status();
        debug!(%status, "contact endpoint responded");

        if status.is_success() {
            return Ok(());
        }

        if status == StatusCode::UNPROCESSABLE_ENTITY {
            let body = response
                .json::<ValidationErrorResponse>()
                .await
                .context("Failed to parse validation error response")?;
            return Err(ContactApiSubmitError::Rejected(
                body.issues.into_iter().map(Into::into).collect(),
            ));
        }

        warn!(%status, "contact endpoint failed");
        Err(ContactApiSubmitError::ServerError(status.as_u16()))
    }
}

#[derive(Deserialize)]
struct ValidationErrorResponse {
    issues: Vec<Issue>,
}

#[derive(Deserialize)]
struct Issue {
    #[serde(default)]
    path: Vec<String>,
    message: String,
}

impl From<Issue> for ContactApiIssue {
    fn from(value: Issue) -> Self {
        Self {
            path: value.path,
            message: value.message,
        }
    }
}
