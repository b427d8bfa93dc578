use std::future::Future;

use folio_models::contact::ContactSubmission;
use thiserror::Error;

/// Client of the contact endpoint.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactApiService: Send + Sync + 'static {
    fn submit(
        &self,
        submission: &ContactSubmission,
    ) -> impl Future<Output = Result<(), ContactApiSubmitError>> + Send;
}

#[derive(Debug, Error)]
pub enum ContactApiSubmitError {
    #[error("The server rejected the submission.")]
    Rejected(Vec<ContactApiIssue>),
    #[error("The server failed to process the submission (status {0}).")]
    ServerError(u16),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// A problem the server found with a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactApiIssue {
    /// The field the issue belongs to, empty if the payload could not be
    /// parsed at all.
    pub path: Vec<String>,
    pub message: String,
}

#[cfg(feature = "mock")]
impl MockContactApiService {
    pub fn with_submit(
        mut self,
        submission: ContactSubmission,
        result: Result<(), ContactApiSubmitError>,
    ) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(submission))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}
