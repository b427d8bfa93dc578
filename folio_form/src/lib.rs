//! Interaction state of the contact form.
//!
//! Typing only updates the draft. Fields are validated when they lose focus
//! and all together when the form is submitted. Only a draft that passes
//! every rule is sent to the server.

use std::collections::BTreeMap;

use folio_extern_contracts::contact::{ContactApiIssue, ContactApiService, ContactApiSubmitError};
use folio_models::contact::{
    validation::{self, ContactValidationErrors},
    ContactField, ContactSubmission,
};
use thiserror::Error;
use tracing::debug;

pub const GENERIC_FAILURE_NOTICE: &str =
    "Something went wrong while sending your message. Please try again later.";

pub const SENT_NOTICE: &str = "Thank you! Your message has been sent.";

/// When a field's error disappears after the user edits the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorClearPolicy {
    /// Keep the error until the field is validated again, on blur or on the
    /// next submit attempt.
    #[default]
    UntilCheckpoint,
    /// Clear the error as soon as the field is edited.
    OnEdit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldStatus {
    #[default]
    Untouched,
    Editing,
    Valid,
    Invalid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitNotice {
    Sent,
    Failed,
}

impl SubmitNotice {
    pub fn message(self) -> &'static str {
        match self {
            Self::Sent => SENT_NOTICE,
            Self::Failed => GENERIC_FAILURE_NOTICE,
        }
    }
}

#[derive(Debug, Error)]
pub enum ContactFormSubmitError {
    #[error("The form contains invalid fields: {0}")]
    Invalid(ContactValidationErrors),
    #[error("The server rejected the submission.")]
    Rejected(Vec<ContactApiIssue>),
    #[error("{GENERIC_FAILURE_NOTICE}")]
    Failed(#[source] ContactApiSubmitError),
}

#[derive(Debug)]
pub struct ContactForm<Api> {
    api: Api,
    policy: ErrorClearPolicy,
    draft: ContactSubmission,
    status: [FieldStatus; ContactField::ALL.len()],
    errors: BTreeMap<ContactField, String>,
    notice: Option<SubmitNotice>,
}

impl<Api> ContactForm<Api>
where
    Api: ContactApiService,
{
    pub fn new(api: Api) -> Self {
        Self::with_policy(api, ErrorClearPolicy::default())
    }

    pub fn with_policy(api: Api, policy: ErrorClearPolicy) -> Self {
        Self {
            api,
            policy,
            draft: ContactSubmission::default(),
            status: Default::default(),
            errors: BTreeMap::new(),
            notice: None,
        }
    }

    pub fn draft(&self) -> &ContactSubmission {
        &self.draft
    }

    pub fn value(&self, field: ContactField) -> &str {
        self.draft.get(field)
    }

    pub fn status(&self, field: ContactField) -> FieldStatus {
        self.status[field as usize]
    }

    /// The error to show next to `field`, if any.
    pub fn error(&self, field: ContactField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// All errors to show, in field order.
    pub fn errors(&self) -> impl Iterator<Item = (ContactField, &str)> {
        self.errors
            .iter()
            .map(|(field, message)| (*field, message.as_str()))
    }

    pub fn notice(&self) -> Option<SubmitNotice> {
        self.notice
    }

    /// Handles a change event. Does not validate.
    pub fn change(&mut self, field: ContactField, value: impl Into<String>) {
        self.draft.set(field, value.into());
        self.status[field as usize] = FieldStatus::Editing;

        if self.policy == ErrorClearPolicy::OnEdit {
            self.errors.remove(&field);
        }
    }

    /// Handles a loss of focus by validating only this field.
    pub fn blur(&mut self, field: ContactField) {
        match validation::validate_field(field, self.draft.get(field)) {
            Ok(()) => {
                self.status[field as usize] = FieldStatus::Valid;
                self.errors.remove(&field);
            }
            Err(err) => {
                self.status[field as usize] = FieldStatus::Invalid;
                self.errors.insert(field, err.message().into());
            }
        }
    }

    /// Validates the whole draft and, if it is valid, sends it to the server.
    ///
    /// Nothing is sent if any field is invalid. The draft is reset after a
    /// successful submission and kept otherwise, so the user can try again.
    pub async fn submit(&mut self) -> Result<(), ContactFormSubmitError> {
        self.notice = None;

        if let Err(errors) = validation::validate_all(&self.draft) {
            debug!(%errors, "contact form is invalid");
            self.errors = errors
                .iter()
                .map(|err| (err.field, err.message().to_owned()))
                .collect();
            for field in ContactField::ALL {
                self.status[field as usize] = match errors.get(field) {
                    Some(_) => FieldStatus::Invalid,
                    None => FieldStatus::Valid,
                };
            }
            return Err(ContactFormSubmitError::Invalid(errors));
        }

        self.errors.clear();
        self.status = [FieldStatus::Valid; ContactField::ALL.len()];

        match self.api.submit(&self.draft).await {
            Ok(()) => {
                debug!("contact form submitted");
                self.draft = ContactSubmission::default();
                self.status = Default::default();
                self.notice = Some(SubmitNotice::Sent);
                Ok(())
            }
            Err(ContactApiSubmitError::Rejected(issues)) => {
                debug!(?issues, "contact form rejected by server");
                self.apply_issues(&issues);
                Err(ContactFormSubmitError::Rejected(issues))
            }
            Err(err) => {
                debug!("contact form submission failed: {err}");
                self.notice = Some(SubmitNotice::Failed);
                Err(ContactFormSubmitError::Failed(err))
            }
        }
    }

    fn apply_issues(&mut self, issues: &[ContactApiIssue]) {
        let mut any_field = false;
        for issue in issues {
            let Some(field) = issue.path.first().and_then(|x| x.parse::<ContactField>().ok())
            else {
                continue;
            };
            any_field = true;
            self.status[field as usize] = FieldStatus::Invalid;
            self.errors
                .entry(field)
                .or_insert_with(|| issue.message.clone());
        }

        if !any_field {
            self.notice = Some(SubmitNotice::Failed);
        }
    }
}
