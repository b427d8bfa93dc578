//! Acceptance rules of the contact form.
//!
//! These functions are the only place where the rules are encoded. The form
//! uses [`validate_field`] on blur and [`validate_all`] on submit, and the
//! server runs [`validate_all`] again on every request without trusting the
//! client.
//!
//! For every field the rules are checked in order (presence, then pattern or
//! format, then length) and the first failing rule decides the error.

use std::{fmt, sync::LazyLock};

use regex::Regex;

use super::{
    ContactField, ContactMessageContent, ContactName, ContactSubmission, ValidContactSubmission,
};
use crate::email_address::EmailAddress;

pub const MAX_MESSAGE_WORDS: usize = 1000;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactFieldErrorKind {
    Required,
    InvalidCharacters,
    InvalidEmail,
    TooManyWords,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContactFieldError {
    pub field: ContactField,
    pub kind: ContactFieldErrorKind,
}

impl ContactFieldError {
    pub fn new(field: ContactField, kind: ContactFieldErrorKind) -> Self {
        Self { field, kind }
    }

    /// The message shown next to the field.
    pub fn message(&self) -> &'static str {
        use ContactField as F;
        use ContactFieldErrorKind as K;

        match (self.field, self.kind) {
            (F::FirstName, K::Required) => "First name is required",
            (F::LastName, K::Required) => "Last name is required",
            (F::Email, K::Required) => "Email is required",
            (F::Message, K::Required) => "Message is required",
            (_, K::InvalidCharacters) => "Only alphabetic characters allowed",
            (_, K::InvalidEmail) => "Invalid email address",
            (_, K::TooManyWords) => "Message must be 1000 words or fewer",
        }
    }
}

impl fmt::Display for ContactFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for ContactFieldError {}

/// The errors of all failing fields, in field declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactValidationErrors(Vec<ContactFieldError>);

impl ContactValidationErrors {
    pub fn iter(&self) -> impl Iterator<Item = &ContactFieldError> {
        self.0.iter()
    }

    pub fn get(&self, field: ContactField) -> Option<&ContactFieldError> {
        self.0.iter().find(|err| err.field == field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for ContactValidationErrors {
    type Item = ContactFieldError;
    type IntoIter = std::vec::IntoIter<ContactFieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for ContactValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", err.field, err.message())?;
        }
        Ok(())
    }
}

impl std::error::Error for ContactValidationErrors {}

/// Checks a single field in isolation.
pub fn validate_field(field: ContactField, value: &str) -> Result<(), ContactFieldError> {
    match field {
        ContactField::FirstName | ContactField::LastName => parse_name(field, value).map(drop),
        ContactField::Email => parse_email(value).map(drop),
        ContactField::Message => parse_message(value).map(drop),
    }
}

/// Checks every field of the submission.
///
/// Returns one error per failing field, so the caller can report all of them
/// at once.
pub fn validate_all(
    submission: &ContactSubmission,
) -> Result<ValidContactSubmission, ContactValidationErrors> {
    let first_name = parse_name(ContactField::FirstName, &submission.first_name);
    let last_name = parse_name(ContactField::LastName, &submission.last_name);
    let email = parse_email(&submission.email);
    let message = parse_message(&submission.message);

    match (first_name, last_name, email, message) {
        (Ok(first_name), Ok(last_name), Ok(email), Ok(message)) => Ok(ValidContactSubmission {
            first_name,
            last_name,
            email,
            message,
        }),
        (first_name, last_name, email, message) => Err(ContactValidationErrors(
            [
                first_name.err(),
                last_name.err(),
                email.err(),
                message.err(),
            ]
            .into_iter()
            .flatten()
            .collect(),
        )),
    }
}

/// Counts the whitespace separated words of a message.
pub fn count_words(message: &str) -> usize {
    message.split_whitespace().count()
}

pub(super) fn is_valid_message(message: &str) -> bool {
    (1..=MAX_MESSAGE_WORDS).contains(&count_words(message))
}

fn parse_name(field: ContactField, value: &str) -> Result<ContactName, ContactFieldError> {
    if value.is_empty() {
        return Err(ContactFieldError::new(field, ContactFieldErrorKind::Required));
    }

    ContactName::try_new(value.to_owned())
        .map_err(|_| ContactFieldError::new(field, ContactFieldErrorKind::InvalidCharacters))
}

fn parse_email(value: &str) -> Result<EmailAddress, ContactFieldError> {
    let error = |kind| ContactFieldError::new(ContactField::Email, kind);

    if value.is_empty() {
        return Err(error(ContactFieldErrorKind::Required));
    }

    if value.starts_with('.') || value.contains("..") || !EMAIL_REGEX.is_match(value) {
        return Err(error(ContactFieldErrorKind::InvalidEmail));
    }

    value
        .parse()
        .map_err(|_| error(ContactFieldErrorKind::InvalidEmail))
}

fn parse_message(value: &str) -> Result<ContactMessageContent, ContactFieldError> {
    let error = |kind| ContactFieldError::new(ContactField::Message, kind);

    if value.trim().is_empty() {
        return Err(error(ContactFieldErrorKind::Required));
    }

    if count_words(value) > MAX_MESSAGE_WORDS {
        return Err(error(ContactFieldErrorKind::TooManyWords));
    }

    ContactMessageContent::try_new(value.to_owned())
        .map_err(|_| error(ContactFieldErrorKind::TooManyWords))
}
