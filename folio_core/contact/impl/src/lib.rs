use std::sync::Arc;

use folio_core_contact_contracts::{ContactFeatureService, ContactSubmitError};
use folio_di::Build;
use folio_email_contracts::{ContentType, Email, EmailService};
use folio_models::{
    contact::{validation, ContactSubmission, ValidContactSubmission},
    email_address::EmailAddressWithName,
};
use tracing::{debug, info};

#[derive(Debug, Clone, Build)]
pub struct ContactFeatureServiceImpl<Email> {
    email: Email,
    config: ContactFeatureConfig,
}

#[derive(Debug, Clone)]
pub struct ContactFeatureConfig {
    /// The site owner, who receives the notifications.
    pub recipient: Arc<EmailAddressWithName>,
}

impl<EmailS> ContactFeatureService for ContactFeatureServiceImpl<EmailS>
where
    EmailS: EmailService,
{
    async fn submit(&self, submission: ContactSubmission) -> Result<(), ContactSubmitError> {
        let submission = validation::validate_all(&submission).map_err(|errors| {
            debug!(%errors, "rejected contact submission");
            ContactSubmitError::Validation(errors)
        })?;

        let reply_to = submission.email.clone();
        let email = self.notification(submission);

        if !self.email.send(email).await? {
            return Err(ContactSubmitError::Send);
        }

        info!(%reply_to, "delivered contact notification");

        Ok(())
    }
}

impl<EmailS> ContactFeatureServiceImpl<EmailS> {
    fn notification(&self, submission: ValidContactSubmission) -> Email {
        let ValidContactSubmission {
            first_name,
            last_name,
            email,
            message,
        } = submission;

        Email {
            recipient: (*self.config.recipient).clone(),
            subject: format!("Portfolio contact: {} {}", *first_name, *last_name),
            body: format!("{}\n\nReply to: {email}", *message),
            content_type: ContentType::Text,
            reply_to: Some(email.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use folio_demo::{ANA_CRUZ, CONTACT_RECIPIENT, INVALID};
    use folio_email_contracts::MockEmailService;
    use folio_models::contact::{
        validation::{ContactFieldError, ContactFieldErrorKind},
        ContactField,
    };
    use folio_utils::assert_matches;

    use super::*;

    fn config() -> ContactFeatureConfig {
        ContactFeatureConfig {
            recipient: Arc::new(CONTACT_RECIPIENT.clone()),
        }
    }

    fn expected_email() -> Email {
        Email {
            recipient: CONTACT_RECIPIENT.clone(),
            subject: "Portfolio contact: Ana Cruz".into(),
            body: "Hello there\n\nReply to: ana@example.com".into(),
            content_type: ContentType::Text,
            reply_to: Some("ana@example.com".parse().unwrap()),
        }
    }

    #[tokio::test]
    async fn ok() {
        // Arrange
        let email = MockEmailService::new().with_send(expected_email(), true);

        let sut = ContactFeatureServiceImpl {
            email,
            config: config(),
        };

        // Act
        let result = sut.submit(ANA_CRUZ.clone()).await;

        // Assert
        result.unwrap();
    }

    #[tokio::test]
    async fn invalid() {
        // Arrange
        let email = MockEmailService::new();

        let sut = ContactFeatureServiceImpl {
            email,
            config: config(),
        };

        // Act
        let result = sut.submit(INVALID.clone()).await;

        // Assert
        let Err(ContactSubmitError::Validation(errors)) = result else {
            panic!("expected validation error, got {result:?}");
        };
        assert_eq!(
            errors.into_iter().collect::<Vec<_>>(),
            [
                ContactFieldError::new(ContactField::FirstName, ContactFieldErrorKind::Required),
                ContactFieldError::new(ContactField::Email, ContactFieldErrorKind::InvalidEmail),
                ContactFieldError::new(ContactField::Message, ContactFieldErrorKind::Required),
            ]
        );
    }

    #[tokio::test]
    async fn negative_response() {
        // Arrange
        let email = MockEmailService::new().with_send(expected_email(), false);

        let sut = ContactFeatureServiceImpl {
            email,
            config: config(),
        };

        // Act
        let result = sut.submit(ANA_CRUZ.clone()).await;

        // Assert
        assert_matches!(result, Err(ContactSubmitError::Send));
    }

    #[tokio::test]
    async fn transport_failure() {
        // Arrange
        let email =
            MockEmailService::new().with_send_error(expected_email(), "authentication failed");

        let sut = ContactFeatureServiceImpl {
            email,
            config: config(),
        };

        // Act
        let result = sut.submit(ANA_CRUZ.clone()).await;

        // Assert
        assert_matches!(
            result,
            Err(ContactSubmitError::Other(err)) if err.to_string() == "authentication failed"
        );
    }

    #[tokio::test]
    async fn notification_keeps_message_verbatim() {
        // Arrange
        let submission = ContactSubmission {
            first_name: "Jean-Luc".into(),
            last_name: "O'Neil".into(),
            email: "jl@example.org".into(),
            message: "  Line one\nLine two  ".into(),
        };
        let email = MockEmailService::new().with_send(
            Email {
                recipient: CONTACT_RECIPIENT.clone(),
                subject: "Portfolio contact: Jean-Luc O'Neil".into(),
                body: "  Line one\nLine two  \n\nReply to: jl@example.org".into(),
                content_type: ContentType::Text,
                reply_to: Some("jl@example.org".parse().unwrap()),
            },
            true,
        );

        let sut = ContactFeatureServiceImpl {
            email,
            config: config(),
        };

        // Act
        let result = sut.submit(submission).await;

        // Assert
        result.unwrap();
    }
}
