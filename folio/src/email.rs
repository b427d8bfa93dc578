use anyhow::Context;
use folio_config::EmailConfig;
use folio_email_impl::{EmailServiceImpl, SmtpCredentials, SmtpTransportConfig};

/// Set up the SMTP transport. Does not open a connection.
pub async fn connect(config: &EmailConfig) -> anyhow::Result<EmailServiceImpl> {
    let smtp = &config.smtp;
    let transport_config = SmtpTransportConfig {
        host: smtp.host.clone(),
        port: smtp.port,
        secure: smtp.secure,
        credentials: smtp.username.clone().map(|username| SmtpCredentials {
            username,
            password: smtp.password.clone().unwrap_or_default(),
        }),
    };

    EmailServiceImpl::new(&transport_config, config.from.clone())
        .await
        .context("Failed to set up SMTP transport")
}
