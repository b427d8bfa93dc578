use anyhow::{bail, Context};
use clap::Subcommand;
use folio_config::Config;
use folio_extern_impl::contact::{ContactApiServiceConfig, ContactApiServiceImpl};
use folio_form::{ContactForm, ContactFormSubmitError};
use folio_models::contact::ContactField;
use url::Url;

#[derive(Debug, Subcommand)]
pub enum ContactCommand {
    /// Fill in and submit the contact form of a running server
    Send {
        /// Contact endpoint [default: derived from http.address]
        #[arg(long)]
        endpoint: Option<Url>,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        message: String,
    },
}

impl ContactCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            ContactCommand::Send {
                endpoint,
                first_name,
                last_name,
                email,
                message,
            } => {
                let endpoint = match endpoint {
                    Some(endpoint) => endpoint,
                    None => default_endpoint(&config)?,
                };
                send(endpoint, [first_name, last_name, email, message]).await
            }
        }
    }
}

fn default_endpoint(config: &Config) -> anyhow::Result<Url> {
    format!("http://{}/api/contact", config.http.address)
        .parse()
        .context("Failed to derive contact endpoint from http.address")
}

async fn send(endpoint: Url, values: [String; 4]) -> anyhow::Result<()> {
    let api = ContactApiServiceImpl::new(ContactApiServiceConfig::new(endpoint));
    let mut form = ContactForm::new(api);

    for (field, value) in ContactField::ALL.into_iter().zip(values) {
        form.change(field, value);
        form.blur(field);
    }

    match form.submit().await {
        Ok(()) => {
            if let Some(notice) = form.notice() {
                println!("{}", notice.message());
            }
            Ok(())
        }
        Err(ContactFormSubmitError::Invalid(_) | ContactFormSubmitError::Rejected(_))
            if form.errors().next().is_some() =>
        {
            for (field, message) in form.errors() {
                eprintln!("{field}: {message}");
            }
            bail!("The contact form contains invalid fields")
        }
        Err(err) => Err(err.into()),
    }
}
