use std::{net::SocketAddr, path::Path};

use anyhow::Context;
use config::{File, FileFormat};
use folio_models::email_address::{EmailAddress, EmailAddressWithName};
use serde::Deserialize;
use url::Url;

pub use duration::Duration;

mod duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Colon separated list of config files loaded on top of the default one.
pub const CONFIG_PATHS_VAR: &str = "FOLIO_CONFIG";

/// Environment variables recognized as overrides, with the config key they
/// set.
pub const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("SMTP_HOST", "email.smtp.host"),
    ("SMTP_PORT", "email.smtp.port"),
    ("SMTP_SECURE", "email.smtp.secure"),
    ("SMTP_USER", "email.smtp.username"),
    ("SMTP_PASS", "email.smtp.password"),
    ("FROM_EMAIL", "email.from"),
    ("TO_EMAIL", "contact.recipient"),
];

/// Loads the config from the default file, the files in `FOLIO_CONFIG` and
/// the process environment.
pub fn load() -> anyhow::Result<Config> {
    let env = |key: &str| std::env::var(key).ok();

    let mut paths = vec![DEFAULT_CONFIG_PATH.to_owned()];
    if let Some(extra) = env(CONFIG_PATHS_VAR) {
        paths.extend(
            extra
                .split(':')
                .filter(|path| !path.is_empty())
                .map(Into::into),
        );
    }

    load_from(&paths, env)
}

pub fn load_from(
    paths: &[impl AsRef<Path>],
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Config> {
    let builder = paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?;

    ENV_OVERRIDES
        .iter()
        .try_fold(builder, |builder, &(var, key)| {
            builder.set_override_option(key, env(var).filter(|x| !x.is_empty()))
        })?
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub email: EmailConfig,
    pub contact: ContactConfig,
    pub health: HealthConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub address: SocketAddr,
    #[serde(default)]
    pub allowed_origins: Vec<Url>,
}

#[derive(Debug, Deserialize)]
pub struct EmailConfig {
    pub smtp: SmtpConfig,
    pub from: EmailAddressWithName,
}

#[derive(Deserialize)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    /// Use implicit TLS. Otherwise STARTTLS is used if the server offers it.
    pub secure: bool,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl std::fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("secure", &self.secure)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[redacted]"))
            .finish()
    }
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    /// Receives the contact form notifications.
    pub recipient: EmailAddress,
}

#[derive(Debug, Deserialize)]
pub struct HealthConfig {
    pub cache_ttl: Duration,
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn load_default_config() {
        let config = load_from(&[DEFAULT_CONFIG_PATH], no_env).unwrap();

        assert_eq!(config.email.smtp.host, "smtp.mailtrap.io");
        assert_eq!(config.email.smtp.port, 587);
        assert!(!config.email.smtp.secure);
        assert_eq!(config.email.smtp.username, None);
        assert_eq!(config.email.smtp.password, None);
        assert_eq!(config.email.from.email(), "no-reply@example.com");
        assert_eq!(config.contact.recipient.as_str(), "hello@example.com");
        assert_eq!(*config.health.cache_ttl, std::time::Duration::from_secs(10));
    }

    #[test]
    fn env_overrides() {
        let env = HashMap::from([
            ("SMTP_HOST", "mail.example.org"),
            ("SMTP_PORT", "465"),
            ("SMTP_SECURE", "true"),
            ("SMTP_USER", "folio"),
            ("SMTP_PASS", "hunter2"),
            ("FROM_EMAIL", "Folio <site@example.org>"),
            ("TO_EMAIL", "me@example.org"),
        ]);

        let config = load_from(&[DEFAULT_CONFIG_PATH], |key| {
            env.get(key).map(|&x| x.to_owned())
        })
        .unwrap();

        assert_eq!(config.email.smtp.host, "mail.example.org");
        assert_eq!(config.email.smtp.port, 465);
        assert!(config.email.smtp.secure);
        assert_eq!(config.email.smtp.username.as_deref(), Some("folio"));
        assert_eq!(config.email.smtp.password.as_deref(), Some("hunter2"));
        assert_eq!(config.email.from.to_string(), "Folio <site@example.org>");
        assert_eq!(config.contact.recipient.as_str(), "me@example.org");
    }

    #[test]
    fn empty_env_is_unset() {
        let config = load_from(&[DEFAULT_CONFIG_PATH], |key| {
            matches!(key, "SMTP_HOST" | "SMTP_USER" | "TO_EMAIL").then(String::new)
        })
        .unwrap();

        assert_eq!(config.email.smtp.host, "smtp.mailtrap.io");
        assert_eq!(config.email.smtp.username, None);
        assert_eq!(config.contact.recipient.as_str(), "hello@example.com");
    }

    #[test]
    fn invalid_env_override() {
        let result = load_from(&[DEFAULT_CONFIG_PATH], |key| {
            (key == "SMTP_PORT").then(|| "not a port".to_owned())
        });

        assert!(result.is_err());
    }

    #[test]
    fn later_files_override_earlier_ones() {
        let path = std::env::temp_dir().join(format!("folio-config-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            "[http]\naddress = \"0.0.0.0:9000\"\nallowed_origins = [\"https://folio.example\"]\n",
        )
        .unwrap();

        let result = load_from(&[Path::new(DEFAULT_CONFIG_PATH), path.as_path()], no_env);
        std::fs::remove_file(&path).unwrap();
        let config = result.unwrap();

        assert_eq!(config.http.address, "0.0.0.0:9000".parse().unwrap());
        assert_eq!(
            config.http.allowed_origins,
            ["https://folio.example".parse::<Url>().unwrap()]
        );
        assert_eq!(config.email.smtp.host, "smtp.mailtrap.io");
    }

    #[test]
    fn missing_file() {
        let result = load_from(&["/nonexistent/folio.toml"], no_env);

        assert!(result
            .unwrap_err()
            .to_string()
            .contains("/nonexistent/folio.toml"));
    }

    #[test]
    fn password_is_redacted() {
        let config = load_from(&[DEFAULT_CONFIG_PATH], |key| {
            (key == "SMTP_PASS").then(|| "hunter2".to_owned())
        })
        .unwrap();

        assert!(!format!("{config:?}").contains("hunter2"));
    }
}
