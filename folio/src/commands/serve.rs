use folio_config::Config;
use folio_di::Provide;
use folio_email_contracts::EmailService;
use tracing::{info, warn};

use crate::{
    email,
    environment::{types::RestServer, ConfigProvider, Provider},
};

pub async fn serve(config: Config) -> anyhow::Result<()> {
    info!(
        "Connecting to smtp server {}:{}",
        config.email.smtp.host, config.email.smtp.port
    );
    let email = email::connect(&config.email).await?;
    if let Err(err) = email.ping().await {
        warn!("smtp server is not reachable yet: {err:#}");
    }

    let config_provider = ConfigProvider::new(&config)?;
    let mut provider = Provider::new(config_provider, email);
    let server: RestServer = provider.provide();
    server.serve().await
}
