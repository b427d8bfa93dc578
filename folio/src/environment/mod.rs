use std::sync::Arc;

use folio_api_rest::RestServerConfig;
use folio_config::Config;
use folio_core_contact_impl::ContactFeatureConfig;
use folio_core_health_impl::HealthFeatureConfig;
use folio_di::provider;
use types::Email;

pub mod types;

provider! {
    /// The default provider, capable of providing all the dependencies
    pub Provider {
        email: Email,
        ..config: ConfigProvider {
            // API
            RestServerConfig,

            // Core
            ContactFeatureConfig,
            HealthFeatureConfig,
        }
    }
}

impl Provider {
    pub fn new(config: ConfigProvider, email: Email) -> Self {
        Self {
            _cache: Default::default(),
            email,
            config,
        }
    }
}

provider! {
    /// Reduced provider, capable of providing services that only depend on the configuration
    pub ConfigProvider {
        // API
        rest_server_config: RestServerConfig,

        // Core
        contact_feature_config: ContactFeatureConfig,
        health_feature_config: HealthFeatureConfig,
    }
}

impl ConfigProvider {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        // API
        let rest_server_config = RestServerConfig {
            addr: config.http.address,
            allowed_origins: config.http.allowed_origins.clone(),
        };

        // Core
        let contact_feature_config = ContactFeatureConfig {
            recipient: Arc::new(config.contact.recipient.clone().into()),
        };

        let health_feature_config = HealthFeatureConfig {
            cache_ttl: config.health.cache_ttl.into(),
        };

        Ok(Self {
            _cache: Default::default(),

            // API
            rest_server_config,

            // Core
            contact_feature_config,
            health_feature_config,
        })
    }
}

#[cfg(test)]
mod tests {
    use folio_config::DEFAULT_CONFIG_PATH;
    use folio_di::Provide;
    use types::RestServer;

    use super::*;

    #[tokio::test]
    async fn provide_rest_server() {
        let config = folio_config::load_from(&[DEFAULT_CONFIG_PATH], |_| None).unwrap();
        let config_provider = ConfigProvider::new(&config).unwrap();
        let email = crate::email::connect(&config.email).await.unwrap();

        let mut provider = Provider::new(config_provider, email);
        let _: RestServer = provider.provide();
    }
}
