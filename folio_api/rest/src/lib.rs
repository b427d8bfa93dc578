use std::net::SocketAddr;

use anyhow::Context;
use axum::Router;
use folio_core_contact_contracts::ContactFeatureService;
use folio_core_health_contracts::HealthFeatureService;
use folio_di::Build;
use tokio::net::TcpListener;
use tracing::info;
use url::Url;

mod middlewares;
mod models;
mod routes;


#[derive(Debug, Clone, Build)]
pub struct RestServer<Health, Contact> {
    health: Health,
    contact: Contact,
    config: RestServerConfig,
}

#[derive(Debug, Clone)]
pub struct RestServerConfig {
    pub addr: SocketAddr,
    /// Origins allowed to submit the contact form from a browser. CORS is
    /// disabled if empty.
    pub allowed_origins: Vec<Url>,
}

impl<Health, Contact> RestServer<Health, Contact>
where
    Health: HealthFeatureService,
    Contact: ContactFeatureService,
{
    pub async fn serve(self) -> anyhow::Result<()> {
        let addr = self.config.addr;
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind to {addr}"))?;

        info!("listening on {addr}");

        axum::serve(listener, self.router())
            .await
            .map_err(Into::into)
    }

    fn router(self) -> Router<()> {
        let router = Router::new()
            .merge(routes::health::router(self.health.into()))
            .merge(routes::contact::router(self.contact.into()));

        let router = middlewares::panic_handler::add(router);
        let router = middlewares::cors::add(&self.config.allowed_origins)(router);
        let router = middlewares::trace::add(router);
        middlewares::request_id::add(router)
    }
}
