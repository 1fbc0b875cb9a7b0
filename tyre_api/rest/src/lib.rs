use std::{net::IpAddr, path::PathBuf, sync::Arc};

use anyhow::Context;
use axum::{extract::DefaultBodyLimit, Router};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, services::ServeDir};
use tracing::info;
use tyre_core_contact_contracts::ContactFeatureService;
use tyre_utils::Apply;

mod middlewares;
mod models;
mod routes;

#[derive(Debug, Clone)]
pub struct RestServer<Contact> {
    config: RestServerConfig,
    contact: Contact,
}

#[derive(Debug, Clone)]
pub struct RestServerConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Directory served for every path without a dedicated route.
    pub static_dir: PathBuf,
    /// Maximum request body size in bytes.
    pub body_limit: usize,
}

impl<Contact> RestServer<Contact>
where
    Contact: ContactFeatureService,
{
    pub fn new(config: RestServerConfig, contact: Contact) -> Self {
        Self { config, contact }
    }

    pub async fn serve(self) -> anyhow::Result<()> {
        let listener = TcpListener::bind((self.config.host, self.config.port))
            .await
            .with_context(|| {
                format!(
                    "Failed to bind to {}:{}",
                    self.config.host, self.config.port
                )
            })?;
        self.serve_with(listener).await
    }

    /// Serves on an already bound listener.
    pub async fn serve_with(self, listener: TcpListener) -> anyhow::Result<()> {
        info!("Server running: http://{}", listener.local_addr()?);
        axum::serve(listener, self.router())
            .await
            .map_err(Into::into)
    }

    pub fn router(self) -> Router<()> {
        let RestServerConfig {
            static_dir,
            body_limit,
            ..
        } = self.config;

        Router::new()
            .merge(routes::contact::router(Arc::new(self.contact)))
            .fallback_service(ServeDir::new(static_dir))
            .layer(DefaultBodyLimit::max(body_limit))
            .layer(CorsLayer::permissive())
            .apply(middlewares::panic_handler::add)
            .apply(middlewares::trace::add)
            .apply(middlewares::request_id::add)
    }
}
