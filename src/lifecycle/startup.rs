//! Startup orchestration.
//!
//! # Responsibilities
//! - Fetch the dynamic configuration once, before binding
//! - Bind the listener
//! - Start the reload loop and the HTTP server on a shared shutdown signal
//!
//! # Design Decisions
//! - A failed first fetch is not fatal; greetings fail until a fetch succeeds
//! - Bind errors are fatal
//! - The reload loop keeps its own cadence after the first fetch

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use crate::config::ServiceConfig;
use crate::health::HealthState;
use crate::http::{AppState, HttpServer};
use crate::lifecycle::Shutdown;
use crate::observability::ObservabilitySettings;
use crate::reload::{ConfigReloader, ConfigSource, SharedConfig};

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// A fully wired service, bound and ready to run.
pub struct Application {
    listener: TcpListener,
    local_addr: SocketAddr,
    server: HttpServer,
    reloader: ConfigReloader,
    state: AppState,
}

impl Application {
    pub async fn build(
        config: &ServiceConfig,
        source: Arc<dyn ConfigSource>,
        settings: Arc<dyn ObservabilitySettings>,
    ) -> Result<Self, StartupError> {
        let shared = SharedConfig::new();
        let health = HealthState::new();

        let mut reloader = ConfigReloader::new(source, shared.clone(), settings, &config.reload);
        let outcome = reloader.poll_once().await;
        tracing::info!(?outcome, "Initial configuration fetch");

        let state = AppState::new(shared, health).with_admin_key(config.admin.api_key.clone());
        let server = HttpServer::new(
            state.clone(),
            Duration::from_secs(config.timeouts.request_secs),
        );

        let address = config.listener.bind_address.clone();
        let listener = TcpListener::bind(&address)
            .await
            .map_err(|source| StartupError::Bind { address, source })?;
        let local_addr = listener.local_addr()?;

        Ok(Self {
            listener,
            local_addr,
            server,
            reloader,
            state,
        })
    }

    /// Address the listener is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Serve until `shutdown` fires.
    pub async fn run(self, shutdown: Shutdown) -> Result<(), StartupError> {
        let reloader = tokio::spawn(self.reloader.run(shutdown.subscribe()));

        let result = self.server.run(self.listener, shutdown.subscribe()).await;
        if result.is_err() {
            reloader.abort();
        }
        let _ = reloader.await;

        result.map_err(StartupError::from)
    }
}
