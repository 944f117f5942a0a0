//! Periodic configuration reload.
//!
//! # Responsibilities
//! - Poll the source on a fixed cadence
//! - Detect real changes and publish each one exactly once
//! - Apply derived settings (log level) only on change
//! - Clear the published configuration when the source fails

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::config::{FailurePolicy, ReloadConfig};
use crate::observability::{metrics, ObservabilitySettings};
use crate::reload::shared::SharedConfig;
use crate::reload::snapshot::ConfigSnapshot;
use crate::reload::source::{ConfigSource, FetchError};

/// What a single poll did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// A new snapshot was published.
    Published,
    /// The fetched snapshot matched the published one.
    Unchanged,
    /// The fetch failed and the configuration was cleared.
    Cleared,
    /// The fetch failed transiently and the last snapshot was kept.
    Retained,
}

/// Sole writer of a [`SharedConfig`].
pub struct ConfigReloader {
    source: Arc<dyn ConfigSource>,
    shared: SharedConfig,
    settings: Arc<dyn ObservabilitySettings>,
    interval: Duration,
    fetch_timeout: Duration,
    policy: FailurePolicy,
    last: Option<Arc<ConfigSnapshot>>,
}

impl ConfigReloader {
    pub fn new(
        source: Arc<dyn ConfigSource>,
        shared: SharedConfig,
        settings: Arc<dyn ObservabilitySettings>,
        config: &ReloadConfig,
    ) -> Self {
        Self {
            source,
            shared,
            settings,
            interval: Duration::from_millis(config.interval_ms),
            fetch_timeout: Duration::from_millis(config.fetch_timeout_ms),
            policy: config.on_fetch_error,
            last: None,
        }
    }

    /// Fetch once and reconcile the published configuration.
    pub async fn poll_once(&mut self) -> PollOutcome {
        let fetched = match time::timeout(self.fetch_timeout, self.source.fetch()).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout(self.fetch_timeout.as_millis() as u64)),
        };

        match fetched {
            Ok(snapshot) => self.apply(snapshot),
            Err(error) => self.handle_failure(error),
        }
    }

    fn apply(&mut self, snapshot: ConfigSnapshot) -> PollOutcome {
        if self.last.as_deref() == Some(&snapshot) {
            return PollOutcome::Unchanged;
        }

        let snapshot = Arc::new(snapshot);
        self.shared.publish(Some(Arc::clone(&snapshot)));

        tracing::info!(
            source = %self.source.describe(),
            template = ?snapshot.message(),
            keys = snapshot.len(),
            "New configuration retrieved"
        );

        let level = snapshot.level();
        tracing::info!(level = %level, "New log level");
        if let Err(e) = self.settings.apply_log_level(level) {
            tracing::warn!(level = %level, error = %e, "Could not apply log level");
        }

        metrics::record_config_reload();
        metrics::record_config_present(true);

        self.last = Some(snapshot);
        PollOutcome::Published
    }

    fn handle_failure(&mut self, error: FetchError) -> PollOutcome {
        metrics::record_fetch_failure(error.reason());

        if self.policy == FailurePolicy::Retain && error.is_transient() && self.last.is_some() {
            tracing::warn!(
                source = %self.source.describe(),
                error = %error,
                "Configuration fetch failed, keeping last known configuration"
            );
            return PollOutcome::Retained;
        }

        if self.last.take().is_some() {
            tracing::warn!(
                source = %self.source.describe(),
                error = %error,
                "Configuration fetch failed, configuration cleared"
            );
        } else {
            tracing::debug!(
                source = %self.source.describe(),
                error = %error,
                "Configuration still unavailable"
            );
        }

        self.shared.publish(None);
        metrics::record_config_present(false);
        PollOutcome::Cleared
    }

    /// Poll until shutdown.
    ///
    /// The first tick fires one interval after the call. A poll always
    /// finishes before the next tick is considered, so polls never overlap.
    pub async fn run(mut self, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!(
            interval_ms = self.interval.as_millis() as u64,
            source = %self.source.describe(),
            "Config reloader starting"
        );

        let mut ticker = time::interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.poll_once().await;
                }
                _ = shutdown.recv() => {
                    tracing::info!("Config reloader received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }
}
