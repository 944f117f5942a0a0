//! Service health state machine.
//!
//! # States
//! - Starting: process is up, listener not bound yet
//! - Online: listener bound, requests are served
//! - Offline: an operator asked the service to stop serving
//!
//! # State Transitions
//! ```text
//! Starting → Online: listener bound (once)
//! Starting | Online → Offline: administrative stop
//! ```
//! Offline is terminal for the process; recovery is a restart.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::observability::metrics;

const STARTING: u8 = 0;
const ONLINE: u8 = 1;
const OFFLINE: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceStatus {
    Starting,
    Online,
    Offline,
}

/// Shared online/offline flag. Clones observe the same state.
#[derive(Debug, Clone)]
pub struct HealthState {
    state: Arc<AtomicU8>,
}

impl HealthState {
    pub fn new() -> Self {
        Self {
            state: Arc::new(AtomicU8::new(STARTING)),
        }
    }

    /// Move from Starting to Online.
    ///
    /// Returns false if the service was not Starting; an Offline service
    /// stays Offline.
    pub fn mark_online(&self) -> bool {
        let moved = self
            .state
            .compare_exchange(STARTING, ONLINE, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok();
        if moved {
            tracing::info!("Service is online");
            metrics::record_service_online(true);
        }
        moved
    }

    /// Stop serving. Idempotent.
    pub fn mark_offline(&self) {
        let previous = self.state.swap(OFFLINE, Ordering::SeqCst);
        if previous != OFFLINE {
            tracing::warn!("Service marked offline");
            metrics::record_service_online(false);
        }
    }

    pub fn is_online(&self) -> bool {
        self.state.load(Ordering::SeqCst) == ONLINE
    }

    pub fn status(&self) -> ServiceStatus {
        match self.state.load(Ordering::SeqCst) {
            STARTING => ServiceStatus::Starting,
            ONLINE => ServiceStatus::Online,
            _ => ServiceStatus::Offline,
        }
    }
}

impl Default for HealthState {
    fn default() -> Self {
        Self::new()
    }
}
