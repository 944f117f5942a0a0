use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::health::ServiceStatus;
use crate::http::server::AppState;

/// Acknowledgement returned by the stop endpoint.
pub const STOP_ACK: &str = "Stopping HTTP server, Bye bye world !";

#[derive(Debug, Serialize, Deserialize)]
pub struct SystemStatus {
    pub version: String,
    pub status: ServiceStatus,
    pub config_present: bool,
    pub config_keys: Vec<String>,
}

/// Take the service offline.
///
/// The process keeps running and keeps answering; greetings are refused
/// and the liveness probe fails until the orchestrator restarts it.
pub async fn kill_me(State(state): State<AppState>) -> &'static str {
    state.health.mark_offline();
    STOP_ACK
}

pub async fn get_status(State(state): State<AppState>) -> Json<SystemStatus> {
    let snapshot = state.config.read();
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION").to_string(),
        status: state.health.status(),
        config_present: snapshot.is_some(),
        config_keys: snapshot
            .map(|s| s.keys().map(String::from).collect())
            .unwrap_or_default(),
    })
}
