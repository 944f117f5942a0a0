//! Orchestrator probe endpoints.
//!
//! - readiness: the process answers, nothing else is checked
//! - liveness: healthy only while the service is Online; a failing
//!   liveness probe is what gets the process restarted

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::http::server::AppState;

/// Result of one named check.
#[derive(Debug, Serialize)]
pub struct CheckResult {
    pub id: &'static str,
    pub status: &'static str,
}

/// Aggregated probe report.
#[derive(Debug, Serialize)]
pub struct ProbeReport {
    pub outcome: &'static str,
    pub checks: Vec<CheckResult>,
}

fn up_or_down(ok: bool) -> &'static str {
    if ok {
        "UP"
    } else {
        "DOWN"
    }
}

/// Readiness probe handler. Always 200.
pub async fn readiness() -> &'static str {
    "OK"
}

/// Liveness probe handler.
///
/// Returns 200 while Online, 503 otherwise.
pub async fn liveness(State(state): State<AppState>) -> (StatusCode, Json<ProbeReport>) {
    let online = state.health.is_online();
    let report = ProbeReport {
        outcome: up_or_down(online),
        checks: vec![CheckResult {
            id: "server-online",
            status: up_or_down(online),
        }],
    };

    let status = if online {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(report))
}
