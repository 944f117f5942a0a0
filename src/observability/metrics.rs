//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define service metrics (requests, latency, config reloads, health)
//! - Expose Prometheus-compatible metrics endpoint
//!
//! # Metrics
//! - `booster_http_requests_total` (counter): requests by method, path, status
//! - `booster_http_request_duration_seconds` (histogram): latency distribution
//! - `booster_config_reloads_total` (counter): published configuration changes
//! - `booster_config_fetch_failures_total` (counter): failed fetches by reason
//! - `booster_config_present` (gauge): 1=configuration published, 0=absent
//! - `booster_service_online` (gauge): 1=online, 0=starting or offline
//!
//! # Design Decisions
//! - Recording without an installed exporter is a no-op, so tests need no setup
//! - Paths are the matched route template, not the raw URI

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus exporter with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

pub fn record_request(method: &str, path: &str, status: u16, start: Instant) {
    let method = method.to_string();
    let path = path.to_string();
    let status = status.to_string();
    metrics::counter!(
        "booster_http_requests_total",
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status.clone()
    )
    .increment(1);
    metrics::histogram!(
        "booster_http_request_duration_seconds",
        "method" => method,
        "path" => path,
        "status" => status
    )
    .record(start.elapsed().as_secs_f64());
}

pub fn record_config_reload() {
    metrics::counter!("booster_config_reloads_total").increment(1);
}

pub fn record_fetch_failure(reason: &'static str) {
    metrics::counter!("booster_config_fetch_failures_total", "reason" => reason).increment(1);
}

pub fn record_config_present(present: bool) {
    metrics::gauge!("booster_config_present").set(if present { 1.0 } else { 0.0 });
}

pub fn record_service_online(online: bool) {
    metrics::gauge!("booster_service_online").set(if online { 1.0 } else { 0.0 });
}
