//! Configuration schema definitions.
//!
//! This module defines the static configuration of the service process.
//! All types derive Serde traits for deserialization from config files.
//! The *dynamic* application configuration (greeting template, log level)
//! lives in [`crate::reload`] and is fetched at runtime instead.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration for the service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Reload loop settings.
    pub reload: ReloadConfig,

    /// Where the dynamic configuration comes from.
    pub source: SourceConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    pub admin: AdminConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// What the reloader does with the last snapshot when a fetch fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Any failure clears the published configuration.
    #[default]
    Clear,
    /// Transport errors and timeouts keep the last-known-good snapshot.
    /// A missing source still clears it.
    Retain,
}

/// Reload loop configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ReloadConfig {
    /// Poll interval in milliseconds.
    pub interval_ms: u64,

    /// Upper bound on a single fetch in milliseconds.
    pub fetch_timeout_ms: u64,

    /// Behaviour on fetch failure.
    pub on_fetch_error: FailurePolicy,
}

impl Default for ReloadConfig {
    fn default() -> Self {
        Self {
            interval_ms: 2000,
            fetch_timeout_ms: 5000,
            on_fetch_error: FailurePolicy::Clear,
        }
    }
}

/// Kind of configuration source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// A file on disk, typically a mounted ConfigMap.
    #[default]
    File,
    /// A document served over HTTP.
    Http,
}

/// Document format of a configuration source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    Yaml,
    Toml,
    Json,
}

/// Dynamic configuration source settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SourceConfig {
    pub kind: SourceKind,

    /// Path of the document for `file` sources.
    pub path: Option<PathBuf>,

    /// URL of the document for `http` sources.
    pub url: Option<String>,

    /// Explicit format. When unset, inferred from the file extension
    /// (file) or the content type (http), falling back to YAML.
    pub format: Option<DocumentFormat>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::File,
            path: Some(PathBuf::from("config/app-config.yml")),
            url: None,
            format: None,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Initial log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON lines.
    pub json_logs: bool,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Administrative endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AdminConfig {
    /// Bearer token required by the administrative endpoints.
    /// Unset means the endpoints are open.
    pub api_key: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: ServiceConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.reload.interval_ms, 2000);
        assert_eq!(config.reload.on_fetch_error, FailurePolicy::Clear);
        assert_eq!(config.source.kind, SourceKind::File);
        assert!(config.admin.api_key.is_none());
    }

    #[test]
    fn test_partial_sections() {
        let config: ServiceConfig = toml::from_str(
            r#"
            [reload]
            interval_ms = 500
            on_fetch_error = "retain"

            [source]
            kind = "http"
            url = "http://config.local/app"
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.reload.interval_ms, 500);
        assert_eq!(config.reload.fetch_timeout_ms, 5000);
        assert_eq!(config.reload.on_fetch_error, FailurePolicy::Retain);
        assert_eq!(config.source.kind, SourceKind::Http);
        assert_eq!(config.source.format, Some(DocumentFormat::Json));
    }

    #[test]
    fn test_unknown_source_kind_rejected() {
        let result: Result<ServiceConfig, _> = toml::from_str(
            r#"
            [source]
            kind = "memory"
            "#,
        );
        assert!(result.is_err());
    }
}
