//! Configuration sources.
//!
//! A source hands out whole snapshots on demand and may fail at any time.
//! Nothing here caches or retries; that is the reloader's job.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;

use crate::config::{DocumentFormat, SourceConfig, SourceKind};
use crate::reload::snapshot::ConfigSnapshot;

/// Why a fetch produced no snapshot.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The source does not exist (deleted file, 404, unset memory source).
    #[error("configuration source not found: {0}")]
    NotFound(String),
    /// The source could not be reached or read.
    #[error("transport error: {0}")]
    Transport(String),
    /// The document was read but is not a valid flat mapping.
    #[error("malformed configuration document: {0}")]
    Malformed(String),
    /// The fetch did not complete in time.
    #[error("fetch timed out after {0} ms")]
    Timeout(u64),
}

impl FetchError {
    /// Short label used for metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            FetchError::NotFound(_) => "not_found",
            FetchError::Transport(_) => "transport",
            FetchError::Malformed(_) => "malformed",
            FetchError::Timeout(_) => "timeout",
        }
    }

    /// True for failures that may go away on their own.
    pub fn is_transient(&self) -> bool {
        matches!(self, FetchError::Transport(_) | FetchError::Timeout(_))
    }
}

/// A provider of configuration snapshots.
#[async_trait]
pub trait ConfigSource: Send + Sync {
    /// Fetch the current snapshot.
    async fn fetch(&self) -> Result<ConfigSnapshot, FetchError>;

    /// Human-readable description for logs.
    fn describe(&self) -> String;
}

/// Parse a document in the given format into a snapshot.
pub fn parse_document(format: DocumentFormat, text: &str) -> Result<ConfigSnapshot, FetchError> {
    if text.trim().is_empty() {
        return Ok(ConfigSnapshot::default());
    }

    let document: Value = match format {
        DocumentFormat::Yaml => {
            serde_yaml::from_str(text).map_err(|e| FetchError::Malformed(e.to_string()))?
        }
        DocumentFormat::Toml => {
            toml::from_str(text).map_err(|e| FetchError::Malformed(e.to_string()))?
        }
        DocumentFormat::Json => {
            serde_json::from_str(text).map_err(|e| FetchError::Malformed(e.to_string()))?
        }
    };

    ConfigSnapshot::from_document(document)
        .ok_or_else(|| FetchError::Malformed("top level is not a mapping".to_string()))
}

fn format_from_extension(path: &Path) -> DocumentFormat {
    match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => DocumentFormat::Toml,
        Some("json") => DocumentFormat::Json,
        _ => DocumentFormat::Yaml,
    }
}

fn format_from_content_type(content_type: Option<&str>) -> DocumentFormat {
    match content_type {
        Some(ct) if ct.contains("json") => DocumentFormat::Json,
        Some(ct) if ct.contains("toml") => DocumentFormat::Toml,
        _ => DocumentFormat::Yaml,
    }
}

/// Reads a document from a file, e.g. a ConfigMap mounted as a volume.
#[derive(Debug, Clone)]
pub struct FileConfigSource {
    path: PathBuf,
    format: DocumentFormat,
}

impl FileConfigSource {
    pub fn new(path: impl Into<PathBuf>, format: Option<DocumentFormat>) -> Self {
        let path = path.into();
        let format = format.unwrap_or_else(|| format_from_extension(&path));
        Self { path, format }
    }
}

#[async_trait]
impl ConfigSource for FileConfigSource {
    async fn fetch(&self) -> Result<ConfigSnapshot, FetchError> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(FetchError::NotFound(self.path.display().to_string()));
            }
            Err(e) => return Err(FetchError::Transport(e.to_string())),
        };
        parse_document(self.format, &text)
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}

/// Fetches a document with an HTTP GET.
#[derive(Debug, Clone)]
pub struct HttpConfigSource {
    client: reqwest::Client,
    url: String,
    format: Option<DocumentFormat>,
}

impl HttpConfigSource {
    pub fn new(url: impl Into<String>, format: Option<DocumentFormat>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            format,
        }
    }

    /// Use a preconfigured client (proxy, TLS or pool settings).
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }
}

#[async_trait]
impl ConfigSource for HttpConfigSource {
    async fn fetch(&self) -> Result<ConfigSnapshot, FetchError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND || status == StatusCode::GONE {
            return Err(FetchError::NotFound(self.url.clone()));
        }
        if !status.is_success() {
            return Err(FetchError::Transport(format!("{} returned {}", self.url, status)));
        }

        let format = self.format.unwrap_or_else(|| {
            format_from_content_type(
                response
                    .headers()
                    .get(reqwest::header::CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok()),
            )
        });
        let text = response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        parse_document(format, &text)
    }

    fn describe(&self) -> String {
        format!("http:{}", self.url)
    }
}

/// In-process source whose content is set directly.
///
/// Clones share the same content, so an embedding program can hold one
/// handle while the reloader polls another. Not selectable from the
/// service config file; pass it to `Application::build` directly.
#[derive(Debug, Clone, Default)]
pub struct MemoryConfigSource {
    current: Arc<RwLock<Option<ConfigSnapshot>>>,
}

impl MemoryConfigSource {
    pub fn new(initial: Option<ConfigSnapshot>) -> Self {
        Self {
            current: Arc::new(RwLock::new(initial)),
        }
    }

    /// Replace the content served by the source.
    pub fn set(&self, snapshot: ConfigSnapshot) {
        *self.current.write().unwrap_or_else(|e| e.into_inner()) = Some(snapshot);
    }

    /// Make the source behave as deleted.
    pub fn delete(&self) {
        *self.current.write().unwrap_or_else(|e| e.into_inner()) = None;
    }
}

#[async_trait]
impl ConfigSource for MemoryConfigSource {
    async fn fetch(&self) -> Result<ConfigSnapshot, FetchError> {
        self.current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
            .ok_or_else(|| FetchError::NotFound("memory".to_string()))
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

/// Build the source described by the service configuration.
pub fn build_source(config: &SourceConfig) -> Arc<dyn ConfigSource> {
    match config.kind {
        SourceKind::File => Arc::new(FileConfigSource::new(
            config.path.clone().unwrap_or_default(),
            config.format,
        )),
        SourceKind::Http => Arc::new(HttpConfigSource::new(
            config.url.clone().unwrap_or_default(),
            config.format,
        )),
    }
}
