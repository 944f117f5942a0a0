//! Static service configuration.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ServiceConfig (validated, immutable)
//!     → consumed once at startup
//! ```
//!
//! The application configuration that changes while the process runs
//! (greeting template, log level) is not here; see [`crate::reload`].
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    AdminConfig, DocumentFormat, FailurePolicy, ListenerConfig, ObservabilityConfig,
    ReloadConfig, ServiceConfig, SourceConfig, SourceKind, TimeoutConfig,
};
