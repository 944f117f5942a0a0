//! Cloud-native demo service: live configuration reload and health state.

pub mod admin;
pub mod config;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod name;
pub mod observability;
pub mod reload;
pub mod store;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::{Application, Shutdown};
