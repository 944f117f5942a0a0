//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, timeout, tracing, metrics)
//!     → greeting.rs        reads SharedConfig + HealthState
//!     → health::probes     reads HealthState
//!     → admin              writes HealthState
//!     → name               reads/writes the name toggle
//!     → store              product CRUD
//!     → error.rs (uniform JSON error bodies)
//! ```

pub mod error;
pub mod greeting;
pub mod server;

pub use error::{ApiError, ErrorResponse};
pub use server::{build_router, AppState, HttpServer};
