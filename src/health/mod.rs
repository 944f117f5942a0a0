//! Health reporting subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (listener bound)      → state.rs: Starting → Online
//! Administrative stop (killme)  → state.rs: → Offline
//!
//! state.rs is read by:
//!     → probes.rs liveness (restart decision)
//!     → greeting handler (serve or refuse)
//! probes.rs readiness reads nothing: the process answering is enough
//! ```
//!
//! # Design Decisions
//! - Health is independent of configuration presence
//! - A single atomic; no locks on the request path

pub mod probes;
pub mod state;

pub use state::{HealthState, ServiceStatus};
