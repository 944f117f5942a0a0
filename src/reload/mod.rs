//! Live application configuration.
//!
//! # Data Flow
//! ```text
//! ConfigSource (file / http / memory)
//!     → reloader.rs polls every interval (one poll in flight at most)
//!     → compare with last published snapshot
//!         unchanged → nothing
//!         changed   → publish to SharedConfig, apply log level
//!         failed    → publish absent
//!     → request handlers read SharedConfig without locking
//! ```
//!
//! # Design Decisions
//! - Snapshots are immutable; a change swaps the whole `Arc`
//! - Exactly one writer (the reloader), any number of readers
//! - Derived side effects go through an injected settings trait

pub mod reloader;
pub mod shared;
pub mod snapshot;
pub mod source;

pub use reloader::{ConfigReloader, PollOutcome};
pub use shared::SharedConfig;
pub use snapshot::{render_greeting, ConfigSnapshot};
pub use source::{
    build_source, ConfigSource, FetchError, FileConfigSource, HttpConfigSource, MemoryConfigSource,
};
