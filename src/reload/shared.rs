//! The published configuration seen by request handlers.

use std::sync::Arc;

use arc_swap::ArcSwapOption;

use crate::reload::snapshot::ConfigSnapshot;

/// Lock-free holder of the latest published snapshot.
///
/// Clones share the same slot. Readers get either a complete snapshot or
/// nothing; a publish swaps the whole pointer.
#[derive(Debug, Clone, Default)]
pub struct SharedConfig {
    inner: Arc<ArcSwapOption<ConfigSnapshot>>,
}

impl SharedConfig {
    /// Create an empty holder (nothing fetched yet).
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently published snapshot, if any.
    pub fn read(&self) -> Option<Arc<ConfigSnapshot>> {
        self.inner.load_full()
    }

    pub fn is_present(&self) -> bool {
        self.inner.load().is_some()
    }

    /// Replace the visible value. Only the reloader calls this.
    pub(crate) fn publish(&self, snapshot: Option<Arc<ConfigSnapshot>>) {
        self.inner.store(snapshot);
    }
}
