//! Reversible failure switch for the name service.
//!
//! Unlike [`crate::health::HealthState`], this switch can go back and
//! forth: an operator puts the service in failure mode and takes it out
//! again without a restart.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NameState {
    Ok,
    Fail,
}

/// Shared ok/fail flag. Clones observe the same state.
#[derive(Debug, Clone, Default)]
pub struct NameToggle {
    failing: Arc<AtomicBool>,
}

impl NameToggle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch to `state`, returning the previous one.
    pub fn set(&self, state: NameState) -> NameState {
        let was_failing = self.failing.swap(state == NameState::Fail, Ordering::SeqCst);
        let previous = if was_failing { NameState::Fail } else { NameState::Ok };
        if previous != state {
            tracing::warn!(from = ?previous, to = ?state, "Name service state changed");
        }
        previous
    }

    pub fn state(&self) -> NameState {
        if self.failing.load(Ordering::SeqCst) {
            NameState::Fail
        } else {
            NameState::Ok
        }
    }
}
