//! Cooperative cancellation for searches.
//!
//! Searches are bounded by depth and width, never by a clock. A caller that no
//! longer wants the result flips the shared stop flag; the engine polls it at
//! every node and unwinds with whatever it has.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cheaply cloneable stop flag shared between a search and whoever started it.
#[derive(Debug, Clone, Default)]
pub struct SearchControl {
    stopped: Arc<AtomicBool>,
}

impl SearchControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the search to stop. Idempotent.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    /// This is a fast atomic load, suitable for calling at every node.
    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }

    /// Re-arm the flag before reusing the control for another search.
    pub fn reset(&self) {
        self.stopped.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
#[path = "control_tests.rs"]
mod control_tests;
