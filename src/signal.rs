// ABOUTME: Write-once cancellation signal shared by every agent in a run.
// ABOUTME: Armed at creation, signaled exactly once, never reset.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A broadcast cancellation flag.
///
/// Clones share the same flag. Observing it is a single atomic load, so
/// agents can poll it at the top of every loop iteration.
#[derive(Clone, Debug, Default)]
pub struct CancellationSignal {
    signaled: Arc<AtomicBool>,
}

impl CancellationSignal {
    /// Create a new signal in the armed state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the signal from armed to signaled.
    ///
    /// Returns true only for the call that performed the transition.
    pub fn signal(&self) -> bool {
        !self.signaled.swap(true, Ordering::AcqRel)
    }

    /// Returns true once the signal has been raised.
    pub fn is_signaled(&self) -> bool {
        self.signaled.load(Ordering::Acquire)
    }
}
