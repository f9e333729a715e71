// ABOUTME: Sinks that consume the agent event stream.
// ABOUTME: NullSink discards events; MemorySink records them in emission order.

use std::sync::{Arc, Mutex};

use super::{Event, Trace};

/// Consumer of agent events.
///
/// `record` is called from agent tasks while they may be holding resources,
/// so implementations must not block for long.
pub trait EventSink: Send + Sync {
    /// Record a single event.
    fn record(&self, event: Event);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn record(&self, _event: Event) {}
}

/// In-memory event recorder.
///
/// Events are kept in the order `record` was called, which gives a single
/// total order across agents for post-hoc analysis.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<Event>>,
}

impl MemorySink {
    /// Create a new empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new recorder wrapped in Arc for sharing.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Copy of everything recorded so far.
    pub fn events(&self) -> Vec<Event> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Build a trace over everything recorded so far.
    pub fn trace(&self) -> Trace {
        Trace::new(self.events())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Event>> {
        // A panicking agent must not hide the events recorded before it.
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl EventSink for MemorySink {
    fn record(&self, event: Event) {
        self.lock().push(event);
    }
}
