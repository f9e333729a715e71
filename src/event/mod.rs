// ABOUTME: Event stream module - phase transitions emitted by agents.
// ABOUTME: Contains the event types, recording sinks, and post-hoc trace analysis.

mod sink;
mod trace;

pub use sink::{EventSink, MemorySink, NullSink};
pub use trace::{Meal, Trace};

/// What happened to an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Entered the thinking phase.
    Thinking,
    /// Took ownership of one of its two resources.
    Acquired { resource: usize },
    /// Holds both resources and started eating.
    Eating { primary: usize, secondary: usize },
    /// About to hand both resources back.
    Released { primary: usize, secondary: usize },
    /// Observed cancellation and stopped.
    Finished,
}

impl EventKind {
    /// Short label used in the textual event stream.
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::Thinking => "thinking",
            EventKind::Acquired { .. } => "acquired",
            EventKind::Eating { .. } => "eating",
            EventKind::Released { .. } => "released",
            EventKind::Finished => "finished",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A single record in the event stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// The agent that emitted the event.
    pub agent: usize,
    /// The transition.
    pub kind: EventKind,
}

impl Event {
    pub fn new(agent: usize, kind: EventKind) -> Self {
        Self { agent, kind }
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            EventKind::Acquired { resource } => {
                write!(f, "agent {} acquired resource {}", self.agent, resource)
            }
            EventKind::Eating { primary, secondary } => write!(
                f,
                "agent {} eating with resources {} and {}",
                self.agent, primary, secondary
            ),
            EventKind::Released { primary, secondary } => write!(
                f,
                "agent {} released resources {} and {}",
                self.agent, primary, secondary
            ),
            kind => write!(f, "agent {} {}", self.agent, kind),
        }
    }
}

#[cfg(test)]
mod trace_test;
