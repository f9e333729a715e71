// ABOUTME: Agent phase enum and the lock-free status handle shared with the coordinator.
// ABOUTME: Provides phase tracking and meal counting readable from any task.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, AtomicU64, Ordering};

/// The phase an agent is currently in.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AgentPhase {
    /// Initial phase, re-entered after every meal.
    Thinking = 0,
    /// Waiting for the first resource in its acquisition order.
    AcquiringPrimary = 1,
    /// Holding the first resource, waiting for the second.
    AcquiringSecondary = 2,
    /// Holding both resources.
    Eating = 3,
    /// Observed cancellation and stopped.
    Terminated = 4,
}

impl AgentPhase {
    /// Convert from u8 value to AgentPhase.
    fn from_u8(value: u8) -> Self {
        match value {
            0 => AgentPhase::Thinking,
            1 => AgentPhase::AcquiringPrimary,
            2 => AgentPhase::AcquiringSecondary,
            3 => AgentPhase::Eating,
            _ => AgentPhase::Terminated,
        }
    }
}

impl std::fmt::Display for AgentPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgentPhase::Thinking => write!(f, "thinking"),
            AgentPhase::AcquiringPrimary => write!(f, "acquiring-primary"),
            AgentPhase::AcquiringSecondary => write!(f, "acquiring-secondary"),
            AgentPhase::Eating => write!(f, "eating"),
            AgentPhase::Terminated => write!(f, "terminated"),
        }
    }
}

/// Shared, lock-free view of an agent's progress.
///
/// The agent task owns the writer side; clones handed to the coordinator
/// only read.
#[derive(Clone, Debug)]
pub struct AgentStatus {
    /// Atomic phase for lock-free reads.
    phase: Arc<AtomicU8>,
    /// Completed meals.
    meals: Arc<AtomicU64>,
}

impl Default for AgentStatus {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentStatus {
    /// Create a status starting in the Thinking phase.
    pub fn new() -> Self {
        Self {
            phase: Arc::new(AtomicU8::new(AgentPhase::Thinking as u8)),
            meals: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn phase(&self) -> AgentPhase {
        AgentPhase::from_u8(self.phase.load(Ordering::Acquire))
    }

    pub fn meals(&self) -> u64 {
        self.meals.load(Ordering::Acquire)
    }

    pub fn is_terminated(&self) -> bool {
        self.phase() == AgentPhase::Terminated
    }

    pub(crate) fn set_phase(&self, phase: AgentPhase) {
        self.phase.store(phase as u8, Ordering::Release);
    }

    pub(crate) fn record_meal(&self) {
        self.meals.fetch_add(1, Ordering::AcqRel);
    }
}
