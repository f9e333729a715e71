// ABOUTME: Agent state machine - the think/acquire/eat loop for one ring seat.
// ABOUTME: Applies the even/odd acquisition order and stops on cancellation.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::phase::{AgentPhase, AgentStatus};
use crate::clock::{AgentDelays, Clock};
use crate::error::ResourceError;
use crate::event::{Event, EventKind, EventSink};
use crate::resource::ResourceUnit;
use crate::signal::CancellationSignal;

/// Collaborators shared by every agent in a ring.
#[derive(Clone)]
pub struct AgentContext {
    pub signal: CancellationSignal,
    pub clock: Arc<dyn Clock>,
    pub sink: Arc<dyn EventSink>,
}

/// Final state of an agent after its loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentSummary {
    pub index: usize,
    pub meals: u64,
    pub phase: AgentPhase,
}

/// One seat at the ring.
///
/// `primary` is resource `index`, `secondary` is resource `(index + 1) % N`.
/// Both are fixed for the agent's whole life.
pub struct Agent {
    index: usize,
    primary: Arc<ResourceUnit>,
    secondary: Arc<ResourceUnit>,
    delays: AgentDelays,
    context: AgentContext,
    status: AgentStatus,
}

impl Agent {
    /// Create an agent seated between `primary` and `secondary`.
    pub fn new(
        index: usize,
        primary: Arc<ResourceUnit>,
        secondary: Arc<ResourceUnit>,
        delays: AgentDelays,
        context: AgentContext,
    ) -> Self {
        Self {
            index,
            primary,
            secondary,
            delays,
            context,
            status: AgentStatus::new(),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn primary(&self) -> &Arc<ResourceUnit> {
        &self.primary
    }

    pub fn secondary(&self) -> &Arc<ResourceUnit> {
        &self.secondary
    }

    /// Read-only handle to this agent's phase and meal count.
    pub fn status(&self) -> AgentStatus {
        self.status.clone()
    }

    /// Resource indices in the order this agent acquires them.
    ///
    /// Even agents take their ring-lower neighbour (primary) first, odd
    /// agents take the ring-higher neighbour (secondary) first. Ring position
    /// decides, not the numeric index, so the last seat pairs `N-1` with `0`.
    pub fn acquisition_order(&self) -> [usize; 2] {
        let (first, second) = self.ordered();
        [first.index(), second.index()]
    }

    fn ordered(&self) -> (&Arc<ResourceUnit>, &Arc<ResourceUnit>) {
        if self.index % 2 == 0 {
            (&self.primary, &self.secondary)
        } else {
            (&self.secondary, &self.primary)
        }
    }

    /// Run the think/eat loop until cancellation is observed.
    pub async fn run(mut self) -> Result<AgentSummary, ResourceError> {
        loop {
            self.status.set_phase(AgentPhase::Thinking);
            if self.context.signal.is_signaled() {
                return Ok(self.finish());
            }

            self.emit(EventKind::Thinking);
            let think = self.delays.think();
            self.context.clock.sleep(think).await;

            if let Err(err) = self.dine().await {
                warn!(agent = self.index, error = %err, "resource invariant violated");
                self.status.set_phase(AgentPhase::Thinking);
                self.finish();
                return Err(err);
            }
        }
    }

    /// Acquire both resources in order, eat, release both.
    async fn dine(&mut self) -> Result<(), ResourceError> {
        let (first, second) = {
            let (first, second) = self.ordered();
            (Arc::clone(first), Arc::clone(second))
        };

        self.status.set_phase(AgentPhase::AcquiringPrimary);
        let first_guard = first.acquire(self.index).await?;
        self.emit(EventKind::Acquired {
            resource: first.index(),
        });

        self.status.set_phase(AgentPhase::AcquiringSecondary);
        // On error the first guard drops here and frees the resource.
        let second_guard = second.acquire(self.index).await?;
        self.emit(EventKind::Acquired {
            resource: second.index(),
        });

        let primary = self.primary.index();
        let secondary = self.secondary.index();

        self.status.set_phase(AgentPhase::Eating);
        self.emit(EventKind::Eating { primary, secondary });
        let eat = self.delays.eat();
        self.context.clock.sleep(eat).await;

        self.emit(EventKind::Released { primary, secondary });
        second_guard.release();
        first_guard.release();
        self.status.record_meal();

        Ok(())
    }

    /// Leave the loop from `Thinking`. The finished event is emitted while
    /// the phase still reads `Thinking`.
    fn finish(&self) -> AgentSummary {
        self.emit(EventKind::Finished);
        self.status.set_phase(AgentPhase::Terminated);
        AgentSummary {
            index: self.index,
            meals: self.status.meals(),
            phase: AgentPhase::Terminated,
        }
    }

    fn emit(&self, kind: EventKind) {
        match kind {
            EventKind::Thinking => info!(agent = self.index, "thinking"),
            EventKind::Eating { primary, secondary } => {
                info!(agent = self.index, primary, secondary, "eating")
            }
            EventKind::Finished => {
                info!(agent = self.index, meals = self.status.meals(), "finished")
            }
            EventKind::Acquired { resource } => debug!(agent = self.index, resource, "acquired"),
            EventKind::Released { primary, secondary } => {
                debug!(agent = self.index, primary, secondary, "released")
            }
        }
        self.context.sink.record(Event::new(self.index, kind));
    }
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("index", &self.index)
            .field("primary", &self.primary.index())
            .field("secondary", &self.secondary.index())
            .field("phase", &self.status.phase())
            .finish()
    }
}
