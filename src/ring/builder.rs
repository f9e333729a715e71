// ABOUTME: Ring topology builder - seats N agents between N resources in a cycle.
// ABOUTME: Agent i references resource i as primary and (i+1) mod N as secondary.

use std::sync::Arc;

use crate::agent::{Agent, AgentContext, AgentStatus};
use crate::clock::{Clock, DelayPolicy, TokioClock};
use crate::error::ConfigError;
use crate::event::{EventSink, NullSink};
use crate::resource::ResourceUnit;
use crate::signal::CancellationSignal;

/// Smallest ring that still has two agents sharing two resources.
pub const MIN_AGENTS: usize = 2;

/// How an agent refers to one of its two resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seat {
    /// Resource `i` for agent `i`.
    Primary,
    /// Resource `(i + 1) % N` for agent `i`.
    Secondary,
}

/// A built ring: N resources and N agents bound in a simple cycle.
///
/// Agents are not running yet; take them with [`Ring::into_agents`] and
/// spawn each one.
#[derive(Debug)]
pub struct Ring {
    resources: Vec<Arc<ResourceUnit>>,
    agents: Vec<Agent>,
    statuses: Vec<AgentStatus>,
    signal: CancellationSignal,
}

impl Ring {
    /// Create a builder for a ring of `agent_count` seats.
    pub fn builder(agent_count: usize) -> RingBuilder {
        RingBuilder::new(agent_count)
    }

    /// Build a ring with real-time delays and no event recording.
    pub fn build(agent_count: usize) -> Result<Self, ConfigError> {
        Self::builder(agent_count).build()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn resources(&self) -> &[Arc<ResourceUnit>] {
        &self.resources
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Status handles, indexed by agent.
    pub fn statuses(&self) -> &[AgentStatus] {
        &self.statuses
    }

    /// The signal every agent in this ring observes.
    pub fn signal(&self) -> &CancellationSignal {
        &self.signal
    }

    /// Agents referencing `resource`, with the seat each uses it from.
    pub fn references_to(&self, resource: usize) -> Vec<(usize, Seat)> {
        let mut refs = Vec::new();
        for agent in &self.agents {
            if agent.primary().index() == resource {
                refs.push((agent.index(), Seat::Primary));
            }
            if agent.secondary().index() == resource {
                refs.push((agent.index(), Seat::Secondary));
            }
        }
        refs
    }

    /// Hand the agents over for spawning, keeping the shared resources.
    pub fn into_agents(self) -> (RingHandle, Vec<Agent>) {
        let handle = RingHandle {
            resources: self.resources,
            statuses: self.statuses,
            signal: self.signal,
        };
        (handle, self.agents)
    }
}

/// What stays with the caller once a ring's agents have been spawned.
#[derive(Debug, Clone)]
pub struct RingHandle {
    pub resources: Vec<Arc<ResourceUnit>>,
    pub statuses: Vec<AgentStatus>,
    pub signal: CancellationSignal,
}

/// Builder for [`Ring`].
pub struct RingBuilder {
    agent_count: usize,
    delays: DelayPolicy,
    clock: Arc<dyn Clock>,
    sink: Arc<dyn EventSink>,
    signal: CancellationSignal,
}

impl RingBuilder {
    pub fn new(agent_count: usize) -> Self {
        Self {
            agent_count,
            delays: DelayPolicy::default(),
            clock: Arc::new(TokioClock),
            sink: Arc::new(NullSink),
            signal: CancellationSignal::new(),
        }
    }

    pub fn delays(mut self, delays: DelayPolicy) -> Self {
        self.delays = delays;
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn signal(mut self, signal: CancellationSignal) -> Self {
        self.signal = signal;
        self
    }

    /// Allocate the resources and seat the agents.
    ///
    /// Returns `Err(ConfigError::AgentCount)` when fewer than two agents are
    /// requested.
    pub fn build(self) -> Result<Ring, ConfigError> {
        let n = self.agent_count;
        if n < MIN_AGENTS {
            return Err(ConfigError::AgentCount { count: n });
        }

        let resources: Vec<_> = (0..n).map(|i| Arc::new(ResourceUnit::new(i))).collect();
        let context = AgentContext {
            signal: self.signal.clone(),
            clock: self.clock,
            sink: self.sink,
        };

        let agents: Vec<_> = (0..n)
            .map(|i| {
                Agent::new(
                    i,
                    Arc::clone(&resources[i]),
                    Arc::clone(&resources[(i + 1) % n]),
                    self.delays.delays_for(i),
                    context.clone(),
                )
            })
            .collect();
        let statuses = agents.iter().map(Agent::status).collect();

        Ok(Ring {
            resources,
            agents,
            statuses,
            signal: self.signal,
        })
    }
}
