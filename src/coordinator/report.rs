// ABOUTME: Summary returned by the coordinator after every agent has terminated.
// ABOUTME: Collects per-agent meal counts and per-resource occupancy figures.

use std::time::Duration;

use crate::agent::{AgentPhase, AgentSummary};

/// Final figures for one resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceSummary {
    pub index: usize,
    pub acquisitions: u64,
    /// Highest number of simultaneous holders observed. Always 1 or 0.
    pub peak_occupancy: usize,
}

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Seed the think/eat durations were drawn from.
    pub seed: u64,
    /// Wall-clock time from spawn to the last join.
    pub elapsed: Duration,
    /// True when the window was cut short by an external cancel.
    pub cancelled_early: bool,
    pub agents: Vec<AgentSummary>,
    pub resources: Vec<ResourceSummary>,
}

impl RunReport {
    pub fn total_meals(&self) -> u64 {
        self.agents.iter().map(|a| a.meals).sum()
    }

    pub fn all_terminated(&self) -> bool {
        self.agents
            .iter()
            .all(|a| a.phase == AgentPhase::Terminated)
    }

    /// Highest simultaneous occupancy across every resource.
    pub fn max_peak_occupancy(&self) -> usize {
        self.resources
            .iter()
            .map(|r| r.peak_occupancy)
            .max()
            .unwrap_or(0)
    }
}

impl std::fmt::Display for RunReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{} agents finished in {:?} (seed {}, {} meals)",
            self.agents.len(),
            self.elapsed,
            self.seed,
            self.total_meals()
        )?;
        for agent in &self.agents {
            writeln!(f, "  agent {}: {} meals", agent.index, agent.meals)?;
        }
        Ok(())
    }
}
