// ABOUTME: Run coordinator for the ring of agents.
// ABOUTME: Spawns every agent, waits out the run window, signals cancellation, and joins.

use std::future::Future;
use std::sync::Arc;

use tokio::time::Instant;
use tracing::{info, warn};

use super::report::{ResourceSummary, RunReport};
use crate::clock::{Clock, TokioClock};
use crate::config::DiningConfig;
use crate::error::DineError;
use crate::event::{EventSink, NullSink};
use crate::ring::Ring;

/// Coordinator for a single ring run.
///
/// # Shutdown Semantics
///
/// - **Cooperative:** the coordinator only raises the cancellation signal. An
///   agent blocked on a resource or in the middle of eating finishes that
///   cycle before it notices.
/// - **Exactly once:** the signal is raised once per run and never cleared.
/// - **Full join:** `run()` returns only after every agent task has ended,
///   even when one of them failed.
pub struct Coordinator {
    config: DiningConfig,
    clock: Arc<dyn Clock>,
    sink: Arc<dyn EventSink>,
}

impl Coordinator {
    /// Create a coordinator using real time and no event recording.
    pub fn new(config: DiningConfig) -> Self {
        Self {
            config,
            clock: Arc::new(TokioClock),
            sink: Arc::new(NullSink),
        }
    }

    /// Time source for the agents' think and eat holds.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Destination for the agents' event stream.
    pub fn sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Run the ring for the configured window, then shut it down.
    pub async fn run(&self) -> Result<RunReport, DineError> {
        self.run_with_cancel(std::future::pending::<()>()).await
    }

    /// Run the ring until the configured window elapses or `cancel`
    /// completes, whichever comes first, then shut it down.
    ///
    /// Returns `Err(DineError::Config)` before spawning anything if the
    /// configuration is invalid.
    pub async fn run_with_cancel<F>(&self, cancel: F) -> Result<RunReport, DineError>
    where
        F: Future<Output = ()>,
    {
        self.config.validate()?;
        let seed = self.config.seed.unwrap_or_else(rand::random);
        let agent_count = self.config.agent_count;

        let ring = Ring::builder(agent_count)
            .delays(self.config.delay_policy(seed))
            .clock(self.clock.clone())
            .sink(self.sink.clone())
            .build()?;
        let (handle, agents) = ring.into_agents();

        info!(
            agents = agent_count,
            seed,
            duration_ms = self.config.run_duration_ms,
            "starting run"
        );
        let started = Instant::now();
        let tasks: Vec<_> = agents
            .into_iter()
            .map(|agent| tokio::spawn(agent.run()))
            .collect();

        tokio::pin!(cancel);
        let cancelled_early = tokio::select! {
            biased;
            () = &mut cancel => true,
            () = tokio::time::sleep(self.config.run_duration()) => false,
        };

        if handle.signal.signal() {
            info!(cancelled_early, "cancellation signaled");
        }

        let mut summaries = Vec::with_capacity(agent_count);
        let mut failure = None;
        for (index, joined) in futures::future::join_all(tasks).await.into_iter().enumerate() {
            match joined {
                Ok(Ok(summary)) => summaries.push(summary),
                Ok(Err(err)) => {
                    warn!(agent = index, error = %err, "agent stopped on invariant violation");
                    failure.get_or_insert(DineError::Resource(err));
                }
                Err(join_err) => {
                    warn!(agent = index, error = %join_err, "agent task failed");
                    failure.get_or_insert(DineError::AgentPanicked { agent: index });
                }
            }
        }

        if let Some(err) = failure {
            return Err(err);
        }

        let report = RunReport {
            seed,
            elapsed: started.elapsed(),
            cancelled_early,
            agents: summaries,
            resources: handle
                .resources
                .iter()
                .map(|unit| ResourceSummary {
                    index: unit.index(),
                    acquisitions: unit.acquisitions(),
                    peak_occupancy: unit.peak_occupancy(),
                })
                .collect(),
        };

        info!(
            agents = agent_count,
            meals = report.total_meals(),
            elapsed_ms = report.elapsed.as_millis() as u64,
            "all agents finished"
        );
        Ok(report)
    }
}
