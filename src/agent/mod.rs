// ABOUTME: Agent module - the concurrent tasks competing for ring resources.
// ABOUTME: Provides the Agent state machine, its phases, and the shared status handle.

mod diner;
mod phase;

pub use diner::{Agent, AgentContext, AgentSummary};
pub use phase::{AgentPhase, AgentStatus};
