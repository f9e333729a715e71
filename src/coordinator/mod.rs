// ABOUTME: Coordinator module for running a ring of agents to completion.
// ABOUTME: Contains the run coordinator and the report it returns.

mod coordinator;
mod report;

pub use coordinator::Coordinator;
pub use report::{ResourceSummary, RunReport};
