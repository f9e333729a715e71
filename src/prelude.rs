// ABOUTME: Prelude module - convenient imports for common use cases.
// ABOUTME: Use `use ringdine::prelude::*;` to get started quickly.

pub use crate::agent::{Agent, AgentContext, AgentPhase, AgentStatus, AgentSummary};
pub use crate::clock::{AgentDelays, Clock, DelayPolicy, TokioClock, YieldClock};
pub use crate::config::DiningConfig;
pub use crate::coordinator::{Coordinator, ResourceSummary, RunReport};
pub use crate::error::{ConfigError, DineError, ResourceError};
pub use crate::event::{Event, EventKind, EventSink, Meal, MemorySink, NullSink, Trace};
pub use crate::resource::{ResourceGuard, ResourceUnit};
pub use crate::ring::{Ring, RingBuilder, RingHandle, Seat};
pub use crate::signal::CancellationSignal;
