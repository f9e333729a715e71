// ABOUTME: Defines all error types for the ringdine library using thiserror.
// ABOUTME: Each submodule has its own error enum, unified under DineError.

/// Top-level error type for the ringdine library.
#[derive(Debug, thiserror::Error)]
pub enum DineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),

    #[error("Agent {agent} panicked before terminating")]
    AgentPanicked { agent: usize },
}

/// Errors from building or loading a run configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("agent count must be at least 2, got {count}")]
    AgentCount { count: usize },

    #[error("failed to read config file: {0}")]
    Load(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Invariant violations detected by a resource unit.
///
/// Neither variant is reachable through the ring's acquisition rule; they
/// exist so misuse is reported instead of silently corrupting ownership.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResourceError {
    #[error("agent {agent} already holds resource {resource}")]
    Reentrant { resource: usize, agent: usize },

    #[error("resource {resource} held by agent {holder} was granted to agent {requester}")]
    DoubleHold {
        resource: usize,
        holder: usize,
        requester: usize,
    },
}
