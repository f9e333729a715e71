// ABOUTME: Run configuration - agent count, run window, seed, and hold bounds.
// ABOUTME: Loadable from JSON and validated before a ring is built.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::clock::{DEFAULT_MAX_HOLD, DelayPolicy};
use crate::error::ConfigError;
use crate::ring::MIN_AGENTS;

pub const DEFAULT_AGENT_COUNT: usize = 5;
pub const DEFAULT_RUN_DURATION_MS: u64 = 5_000;
pub const DEFAULT_MAX_HOLD_MS: u64 = DEFAULT_MAX_HOLD.as_millis() as u64;

/// Configuration for a single coordinated run.
///
/// Missing fields in a JSON document fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DiningConfig {
    /// Number of agents, and therefore resources, in the ring.
    pub agent_count: usize,

    /// How long agents run before cancellation is signaled.
    pub run_duration_ms: u64,

    /// Seed for think/eat durations. A random seed is drawn when absent.
    pub seed: Option<u64>,

    /// Upper bound for one thinking hold.
    pub max_think_ms: u64,

    /// Upper bound for one eating hold.
    pub max_eat_ms: u64,
}

impl Default for DiningConfig {
    fn default() -> Self {
        Self {
            agent_count: DEFAULT_AGENT_COUNT,
            run_duration_ms: DEFAULT_RUN_DURATION_MS,
            seed: None,
            max_think_ms: DEFAULT_MAX_HOLD_MS,
            max_eat_ms: DEFAULT_MAX_HOLD_MS,
        }
    }
}

impl DiningConfig {
    pub fn new(agent_count: usize) -> Self {
        Self {
            agent_count,
            ..Self::default()
        }
    }

    /// Parse a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn with_agent_count(mut self, agent_count: usize) -> Self {
        self.agent_count = agent_count;
        self
    }

    pub fn with_run_duration(mut self, duration: Duration) -> Self {
        self.run_duration_ms = duration.as_millis() as u64;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_max_think(mut self, max: Duration) -> Self {
        self.max_think_ms = max.as_millis() as u64;
        self
    }

    pub fn with_max_eat(mut self, max: Duration) -> Self {
        self.max_eat_ms = max.as_millis() as u64;
        self
    }

    pub fn run_duration(&self) -> Duration {
        Duration::from_millis(self.run_duration_ms)
    }

    /// Check the configuration without building anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.agent_count < MIN_AGENTS {
            return Err(ConfigError::AgentCount {
                count: self.agent_count,
            });
        }
        Ok(())
    }

    /// Delay policy for this run, using `seed` for reproducibility.
    pub fn delay_policy(&self, seed: u64) -> DelayPolicy {
        DelayPolicy::new(
            seed,
            Duration::from_millis(self.max_think_ms),
            Duration::from_millis(self.max_eat_ms),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = DiningConfig::default();
        assert_eq!(config.agent_count, 5);
        assert_eq!(config.run_duration(), Duration::from_secs(5));
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_single_agent() {
        let err = DiningConfig::new(1).validate().unwrap_err();
        assert!(matches!(err, ConfigError::AgentCount { count: 1 }));
        assert!(err.to_string().contains("at least 2"));
    }

    #[test]
    fn test_builder_setters() {
        let config = DiningConfig::default()
            .with_agent_count(3)
            .with_run_duration(Duration::from_millis(250))
            .with_seed(11)
            .with_max_think(Duration::from_millis(4))
            .with_max_eat(Duration::ZERO);

        assert_eq!(config.agent_count, 3);
        assert_eq!(config.run_duration_ms, 250);
        assert_eq!(config.seed, Some(11));
        assert_eq!(
            config.delay_policy(11),
            DelayPolicy::new(11, Duration::from_millis(4), Duration::ZERO)
        );
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = DiningConfig::from_json_str(r#"{"agent_count": 10, "seed": 3}"#).unwrap();
        assert_eq!(config.agent_count, 10);
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.run_duration_ms, DEFAULT_RUN_DURATION_MS);
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err = DiningConfig::from_json_str("{agent_count:").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"agent_count": 2, "run_duration_ms": 100}}"#).unwrap();

        let config = DiningConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.agent_count, 2);
        assert_eq!(config.run_duration(), Duration::from_millis(100));
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = DiningConfig::from_json_file(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }
}
