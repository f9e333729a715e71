// ABOUTME: Injectable time source and seeded think/eat duration policy.
// ABOUTME: Lets tests drive agents without wall-clock delays.

use std::time::Duration;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the timed holds an agent performs while thinking and eating.
#[async_trait]
pub trait Clock: Send + Sync {
    /// Hold the calling task for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// Real time, backed by `tokio::time::sleep`.
///
/// A zero duration still yields, so an agent drawing no delay cannot
/// monopolise its worker thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    async fn sleep(&self, duration: Duration) {
        if duration.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(duration).await;
        }
    }
}

/// Ignores the requested duration and only yields to the scheduler.
///
/// Agents still interleave at every hold point, so contention is exercised
/// at full speed.
#[derive(Debug, Default, Clone, Copy)]
pub struct YieldClock;

#[async_trait]
impl Clock for YieldClock {
    async fn sleep(&self, _duration: Duration) {
        tokio::task::yield_now().await;
    }
}

/// Default upper bound for a single think or eat hold.
pub const DEFAULT_MAX_HOLD: Duration = Duration::from_millis(1000);

/// Upper bounds and seed for randomized think/eat durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayPolicy {
    seed: u64,
    max_think: Duration,
    max_eat: Duration,
}

impl Default for DelayPolicy {
    fn default() -> Self {
        Self::new(0, DEFAULT_MAX_HOLD, DEFAULT_MAX_HOLD)
    }
}

impl DelayPolicy {
    /// Create a policy drawing think and eat durations from `[0, max)`.
    pub fn new(seed: u64, max_think: Duration, max_eat: Duration) -> Self {
        Self {
            seed,
            max_think,
            max_eat,
        }
    }

    /// A policy that never asks for a delay.
    pub fn immediate(seed: u64) -> Self {
        Self::new(seed, Duration::ZERO, Duration::ZERO)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Build the generator owned by one agent.
    ///
    /// Each agent gets a distinct stream derived from the run seed, so a run
    /// is reproducible regardless of how tasks are scheduled.
    pub fn delays_for(&self, agent: usize) -> AgentDelays {
        let stream = self
            .seed
            .wrapping_add((agent as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15));
        AgentDelays {
            rng: StdRng::seed_from_u64(stream),
            max_think: self.max_think,
            max_eat: self.max_eat,
        }
    }
}

/// Per-agent duration generator.
#[derive(Debug, Clone)]
pub struct AgentDelays {
    rng: StdRng,
    max_think: Duration,
    max_eat: Duration,
}

impl AgentDelays {
    pub fn think(&mut self) -> Duration {
        Self::draw(&mut self.rng, self.max_think)
    }

    pub fn eat(&mut self) -> Duration {
        Self::draw(&mut self.rng, self.max_eat)
    }

    fn draw(rng: &mut StdRng, max: Duration) -> Duration {
        let max_ms = max.as_millis() as u64;
        if max_ms == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(rng.gen_range(0..max_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_durations() {
        let policy = DelayPolicy::new(42, Duration::from_millis(1000), Duration::from_millis(1000));
        let mut a = policy.delays_for(3);
        let mut b = policy.delays_for(3);

        for _ in 0..20 {
            assert_eq!(a.think(), b.think());
            assert_eq!(a.eat(), b.eat());
        }
    }

    #[test]
    fn test_agents_get_distinct_streams() {
        let policy = DelayPolicy::new(7, Duration::from_millis(1000), Duration::from_millis(1000));
        let first: Vec<_> = {
            let mut d = policy.delays_for(0);
            (0..10).map(|_| d.think()).collect()
        };
        let second: Vec<_> = {
            let mut d = policy.delays_for(1);
            (0..10).map(|_| d.think()).collect()
        };
        assert_ne!(first, second);
    }

    #[test]
    fn test_durations_stay_below_max() {
        let policy = DelayPolicy::new(1, Duration::from_millis(5), Duration::from_millis(3));
        let mut delays = policy.delays_for(0);

        for _ in 0..200 {
            assert!(delays.think() < Duration::from_millis(5));
            assert!(delays.eat() < Duration::from_millis(3));
        }
    }

    #[test]
    fn test_policy_keeps_run_seed() {
        assert_eq!(DelayPolicy::immediate(9).seed(), 9);
        assert_eq!(DelayPolicy::default().seed(), 0);
    }

    #[test]
    fn test_immediate_policy_is_zero() {
        let mut delays = DelayPolicy::immediate(9).delays_for(4);
        assert_eq!(delays.think(), Duration::ZERO);
        assert_eq!(delays.eat(), Duration::ZERO);
    }

    #[tokio::test]
    async fn test_yield_clock_does_not_wait() {
        let start = std::time::Instant::now();
        YieldClock.sleep(Duration::from_secs(10)).await;
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_clock_waits_requested_duration() {
        let start = tokio::time::Instant::now();
        TokioClock.sleep(Duration::from_millis(250)).await;
        assert!(start.elapsed() >= Duration::from_millis(250));
    }
}
