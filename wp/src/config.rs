//! Pool and scheduler configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Worker pool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Number of workers created at initialization (must be >= 1).
    /// Fixed for the lifetime of the pool; scaling recommendations are
    /// advisory and never applied automatically.
    #[serde(default = "default_max_size")]
    pub max_size: usize,

    /// Shutdown drain polling interval in milliseconds
    #[serde(default = "default_drain_poll_interval_ms")]
    pub drain_poll_interval_ms: u64,
}

fn default_max_size() -> usize {
    8
}

fn default_drain_poll_interval_ms() -> u64 {
    100
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_size: 8,
            drain_poll_interval_ms: 100,
        }
    }
}

impl PoolConfig {
    /// Get the drain polling interval as a Duration
    pub fn drain_poll_interval(&self) -> Duration {
        Duration::from_millis(self.drain_poll_interval_ms)
    }
}

/// Weights for the worker scoring function
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// Weight of the throughput term (faster average task time scores higher)
    #[serde(default = "default_performance_weight")]
    pub performance: f64,

    /// Weight of the reliability term (fewer errors scores higher)
    #[serde(default = "default_reliability_weight")]
    pub reliability: f64,

    /// Weight of the load-balance term (fewer completed tasks scores higher)
    #[serde(default = "default_load_balance_weight")]
    pub load_balance: f64,
}

fn default_performance_weight() -> f64 {
    0.30
}

fn default_reliability_weight() -> f64 {
    0.40
}

fn default_load_balance_weight() -> f64 {
    0.30
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            performance: 0.30,
            reliability: 0.40,
            load_balance: 0.30,
        }
    }
}

/// Scheduler configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// History length that triggers trimming
    #[serde(default = "default_history_cap")]
    pub history_cap: usize,

    /// Number of most recent records kept after a trim
    #[serde(default = "default_history_trim_to")]
    pub history_trim_to: usize,

    /// Window of recent history entries used for the cache hit rate
    #[serde(default = "default_recent_window")]
    pub recent_window: usize,

    /// Worker scoring weights
    #[serde(default)]
    pub weights: ScoreWeights,
}

fn default_history_cap() -> usize {
    1000
}

fn default_history_trim_to() -> usize {
    500
}

fn default_recent_window() -> usize {
    50
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            history_cap: 1000,
            history_trim_to: 500,
            recent_window: 50,
            weights: ScoreWeights::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pool_config() {
        let config = PoolConfig::default();
        assert_eq!(config.max_size, 8);
        assert_eq!(config.drain_poll_interval_ms, 100);
        assert_eq!(config.drain_poll_interval(), Duration::from_millis(100));
    }

    #[test]
    fn test_default_scheduler_config() {
        let config = SchedulerConfig::default();
        assert_eq!(config.history_cap, 1000);
        assert_eq!(config.history_trim_to, 500);
        assert_eq!(config.recent_window, 50);
    }

    #[test]
    fn test_default_weights_sum_to_one() {
        let weights = ScoreWeights::default();
        let sum = weights.performance + weights.reliability + weights.load_balance;
        assert!((sum - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_config_deserialize_with_defaults() {
        let config: PoolConfig = serde_json::from_str(r#"{"max_size": 4}"#).unwrap();
        assert_eq!(config.max_size, 4);
        assert_eq!(config.drain_poll_interval_ms, 100);

        let config: SchedulerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.history_cap, 1000);
        assert!((config.weights.reliability - 0.40).abs() < f64::EPSILON);
    }
}
