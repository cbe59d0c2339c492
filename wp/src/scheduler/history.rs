//! Execution history and the keyed performance cache

use serde::{Deserialize, Serialize};

use crate::domain::{ResourceRequirements, Task, TaskType};
use crate::pool::PoolStatus;

use super::decision::SchedulingDecision;

/// Cache key: tasks with the same type and resource profile are expected
/// to behave alike
pub(crate) type CacheKey = (TaskType, ResourceRequirements);

/// One completed scheduling round. Append-only; the ledger is trimmed to a
/// fixed window to bound memory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionRecord {
    /// Completion wall-clock time (Unix ms)
    pub timestamp_ms: i64,

    /// The task as submitted
    pub task: Task,

    /// The decision it was scheduled under
    pub decision: SchedulingDecision,

    /// Time the worker spent executing, in milliseconds
    pub execution_time_ms: f64,

    /// Full schedule-to-result wall time, in milliseconds
    pub total_duration_ms: f64,

    pub success: bool,
}

/// Learned figures for one task signature
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PerformanceCacheEntry {
    /// Cumulative mean of execution time, in milliseconds
    pub average_duration_ms: f64,

    /// Exponential moving average of the success outcome (0.9 decay,
    /// 0.1 weight for each new sample)
    pub success_rate: f64,

    pub executions: u64,
}

impl PerformanceCacheEntry {
    /// Fold one execution into the entry
    pub fn record(&mut self, duration_ms: f64, success: bool) {
        self.executions += 1;
        self.average_duration_ms =
            (self.average_duration_ms * (self.executions - 1) as f64 + duration_ms) / self.executions as f64;
        self.success_rate = self.success_rate * 0.9 + if success { 0.1 } else { 0.0 };
    }
}

/// Aggregate view over the history ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistorySummary {
    pub total: usize,
    pub success_rate: f64,
    pub average_duration_ms: f64,
}

/// Aggregate view over the performance cache
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub entries: usize,
    /// Fraction of recent history entries whose signature is already cached
    pub hit_rate: f64,
}

/// Full scheduler report: pool status, history and cache aggregates, and
/// the composite scheduling-efficiency score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceReport {
    pub pool: PoolStatus,
    pub history: HistorySummary,
    pub cache: CacheStats,
    /// Mean of the load-balance, success-rate and wait-time terms, each in
    /// [0, 1]. Load balance peaks at 50% utilization.
    pub scheduling_efficiency: f64,
}
