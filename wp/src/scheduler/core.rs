//! Scheduler implementation

use std::collections::{HashMap, VecDeque};
use std::time::Instant;

use tokio::sync::Mutex;
use tracing::debug;

use crate::config::{SchedulerConfig, ScoreWeights};
use crate::domain::{Task, TaskResult, now_ms};
use crate::error::PoolError;
use crate::pool::WorkerPool;
use crate::worker::WorkerStatus;

use super::decision::{ResourceStrategy, ScalingRecommendation, SchedulingDecision, classify_priority};
use super::history::{
    CacheKey, CacheStats, ExecutionRecord, HistorySummary, PerformanceCacheEntry, PerformanceReport,
};

/// Internal state protected by mutex; mutated only from the single
/// `schedule()` completion path
struct SchedulerInner {
    /// Bounded execution ledger, oldest first
    history: VecDeque<ExecutionRecord>,

    /// Learned figures keyed by task signature
    cache: HashMap<CacheKey, PerformanceCacheEntry>,
}

/// Policy layer above the pool: computes a scheduling decision per task,
/// submits it, and records the outcome for future decisions.
pub struct Scheduler {
    pool: WorkerPool,
    config: SchedulerConfig,
    inner: Mutex<SchedulerInner>,
}

impl Scheduler {
    /// Create a scheduler over an initialized pool
    pub fn new(pool: WorkerPool, config: SchedulerConfig) -> Self {
        debug!(?config, "Scheduler::new: called");
        Self {
            pool,
            config,
            inner: Mutex::new(SchedulerInner {
                history: VecDeque::new(),
                cache: HashMap::new(),
            }),
        }
    }

    /// Schedule a task: decide, submit, await, learn.
    ///
    /// The result is returned unchanged; a task-level failure is a normal
    /// `TaskResult { success: false, .. }`, only structural misuse errors.
    pub async fn schedule(&self, task: Task) -> Result<TaskResult, PoolError> {
        let started = Instant::now();

        let decision = self.decide(&task).await;
        debug!(
            task_id = %task.id,
            priority = %decision.priority,
            worker_hint = ?decision.worker_hint,
            scaling = ?decision.scaling.action,
            "Scheduler::schedule: decision made"
        );

        let result = self.pool.execute(task.clone(), decision.priority).await?;

        self.record(task, decision, &result, started.elapsed().as_secs_f64() * 1000.0)
            .await;

        Ok(result)
    }

    /// Compute the scheduling decision for a task without submitting it
    pub async fn decide(&self, task: &Task) -> SchedulingDecision {
        let status = self.pool.status().await;
        let history_len = self.inner.lock().await.history.len();

        SchedulingDecision {
            worker_hint: select_worker(&status.workers, history_len, &self.config.weights),
            priority: classify_priority(task),
            resource_strategy: ResourceStrategy::for_task_type(&task.task_type),
            scaling: ScalingRecommendation::from_utilization(
                status.stats.resource_utilization,
                status.total_workers,
            ),
        }
    }

    /// Build the full performance report
    pub async fn performance_report(&self) -> PerformanceReport {
        let pool = self.pool.status().await;
        let inner = self.inner.lock().await;

        let total = inner.history.len();
        let successes = inner.history.iter().filter(|r| r.success).count();
        let success_rate = successes as f64 / total.max(1) as f64;
        let average_duration_ms =
            inner.history.iter().map(|r| r.total_duration_ms).sum::<f64>() / total.max(1) as f64;

        let recent: Vec<_> = inner.history.iter().rev().take(self.config.recent_window).collect();
        let hits = recent
            .iter()
            .filter(|r| inner.cache.contains_key(&r.task.signature()))
            .count();
        let hit_rate = hits as f64 / recent.len().max(1) as f64;

        // Efficiency: load balance peaks at 50% utilization, wait term
        // decays linearly and bottoms out at 1000ms average wait
        let load_balance = 1.0 - (50.0 - pool.stats.resource_utilization).abs() / 50.0;
        let task_success_rate = pool.stats.completed_tasks as f64 / pool.stats.total_tasks.max(1) as f64;
        let wait_term = (100.0 - pool.stats.average_wait_time_ms / 10.0).max(0.0) / 100.0;
        let scheduling_efficiency = (load_balance + task_success_rate + wait_term) / 3.0;

        PerformanceReport {
            pool,
            history: HistorySummary {
                total,
                success_rate,
                average_duration_ms,
            },
            cache: CacheStats {
                entries: inner.cache.len(),
                hit_rate,
            },
            scheduling_efficiency,
        }
    }

    /// Number of records currently in the history ledger
    pub async fn history_len(&self) -> usize {
        self.inner.lock().await.history.len()
    }

    /// Number of distinct task signatures in the performance cache
    pub async fn cache_len(&self) -> usize {
        self.inner.lock().await.cache.len()
    }

    async fn record(&self, task: Task, decision: SchedulingDecision, result: &TaskResult, total_duration_ms: f64) {
        let mut inner = self.inner.lock().await;

        let key = task.signature();
        inner.history.push_back(ExecutionRecord {
            timestamp_ms: now_ms(),
            task,
            decision,
            execution_time_ms: result.execution_time_ms,
            total_duration_ms,
            success: result.success,
        });

        // Trim to the recent window once the cap is exceeded
        if inner.history.len() > self.config.history_cap {
            let excess = inner.history.len() - self.config.history_trim_to;
            debug!(excess, "Scheduler::record: trimming history");
            inner.history.drain(..excess);
        }

        inner
            .cache
            .entry(key)
            .or_default()
            .record(result.execution_time_ms, result.success);
    }
}

/// Score every idle worker and return the best one's id.
///
/// Score = weighted sum of throughput (fast average task time), reliability
/// (few errors) and load balance (small share of the recorded history).
/// Ties go to the first (lowest-indexed) worker. `None` when nothing is idle.
fn select_worker(workers: &[WorkerStatus], history_len: usize, weights: &ScoreWeights) -> Option<String> {
    let mut best: Option<(f64, &WorkerStatus)> = None;

    for status in workers.iter().filter(|w| !w.busy) {
        let score = score_worker(status, history_len, weights);
        if best.as_ref().is_none_or(|(best_score, _)| score > *best_score) {
            best = Some((score, status));
        }
    }

    best.map(|(_, status)| status.id.clone())
}

fn score_worker(status: &WorkerStatus, history_len: usize, weights: &ScoreWeights) -> f64 {
    let stats = &status.stats;

    let performance = if stats.tasks_completed > 0 {
        (100.0 - stats.average_task_time_ms).max(0.0)
    } else {
        0.0
    };

    let reliability = if stats.tasks_completed > 0 {
        (1.0 - stats.errors as f64 / stats.tasks_completed as f64) * 100.0
    } else {
        100.0
    };

    let load_balance = (1.0 - stats.tasks_completed as f64 / history_len.max(1) as f64) * 100.0;

    weights.performance * performance + weights.reliability * reliability + weights.load_balance * load_balance
}
