//! Queue and status types for the worker pool

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

use crate::domain::{Priority, Task, TaskResult};
use crate::worker::WorkerStatus;

/// A pending submission waiting for a worker
pub(crate) struct QueuedTask {
    pub task: Task,
    pub priority: Priority,
    /// Monotonic submission counter; makes FIFO-within-priority deterministic
    /// even for submissions that land on the same instant
    pub seq: u64,
    pub enqueued_at: Instant,
    pub reply: oneshot::Sender<TaskResult>,
}

impl Eq for QueuedTask {}

impl PartialEq for QueuedTask {
    fn eq(&self, other: &Self) -> bool {
        self.seq == other.seq
    }
}

impl Ord for QueuedTask {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Higher priority first, then earlier submission
        self.priority
            .cmp(&other.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for QueuedTask {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Pool-wide statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoolStats {
    /// Tasks ever submitted
    pub total_tasks: u64,

    /// Tasks that ran to completion (success or failure)
    pub completed_tasks: u64,

    /// Running average of enqueue-to-assignment wait, in milliseconds
    pub average_wait_time_ms: f64,

    /// Historical maximum of simultaneously busy workers
    pub peak_concurrency: usize,

    /// Point-in-time gauge: busy workers / pool size, as a percentage
    pub resource_utilization: f64,
}

/// Snapshot of the pool, safe to hand to a monitoring collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolStatus {
    pub total_workers: usize,
    pub available_workers: usize,
    pub busy_workers: usize,
    pub queued_tasks: usize,
    pub stats: PoolStats,
    pub workers: Vec<WorkerStatus>,
}
