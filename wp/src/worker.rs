//! Worker - a single logical execution slot
//!
//! A worker owns zero or one in-flight task at a time and accumulates its
//! own performance statistics. Workers are virtual slots, not OS threads:
//! while a task is "executing" the worker merely reserves its slot.

use std::sync::Mutex;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{Task, TaskResult};
use crate::handler::HandlerRegistry;

/// Monotonically accumulated execution statistics.
///
/// `average_task_time_ms == total_execution_time_ms / tasks_completed`
/// whenever `tasks_completed > 0`. Reset only via pool-level stats reset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkerStats {
    pub tasks_completed: u64,
    pub total_execution_time_ms: f64,
    pub average_task_time_ms: f64,
    pub errors: u64,
}

/// Snapshot of a worker's state; a copy, never the live state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerStatus {
    pub id: String,
    pub busy: bool,
    pub current_task: Option<String>,
    pub stats: WorkerStats,
}

#[derive(Debug, Default)]
struct WorkerInner {
    busy: bool,
    current_task: Option<String>,
    stats: WorkerStats,
}

/// A stateful execution slot
#[derive(Debug)]
pub struct Worker {
    id: String,
    inner: Mutex<WorkerInner>,
}

impl Worker {
    /// Create an idle worker with the given id
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            inner: Mutex::new(WorkerInner::default()),
        }
    }

    /// Stable identifier assigned at pool construction
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Execute a task through its type's handler.
    ///
    /// Failures come back as a normal `TaskResult { success: false, .. }`;
    /// a failing worker stays eligible for the very next assignment. The
    /// busy flag and current-task id are cleared on every exit path,
    /// including cancellation, via a clear-on-drop guard.
    pub async fn execute(&self, task: &Task, registry: &HandlerRegistry) -> TaskResult {
        debug!(worker_id = %self.id, task_id = %task.id, task_type = %task.task_type, "Worker::execute: called");
        let _guard = BusyGuard::acquire(self, &task.id);
        let started = Instant::now();

        let handler = registry.resolve(&task.task_type);
        let outcome = handler.run(task).await;
        let elapsed = started.elapsed();

        self.record(elapsed.as_secs_f64() * 1000.0, outcome.is_success());

        match outcome.error {
            None => TaskResult::success(outcome.data, elapsed, self.id.as_str()),
            Some(error) => {
                debug!(worker_id = %self.id, task_id = %task.id, %error, "Worker::execute: task failed");
                TaskResult::failure(error, elapsed, self.id.as_str())
            }
        }
    }

    /// Snapshot the worker state
    pub fn status(&self) -> WorkerStatus {
        let inner = self.inner.lock().unwrap();
        WorkerStatus {
            id: self.id.clone(),
            busy: inner.busy,
            current_task: inner.current_task.clone(),
            stats: inner.stats.clone(),
        }
    }

    /// Clear accumulated statistics (pool-level reset only)
    pub(crate) fn reset_stats(&self) {
        debug!(worker_id = %self.id, "Worker::reset_stats: called");
        let mut inner = self.inner.lock().unwrap();
        inner.stats = WorkerStats::default();
    }

    fn record(&self, duration_ms: f64, success: bool) {
        let mut inner = self.inner.lock().unwrap();
        inner.stats.tasks_completed += 1;
        inner.stats.total_execution_time_ms += duration_ms;
        inner.stats.average_task_time_ms = inner.stats.total_execution_time_ms / inner.stats.tasks_completed as f64;
        if !success {
            inner.stats.errors += 1;
        }
    }
}

/// Marks the worker busy for the span of one execution; `Drop` guarantees
/// the slot is released on success, failure and cancellation alike
struct BusyGuard<'a> {
    worker: &'a Worker,
}

impl<'a> BusyGuard<'a> {
    fn acquire(worker: &'a Worker, task_id: &str) -> Self {
        let mut inner = worker.inner.lock().unwrap();
        inner.busy = true;
        inner.current_task = Some(task_id.to_string());
        Self { worker }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.worker.inner.lock() {
            inner.busy = false;
            inner.current_task = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::handler::{HandlerOutcome, TaskHandler};

    struct FailingHandler;

    #[async_trait]
    impl TaskHandler for FailingHandler {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn run(&self, _task: &Task) -> HandlerOutcome {
            HandlerOutcome::failure("simulated failure")
        }
    }

    fn quick_task(description: &str) -> Task {
        Task::new("migration", description).with_estimated_duration(Duration::from_millis(5))
    }

    #[tokio::test]
    async fn test_execute_updates_stats() {
        let worker = Worker::new("worker-0");
        let registry = HandlerRegistry::standard();

        let result = worker.execute(&quick_task("one"), &registry).await;
        assert!(result.success);
        assert_eq!(result.worker_id, "worker-0");

        worker.execute(&quick_task("two"), &registry).await;
        worker.execute(&quick_task("three"), &registry).await;

        let status = worker.status();
        assert_eq!(status.stats.tasks_completed, 3);
        assert_eq!(status.stats.errors, 0);
        let expected = status.stats.total_execution_time_ms / 3.0;
        assert!((status.stats.average_task_time_ms - expected).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_failure_counts_error_and_releases_slot() {
        let worker = Worker::new("worker-0");
        let mut registry = HandlerRegistry::empty();
        registry.register("flaky", Arc::new(FailingHandler));

        let task = Task::new("flaky", "doomed").with_estimated_duration(Duration::from_millis(5));
        let result = worker.execute(&task, &registry).await;

        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("simulated failure"));

        let status = worker.status();
        assert!(!status.busy);
        assert!(status.current_task.is_none());
        assert_eq!(status.stats.tasks_completed, 1);
        assert_eq!(status.stats.errors, 1);

        // Still eligible: the next task succeeds on the same worker
        let result = worker.execute(&quick_task("recovery"), &registry).await;
        assert!(result.success);
        assert_eq!(worker.status().stats.tasks_completed, 2);
    }

    #[tokio::test]
    async fn test_busy_while_executing() {
        let worker = Arc::new(Worker::new("worker-0"));
        let registry = Arc::new(HandlerRegistry::standard());

        let task = Task::new("migration", "slow").with_estimated_duration(Duration::from_millis(100));
        let handle = {
            let worker = Arc::clone(&worker);
            let registry = Arc::clone(&registry);
            tokio::spawn(async move { worker.execute(&task, &registry).await })
        };

        tokio::time::sleep(Duration::from_millis(30)).await;
        let status = worker.status();
        assert!(status.busy);
        assert!(status.current_task.is_some());

        handle.await.unwrap();
        let status = worker.status();
        assert!(!status.busy);
        assert!(status.current_task.is_none());
    }

    #[tokio::test]
    async fn test_reset_stats() {
        let worker = Worker::new("worker-0");
        let registry = HandlerRegistry::standard();

        worker.execute(&quick_task("one"), &registry).await;
        assert_eq!(worker.status().stats.tasks_completed, 1);

        worker.reset_stats();
        let stats = worker.status().stats;
        assert_eq!(stats.tasks_completed, 0);
        assert_eq!(stats.total_execution_time_ms, 0.0);
    }

    #[test]
    fn test_status_is_a_snapshot() {
        let worker = Worker::new("worker-0");
        let status = worker.status();

        // Mutating the snapshot must not touch the live worker
        let mut copy = status.clone();
        copy.stats.tasks_completed = 99;
        assert_eq!(worker.status().stats.tasks_completed, 0);
    }
}
