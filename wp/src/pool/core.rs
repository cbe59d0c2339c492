//! WorkerPool implementation

use std::collections::{BinaryHeap, HashMap};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{Mutex, oneshot};
use tracing::{debug, info};

use crate::config::PoolConfig;
use crate::domain::{Priority, Task, TaskResult};
use crate::error::PoolError;
use crate::handler::HandlerRegistry;
use crate::worker::Worker;

use super::queue::{PoolStats, PoolStatus, QueuedTask};

/// Internal state protected by the pool-wide mutex.
///
/// `available` and `busy` partition the workers: every worker is in exactly
/// one of the two at all times. Both are mutated only by the admission pass
/// and the completion path.
struct PoolInner {
    workers: Vec<Arc<Worker>>,
    available: Vec<Arc<Worker>>,
    busy: HashMap<String, Arc<Worker>>,
    queue: BinaryHeap<QueuedTask>,
    next_seq: u64,
    stats: PoolStats,
    accepting: bool,
    initialized: bool,
}

struct Shared {
    config: PoolConfig,
    registry: HandlerRegistry,
    inner: Mutex<PoolInner>,
}

/// Bounded pool of workers with a priority-ordered admission queue.
///
/// Cheaply cloneable handle; all clones share the same pool.
#[derive(Clone)]
pub struct WorkerPool {
    shared: Arc<Shared>,
}

impl WorkerPool {
    /// Create a pool; no workers exist until [`initialize`](Self::initialize)
    pub fn new(config: PoolConfig, registry: HandlerRegistry) -> Self {
        debug!(max_size = config.max_size, "WorkerPool::new: called");
        Self {
            shared: Arc::new(Shared {
                config,
                registry,
                inner: Mutex::new(PoolInner {
                    workers: Vec::new(),
                    available: Vec::new(),
                    busy: HashMap::new(),
                    queue: BinaryHeap::new(),
                    next_seq: 0,
                    stats: PoolStats::default(),
                    accepting: true,
                    initialized: false,
                }),
            }),
        }
    }

    /// Construct exactly `max_size` workers, all idle.
    ///
    /// Precondition: called once, before any submission. Calling twice is
    /// not guarded.
    pub async fn initialize(&self) {
        let max_size = self.shared.config.max_size;
        info!(workers = max_size, "initializing worker pool");

        let mut inner = self.shared.inner.lock().await;
        for i in 0..max_size {
            let worker = Arc::new(Worker::new(format!("worker-{}", i)));
            inner.workers.push(Arc::clone(&worker));
            inner.available.push(worker);
        }
        inner.initialized = true;
    }

    /// Submit a task for execution at the given priority.
    ///
    /// Returns a handle that completes exactly once with the task's result.
    /// Rejects synchronously once shutdown has begun or if the pool was
    /// never initialized; queued work is otherwise guaranteed eventual
    /// admission.
    pub async fn submit(&self, task: Task, priority: Priority) -> Result<oneshot::Receiver<TaskResult>, PoolError> {
        let mut inner = self.shared.inner.lock().await;
        if !inner.accepting {
            debug!(task_id = %task.id, "WorkerPool::submit: rejected, shutting down");
            return Err(PoolError::ShuttingDown);
        }
        if !inner.initialized {
            debug!(task_id = %task.id, "WorkerPool::submit: rejected, not initialized");
            return Err(PoolError::NotInitialized);
        }

        inner.stats.total_tasks += 1;
        let seq = inner.next_seq;
        inner.next_seq += 1;

        let (reply, receiver) = oneshot::channel();
        debug!(task_id = %task.id, %priority, seq, "WorkerPool::submit: enqueueing");
        inner.queue.push(QueuedTask {
            task,
            priority,
            seq,
            enqueued_at: Instant::now(),
            reply,
        });

        admit(&self.shared, &mut inner);
        Ok(receiver)
    }

    /// Submit and await the result
    pub async fn execute(&self, task: Task, priority: Priority) -> Result<TaskResult, PoolError> {
        let receiver = self.submit(task, priority).await?;
        receiver.await.map_err(|_| PoolError::ResultChannelClosed)
    }

    /// Snapshot the pool state
    pub async fn status(&self) -> PoolStatus {
        let inner = self.shared.inner.lock().await;
        PoolStatus {
            total_workers: self.shared.config.max_size,
            available_workers: inner.available.len(),
            busy_workers: inner.busy.len(),
            queued_tasks: inner.queue.len(),
            stats: inner.stats.clone(),
            workers: inner.workers.iter().map(|w| w.status()).collect(),
        }
    }

    /// Clear pool statistics and every worker's statistics
    pub async fn reset_stats(&self) {
        let mut inner = self.shared.inner.lock().await;
        inner.stats = PoolStats::default();
        for worker in &inner.workers {
            worker.reset_stats();
        }
    }

    /// Stop accepting submissions and drain: wait until all admitted work
    /// has completed, then release the workers. In-flight tasks always run
    /// to completion; nothing is cancelled and no result is dropped.
    pub async fn shutdown(&self) {
        info!("worker pool shutting down");
        {
            let mut inner = self.shared.inner.lock().await;
            inner.accepting = false;
        }

        loop {
            let drained = {
                let inner = self.shared.inner.lock().await;
                inner.busy.is_empty() && inner.queue.is_empty()
            };
            if drained {
                break;
            }
            tokio::time::sleep(self.shared.config.drain_poll_interval()).await;
        }

        let mut inner = self.shared.inner.lock().await;
        inner.workers.clear();
        inner.available.clear();
        inner.busy.clear();
        inner.queue.clear();
        inner.initialized = false;
        info!("worker pool shutdown complete");
    }
}

/// Admission pass: match queued tasks to idle workers, highest priority
/// first, FIFO within equal priority. Runs after every submission and after
/// every completion, always under the pool lock.
fn admit(shared: &Arc<Shared>, inner: &mut PoolInner) {
    while !inner.queue.is_empty() && !inner.available.is_empty() {
        let (Some(queued), Some(worker)) = (inner.queue.pop(), inner.available.pop()) else {
            break;
        };

        let wait = queued.enqueued_at.elapsed();
        inner.busy.insert(worker.id().to_string(), Arc::clone(&worker));
        debug!(
            task_id = %queued.task.id,
            worker_id = %worker.id(),
            wait_ms = wait.as_millis() as u64,
            "WorkerPool::admit: assigning task"
        );

        let shared = Arc::clone(shared);
        tokio::spawn(async move {
            let result = worker.execute(&queued.task, &shared.registry).await;
            complete(&shared, worker, queued.reply, wait, result).await;
        });
    }

    let concurrency = inner.busy.len();
    inner.stats.peak_concurrency = inner.stats.peak_concurrency.max(concurrency);
    inner.stats.resource_utilization = concurrency as f64 / shared.config.max_size as f64 * 100.0;
}

/// Completion path: record stats, deliver the result, return the worker to
/// the available partition and re-run the admission pass.
async fn complete(
    shared: &Arc<Shared>,
    worker: Arc<Worker>,
    reply: oneshot::Sender<TaskResult>,
    wait: Duration,
    result: TaskResult,
) {
    let mut inner = shared.inner.lock().await;

    inner.stats.completed_tasks += 1;
    let completed = inner.stats.completed_tasks as f64;
    let wait_ms = wait.as_secs_f64() * 1000.0;
    inner.stats.average_wait_time_ms = (inner.stats.average_wait_time_ms * (completed - 1.0) + wait_ms) / completed;

    debug!(
        worker_id = %worker.id(),
        success = result.success,
        completed = inner.stats.completed_tasks,
        "WorkerPool::complete: task finished, worker returned"
    );
    inner.busy.remove(worker.id());
    inner.available.push(worker);

    if reply.send(result).is_err() {
        debug!("WorkerPool::complete: result receiver dropped");
    }

    admit(shared, &mut inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn quick_task(description: &str) -> Task {
        Task::new("migration", description).with_estimated_duration(Duration::from_millis(20))
    }

    fn small_pool(max_size: usize) -> WorkerPool {
        WorkerPool::new(
            PoolConfig {
                max_size,
                drain_poll_interval_ms: 10,
            },
            HandlerRegistry::standard(),
        )
    }

    #[tokio::test]
    async fn test_submit_before_initialize_is_rejected() {
        let pool = small_pool(2);
        let err = pool.submit(quick_task("early"), Priority::Normal).await.unwrap_err();
        assert_eq!(err, PoolError::NotInitialized);
    }

    #[tokio::test]
    async fn test_submit_after_shutdown_is_rejected() {
        let pool = small_pool(2);
        pool.initialize().await;
        pool.shutdown().await;

        let err = pool.submit(quick_task("late"), Priority::Normal).await.unwrap_err();
        assert_eq!(err, PoolError::ShuttingDown);
        assert!(err.is_shutdown());
    }

    #[tokio::test]
    async fn test_execute_returns_result() {
        let pool = small_pool(2);
        pool.initialize().await;

        let result = pool.execute(quick_task("hello"), Priority::Normal).await.unwrap();
        assert!(result.success);
        assert!(result.worker_id.starts_with("worker-"));

        let status = pool.status().await;
        assert_eq!(status.stats.total_tasks, 1);
        assert_eq!(status.stats.completed_tasks, 1);
        pool.shutdown().await;
    }

    #[tokio::test]
    async fn test_utilization_gauge() {
        let pool = small_pool(2);
        pool.initialize().await;

        let task = Task::new("migration", "slow").with_estimated_duration(Duration::from_millis(150));
        let receiver = pool.submit(task, Priority::Normal).await.unwrap();

        tokio::time::sleep(Duration::from_millis(30)).await;
        let status = pool.status().await;
        assert_eq!(status.busy_workers, 1);
        assert_eq!(status.available_workers, 1);
        assert_eq!(status.stats.resource_utilization, 50.0);

        receiver.await.unwrap();
        pool.shutdown().await;
        let status = pool.status().await;
        assert_eq!(status.busy_workers, 0);
    }

    #[tokio::test]
    async fn test_reset_stats_clears_pool_and_workers() {
        let pool = small_pool(1);
        pool.initialize().await;

        pool.execute(quick_task("one"), Priority::Normal).await.unwrap();
        assert_eq!(pool.status().await.stats.completed_tasks, 1);

        pool.reset_stats().await;
        let status = pool.status().await;
        assert_eq!(status.stats.completed_tasks, 0);
        assert_eq!(status.workers[0].stats.tasks_completed, 0);
        pool.shutdown().await;
    }
}
