//! Workpool - adaptive worker-pool task scheduler
//!
//! Workpool dispatches typed units of work onto a bounded pool of logical
//! execution slots ("workers"), routing submissions through a priority queue
//! and making assignment and capacity decisions from historical performance.
//!
//! # Core Concepts
//!
//! - **Bounded Concurrency**: at most `max_size` tasks run simultaneously;
//!   everything else waits in a priority-ordered admission queue
//! - **Priority + FIFO**: critical > high > normal > low, stable FIFO within
//!   equal priority
//! - **Data-Driven Routing**: per-worker throughput and reliability stats feed
//!   a scoring function that produces advisory worker-assignment hints
//! - **Advisory Scaling**: utilization-derived scale-up/down recommendations;
//!   the pool size itself never changes automatically
//! - **Drain Shutdown**: shutdown stops admissions and waits for in-flight
//!   work, it never cancels it
//!
//! # Modules
//!
//! - [`domain`] - tasks, priorities, results and id generation
//! - [`handler`] - the `TaskHandler` capability and built-in routines
//! - [`worker`] - a single execution slot and its statistics
//! - [`pool`] - the bounded pool, admission queue and drain shutdown
//! - [`scheduler`] - scheduling decisions, history ledger and performance cache
//! - [`config`] - construction-time configuration types

pub mod config;
pub mod domain;
pub mod error;
pub mod handler;
pub mod pool;
pub mod scheduler;
pub mod worker;

// Re-export commonly used types
pub use config::{PoolConfig, SchedulerConfig, ScoreWeights};
pub use domain::{
    IoProfile, Priority, ResourceRequirements, Task, TaskContext, TaskResult, TaskType, Urgency, now_ms,
};
pub use error::PoolError;
pub use handler::{
    AnalysisHandler, GenericHandler, HandlerOutcome, HandlerRegistry, ImplementationHandler, ResearchHandler,
    TaskHandler, TestingHandler,
};
pub use pool::{PoolStats, PoolStatus, WorkerPool};
pub use scheduler::{
    CacheStats, ExecutionRecord, HistorySummary, PerformanceCacheEntry, PerformanceReport, ResourceStrategy,
    ScalingAction, ScalingRecommendation, Scheduler, SchedulingDecision, classify_priority,
};
pub use worker::{Worker, WorkerStats, WorkerStatus};
