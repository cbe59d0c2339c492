//! Scheduling policy layer
//!
//! Computes a per-task scheduling decision (worker hint, priority class,
//! resource strategy, scaling recommendation), submits to the pool, and
//! learns from outcomes through a bounded history ledger and a performance
//! cache keyed by task signature.

mod core;
mod decision;
mod history;

pub use core::Scheduler;
pub use decision::{
    ResourceStrategy, ScalingAction, ScalingRecommendation, SchedulingDecision, classify_priority,
};
pub use history::{CacheStats, ExecutionRecord, HistorySummary, PerformanceCacheEntry, PerformanceReport};
