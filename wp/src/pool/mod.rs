//! Bounded worker pool with priority admission
//!
//! The pool is the only place the "at most N concurrent tasks" invariant is
//! enforced. All mutable state lives behind a single pool-wide mutex; the
//! admission pass and the completion path are the only writers.

mod core;
mod queue;

pub use core::WorkerPool;
pub use queue::{PoolStats, PoolStatus};
