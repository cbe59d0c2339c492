//! Pool error types
//!
//! Structural misuse only. A task that fails during execution is a normal
//! `TaskResult { success: false, .. }` value, never an `Err`.

use thiserror::Error;

/// Errors surfaced by the pool and scheduler for structural misuse
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PoolError {
    #[error("Pool is shutting down, submission rejected")]
    ShuttingDown,

    #[error("Pool has not been initialized")]
    NotInitialized,

    #[error("Result channel closed before the task completed")]
    ResultChannelClosed,
}

impl PoolError {
    /// Check if this rejection was caused by shutdown
    pub fn is_shutdown(&self) -> bool {
        matches!(self, PoolError::ShuttingDown)
    }
}
