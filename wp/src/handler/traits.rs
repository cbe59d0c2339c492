//! TaskHandler trait definition

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::Task;

/// An execution routine for one task type.
///
/// A handler treats the task's `estimated_duration` as its pacing budget and
/// yields between phases, so the runtime can progress other workers while
/// this one is "executing".
#[async_trait]
pub trait TaskHandler: Send + Sync {
    /// Handler name (matches the task type it serves)
    fn name(&self) -> &'static str;

    /// Run the task to completion
    async fn run(&self, task: &Task) -> HandlerOutcome;
}

/// Result of a handler run
#[derive(Debug, Clone)]
pub struct HandlerOutcome {
    pub data: Value,
    pub error: Option<String>,
}

impl HandlerOutcome {
    /// Create a successful outcome
    pub fn success(data: Value) -> Self {
        Self { data, error: None }
    }

    /// Create a failed outcome
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            data: Value::Null,
            error: Some(error.into()),
        }
    }

    /// Check whether the run succeeded
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_success() {
        let outcome = HandlerOutcome::success(serde_json::json!({"ok": true}));
        assert!(outcome.is_success());
        assert!(outcome.error.is_none());
    }

    #[test]
    fn test_outcome_failure() {
        let outcome = HandlerOutcome::failure("timeout fetching sources");
        assert!(!outcome.is_success());
        assert_eq!(outcome.error.as_deref(), Some("timeout fetching sources"));
        assert!(outcome.data.is_null());
    }
}
