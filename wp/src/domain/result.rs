//! Task execution result

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of a single task execution.
///
/// Failures are carried as values; a failed task still produces a
/// `TaskResult`, with `success == false` and `error` populated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskResult {
    pub success: bool,

    /// Payload produced by the execution routine (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    /// Failure message (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Wall time spent executing, in milliseconds
    pub execution_time_ms: f64,

    /// Worker that ran the task
    pub worker_id: String,
}

impl TaskResult {
    /// Build a successful result
    pub fn success(data: Value, execution_time: Duration, worker_id: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            execution_time_ms: execution_time.as_secs_f64() * 1000.0,
            worker_id: worker_id.into(),
        }
    }

    /// Build a failed result
    pub fn failure(error: impl Into<String>, execution_time: Duration, worker_id: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            execution_time_ms: execution_time.as_secs_f64() * 1000.0,
            worker_id: worker_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_result() {
        let result = TaskResult::success(
            serde_json::json!({"items": 3}),
            Duration::from_millis(42),
            "worker-0",
        );
        assert!(result.success);
        assert!(result.data.is_some());
        assert!(result.error.is_none());
        assert!((result.execution_time_ms - 42.0).abs() < 1.0);
        assert_eq!(result.worker_id, "worker-0");
    }

    #[test]
    fn test_failure_result() {
        let result = TaskResult::failure("handler blew up", Duration::from_millis(5), "worker-1");
        assert!(!result.success);
        assert!(result.data.is_none());
        assert_eq!(result.error.as_deref(), Some("handler blew up"));
    }

    #[test]
    fn test_serialize_omits_empty_sides() {
        let result = TaskResult::failure("nope", Duration::ZERO, "worker-0");
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("error"));
        assert!(!json.contains("data"));
    }
}
