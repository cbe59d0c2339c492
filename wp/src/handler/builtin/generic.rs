//! generic handler - fallback for unknown task types

use async_trait::async_trait;
use tracing::debug;

use crate::domain::Task;
use crate::handler::{HandlerOutcome, TaskHandler};

/// Fallback routine: sleeps for the declared duration and reports completion
pub struct GenericHandler;

#[async_trait]
impl TaskHandler for GenericHandler {
    fn name(&self) -> &'static str {
        "generic"
    }

    async fn run(&self, task: &Task) -> HandlerOutcome {
        debug!(task_id = %task.id, task_type = %task.task_type, "GenericHandler::run: called");
        tokio::time::sleep(task.estimated_duration()).await;

        HandlerOutcome::success(serde_json::json!({
            "task_type": task.task_type.to_string(),
            "result": format!("completed {} task successfully", task.task_type),
            "duration_ms": task.estimated_duration_ms,
        }))
    }
}
