//! Domain types: tasks, priorities, results

mod id;
mod priority;
mod result;
mod task;

pub use id::generate_id;
pub use priority::Priority;
pub use result::TaskResult;
pub use task::{IoProfile, ResourceRequirements, Task, TaskContext, TaskType, Urgency};

/// Current Unix time in milliseconds
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
