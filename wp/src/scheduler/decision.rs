//! Scheduling decision types and the rules that produce them

use serde::{Deserialize, Serialize};

use crate::domain::{Priority, Task, TaskType, Urgency};

/// Utilization above which a scale-up is recommended (percent)
const SCALE_UP_THRESHOLD: f64 = 80.0;

/// Utilization below which a scale-down is considered (percent)
const SCALE_DOWN_THRESHOLD: f64 = 20.0;

/// Workers added or removed per recommendation
const SCALE_STEP: usize = 2;

/// Recommended pool size never exceeds this
const MAX_WORKERS: usize = 16;

/// Recommended pool size never drops below this
const MIN_WORKERS: usize = 2;

/// Scale-down is only recommended for pools larger than this
const SCALE_DOWN_FLOOR: usize = 4;

/// Resource-allocation label for observability and reporting. Not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceStrategy {
    ParallelOptimized,
    IoOptimized,
    CpuIntensive,
    Balanced,
}

impl ResourceStrategy {
    /// Strategy label for a task type
    pub fn for_task_type(task_type: &TaskType) -> Self {
        match task_type {
            TaskType::Testing => Self::ParallelOptimized,
            TaskType::Research => Self::IoOptimized,
            TaskType::Implementation => Self::CpuIntensive,
            _ => Self::Balanced,
        }
    }
}

impl std::fmt::Display for ResourceStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ParallelOptimized => write!(f, "parallel_optimized"),
            Self::IoOptimized => write!(f, "io_optimized"),
            Self::CpuIntensive => write!(f, "cpu_intensive"),
            Self::Balanced => write!(f, "balanced"),
        }
    }
}

/// Direction of a scaling recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalingAction {
    ScaleUp,
    ScaleDown,
    Maintain,
}

/// Advisory capacity signal derived from utilization. The pool's actual
/// size never changes automatically; this is a control-loop signal, not an
/// actuator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalingRecommendation {
    pub action: ScalingAction,
    pub reason: String,
    pub recommended_workers: usize,
}

impl ScalingRecommendation {
    /// Derive a recommendation from the current utilization gauge and pool size
    pub fn from_utilization(utilization: f64, current_size: usize) -> Self {
        if utilization > SCALE_UP_THRESHOLD {
            Self {
                action: ScalingAction::ScaleUp,
                reason: "high resource utilization".to_string(),
                recommended_workers: (current_size + SCALE_STEP).min(MAX_WORKERS),
            }
        } else if utilization < SCALE_DOWN_THRESHOLD && current_size > SCALE_DOWN_FLOOR {
            Self {
                action: ScalingAction::ScaleDown,
                reason: "low resource utilization".to_string(),
                recommended_workers: current_size.saturating_sub(SCALE_STEP).max(MIN_WORKERS),
            }
        } else {
            Self {
                action: ScalingAction::Maintain,
                reason: "resource utilization within target band".to_string(),
                recommended_workers: current_size,
            }
        }
    }
}

/// The bundle of routing, priority, strategy and scaling hints computed
/// before a task is submitted to the pool. Ephemeral; only the history
/// ledger retains it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulingDecision {
    /// Advisory assignment hint: the highest-scoring idle worker, if any.
    /// The pool is free to ignore it.
    pub worker_hint: Option<String>,

    /// Priority class the task will be submitted at
    pub priority: Priority,

    /// Observability label for the resource approach
    pub resource_strategy: ResourceStrategy,

    /// Advisory capacity signal at decision time
    pub scaling: ScalingRecommendation,
}

/// Classify a task's priority from its declared characteristics.
///
/// Rules run in a fixed order: urgency first, then the short-task
/// promotion, then the background demotion. Later rules never override
/// `Critical`.
pub fn classify_priority(task: &Task) -> Priority {
    let mut priority = Priority::Normal;

    let urgency = task.context.map(|c| c.urgency).unwrap_or_default();
    if matches!(urgency, Urgency::Urgent | Urgency::Critical) {
        priority = Priority::Critical;
    }

    if priority != Priority::Critical && task.estimated_duration_ms < 5_000 && task.resources.cpu <= 2 {
        priority = Priority::High;
    }

    if priority != Priority::Critical && (task.estimated_duration_ms > 60_000 || task.resources.cpu <= 1) {
        priority = Priority::Low;
    }

    priority
}
