//! Task domain type and its advisory metadata

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::id::generate_id;

/// Routing key that selects the execution routine for a task.
///
/// The closed set maps to the built-in handlers; anything else becomes
/// `Other` and falls back to the generic routine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskType {
    Analysis,
    Research,
    Implementation,
    Testing,
    Other(String),
}

impl From<String> for TaskType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "analysis" => Self::Analysis,
            "research" => Self::Research,
            "implementation" => Self::Implementation,
            "testing" => Self::Testing,
            _ => Self::Other(s),
        }
    }
}

impl From<&str> for TaskType {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<TaskType> for String {
    fn from(t: TaskType) -> String {
        t.to_string()
    }
}

impl std::fmt::Display for TaskType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Analysis => write!(f, "analysis"),
            Self::Research => write!(f, "research"),
            Self::Implementation => write!(f, "implementation"),
            Self::Testing => write!(f, "testing"),
            Self::Other(s) => write!(f, "{}", s),
        }
    }
}

/// Declared I/O intensity of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IoProfile {
    Low,
    #[default]
    Medium,
    High,
}

/// Advisory resource profile. Inputs to routing heuristics, never enforced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceRequirements {
    /// Declared CPU cores
    pub cpu: u32,

    /// Declared memory in megabytes
    pub memory_mb: u64,

    /// Declared I/O intensity
    #[serde(default)]
    pub io: IoProfile,
}

impl Default for ResourceRequirements {
    fn default() -> Self {
        Self {
            cpu: 2,
            memory_mb: 512,
            io: IoProfile::Medium,
        }
    }
}

/// Caller-declared urgency, consulted by the priority rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    #[default]
    Normal,
    High,
    Urgent,
    Critical,
}

/// Optional submission context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TaskContext {
    /// How urgent the caller considers this task
    #[serde(default)]
    pub urgency: Urgency,
}

impl TaskContext {
    /// Create a context with the given urgency
    pub fn new(urgency: Urgency) -> Self {
        Self { urgency }
    }
}

/// A unit of work. Immutable once submitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    pub id: String,

    /// Routing key for handler dispatch
    pub task_type: TaskType,

    /// Short human-readable description
    pub description: String,

    /// Declared expected duration in milliseconds; a pacing budget for the
    /// execution routine and an input to the priority rules, not a limit
    #[serde(default = "default_estimated_duration_ms")]
    pub estimated_duration_ms: u64,

    /// Advisory resource profile
    #[serde(default)]
    pub resources: ResourceRequirements,

    /// Optional caller context
    #[serde(default)]
    pub context: Option<TaskContext>,
}

fn default_estimated_duration_ms() -> u64 {
    1_000
}

impl Task {
    /// Create a new task with a generated ID and default metadata
    pub fn new(task_type: impl Into<TaskType>, description: impl Into<String>) -> Self {
        let description = description.into();
        Self {
            id: generate_id("task", &description),
            task_type: task_type.into(),
            description,
            estimated_duration_ms: default_estimated_duration_ms(),
            resources: ResourceRequirements::default(),
            context: None,
        }
    }

    /// Set the declared duration
    pub fn with_estimated_duration(mut self, duration: Duration) -> Self {
        self.estimated_duration_ms = duration.as_millis() as u64;
        self
    }

    /// Set the resource profile
    pub fn with_resources(mut self, resources: ResourceRequirements) -> Self {
        self.resources = resources;
        self
    }

    /// Set the submission context
    pub fn with_context(mut self, context: TaskContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Declared duration as a Duration
    pub fn estimated_duration(&self) -> Duration {
        Duration::from_millis(self.estimated_duration_ms)
    }

    /// Performance-cache signature: tasks with the same type and resource
    /// profile are expected to behave alike
    pub fn signature(&self) -> (TaskType, ResourceRequirements) {
        (self.task_type.clone(), self.resources.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_type_round_trip() {
        for name in ["analysis", "research", "implementation", "testing"] {
            let t = TaskType::from(name);
            assert_eq!(t.to_string(), name);
            assert!(!matches!(t, TaskType::Other(_)));
        }

        let t = TaskType::from("migration");
        assert_eq!(t, TaskType::Other("migration".to_string()));
        assert_eq!(t.to_string(), "migration");
    }

    #[test]
    fn test_task_type_serde_as_string() {
        let json = serde_json::to_string(&TaskType::Testing).unwrap();
        assert_eq!(json, "\"testing\"");

        let t: TaskType = serde_json::from_str("\"cleanup\"").unwrap();
        assert_eq!(t, TaskType::Other("cleanup".to_string()));
    }

    #[test]
    fn test_task_new_defaults() {
        let task = Task::new("analysis", "Review module layout");
        assert!(task.id.contains("-task-"));
        assert_eq!(task.task_type, TaskType::Analysis);
        assert_eq!(task.estimated_duration_ms, 1_000);
        assert_eq!(task.resources.cpu, 2);
        assert!(task.context.is_none());
    }

    #[test]
    fn test_task_builders() {
        let task = Task::new("testing", "Run the suite")
            .with_estimated_duration(Duration::from_millis(250))
            .with_resources(ResourceRequirements {
                cpu: 4,
                memory_mb: 2048,
                io: IoProfile::High,
            })
            .with_context(TaskContext::new(Urgency::Urgent));

        assert_eq!(task.estimated_duration(), Duration::from_millis(250));
        assert_eq!(task.resources.cpu, 4);
        assert_eq!(task.context.unwrap().urgency, Urgency::Urgent);
    }

    #[test]
    fn test_signature_groups_alike_tasks() {
        let a = Task::new("research", "topic one");
        let b = Task::new("research", "topic two");
        assert_eq!(a.signature(), b.signature());

        let c = Task::new("research", "topic three").with_resources(ResourceRequirements {
            cpu: 8,
            memory_mb: 512,
            io: IoProfile::Medium,
        });
        assert_ne!(a.signature(), c.signature());
    }
}
