//! implementation handler - phased build-out with quality figures

use async_trait::async_trait;
use rand::Rng;
use tracing::debug;

use crate::domain::Task;
use crate::handler::{HandlerOutcome, TaskHandler};

const PHASES: [&str; 6] = [
    "setting up project structure",
    "writing core components",
    "implementing business logic",
    "adding styling and interfaces",
    "optimizing performance",
    "writing documentation",
];

/// Runs a task through the implementation phases, reporting the produced
/// artifacts and synthetic quality figures
pub struct ImplementationHandler;

#[async_trait]
impl TaskHandler for ImplementationHandler {
    fn name(&self) -> &'static str {
        "implementation"
    }

    async fn run(&self, task: &Task) -> HandlerOutcome {
        debug!(task_id = %task.id, "ImplementationHandler::run: called");
        let phase_time = task.estimated_duration() / PHASES.len() as u32;

        let mut completed_phases = Vec::with_capacity(PHASES.len());
        for phase in PHASES {
            tokio::time::sleep(phase_time).await;
            completed_phases.push(phase);
        }

        let (coverage, performance_score, maintainability) = {
            let mut rng = rand::rng();
            (
                rng.random_range(85.0..95.0),
                rng.random_range(80.0..95.0),
                rng.random_range(75.0..95.0),
            )
        };

        HandlerOutcome::success(serde_json::json!({
            "task_type": "implementation",
            "phases": completed_phases,
            "components": ["core module", "service layer", "public interface"],
            "files": ["core.rs", "service.rs", "lib.rs"],
            "quality": {
                "code_coverage": coverage,
                "performance_score": performance_score,
                "maintainability_index": maintainability,
            },
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_implementation_completes_all_phases() {
        let task = Task::new("implementation", "service layer").with_estimated_duration(Duration::from_millis(12));
        let outcome = ImplementationHandler.run(&task).await;

        assert!(outcome.is_success());
        assert_eq!(outcome.data["phases"].as_array().unwrap().len(), PHASES.len());

        let coverage = outcome.data["quality"]["code_coverage"].as_f64().unwrap();
        assert!((85.0..95.0).contains(&coverage));
    }
}
