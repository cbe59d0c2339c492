//! testing handler - suite-by-suite verification with synthetic results

use async_trait::async_trait;
use rand::Rng;
use tracing::debug;

use crate::domain::Task;
use crate::handler::{HandlerOutcome, TaskHandler};

const SUITES: [&str; 5] = [
    "unit tests",
    "integration tests",
    "end-to-end tests",
    "performance tests",
    "accessibility tests",
];

/// Runs a task through the test suites, spending the declared duration
/// evenly and drawing per-suite pass/fail figures
pub struct TestingHandler;

#[async_trait]
impl TaskHandler for TestingHandler {
    fn name(&self) -> &'static str {
        "testing"
    }

    async fn run(&self, task: &Task) -> HandlerOutcome {
        debug!(task_id = %task.id, "TestingHandler::run: called");
        let suite_time = task.estimated_duration() / SUITES.len() as u32;
        let suite_time_ms = task.estimated_duration_ms as f64 / SUITES.len() as f64;

        let mut results = serde_json::Map::new();
        for suite in SUITES {
            tokio::time::sleep(suite_time).await;

            let (passed_all, total) = {
                let mut rng = rand::rng();
                (rng.random_bool(0.9), rng.random_range(10..31))
            };
            let failed = if passed_all { 0 } else { total / 10 };
            results.insert(
                suite.to_string(),
                serde_json::json!({
                    "total": total,
                    "passed": total - failed,
                    "failed": failed,
                    "duration_ms": suite_time_ms,
                }),
            );
        }

        let (lines, functions, render_time, memory_mb) = {
            let mut rng = rand::rng();
            (
                rng.random_range(70.0..90.0),
                rng.random_range(75.0..90.0),
                rng.random_range(16.0..26.0),
                rng.random_range(20.0..50.0),
            )
        };

        HandlerOutcome::success(serde_json::json!({
            "task_type": "testing",
            "test_results": results,
            "coverage": {
                "lines": lines,
                "functions": functions,
            },
            "performance": {
                "render_time_ms": render_time,
                "memory_usage_mb": memory_mb,
            },
        }))
    }
}
