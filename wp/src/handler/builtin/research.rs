//! research handler - topic survey with synthetic confidence figures

use async_trait::async_trait;
use rand::Rng;
use tracing::debug;

use crate::domain::Task;
use crate::handler::{HandlerOutcome, TaskHandler};

const TOPICS: [&str; 5] = [
    "current best practices",
    "library and framework options",
    "performance optimization techniques",
    "security considerations",
    "testing strategies",
];

/// Surveys a fixed topic list, spending the declared duration evenly and
/// attaching a confidence and source count to each topic
pub struct ResearchHandler;

#[async_trait]
impl TaskHandler for ResearchHandler {
    fn name(&self) -> &'static str {
        "research"
    }

    async fn run(&self, task: &Task) -> HandlerOutcome {
        debug!(task_id = %task.id, "ResearchHandler::run: called");
        let topic_time = task.estimated_duration() / TOPICS.len() as u32;

        let mut findings = serde_json::Map::new();
        let mut sources = Vec::with_capacity(TOPICS.len());
        for topic in TOPICS {
            tokio::time::sleep(topic_time).await;

            // Keep the rng scoped so the future stays Send
            let (confidence, source_count) = {
                let mut rng = rand::rng();
                (rng.random_range(0.70..1.00), rng.random_range(3..9))
            };
            findings.insert(
                topic.to_string(),
                serde_json::json!({
                    "summary": format!("research findings for {}", topic),
                    "confidence": confidence,
                    "sources": source_count,
                }),
            );
            sources.push(format!("research source for {}", topic));
        }

        HandlerOutcome::success(serde_json::json!({
            "task_type": "research",
            "findings": findings,
            "sources": sources,
            "recommendations": [
                "prefer well-maintained libraries over hand-rolled code",
                "add comprehensive tests before refactoring",
                "measure before optimizing",
            ],
        }))
    }
}
