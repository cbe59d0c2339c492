//! HandlerRegistry - lookup table from task type to execution routine

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::domain::TaskType;

use super::builtin::{AnalysisHandler, GenericHandler, ImplementationHandler, ResearchHandler, TestingHandler};
use super::traits::TaskHandler;

/// Maps task types to handlers. Resolution never fails: types without a
/// registered handler dispatch to the generic fallback.
pub struct HandlerRegistry {
    handlers: HashMap<TaskType, Arc<dyn TaskHandler>>,
    generic: Arc<dyn TaskHandler>,
}

impl HandlerRegistry {
    /// Create a registry with the standard built-in handlers
    pub fn standard() -> Self {
        let mut handlers: HashMap<TaskType, Arc<dyn TaskHandler>> = HashMap::new();

        handlers.insert(TaskType::Analysis, Arc::new(AnalysisHandler));
        handlers.insert(TaskType::Research, Arc::new(ResearchHandler));
        handlers.insert(TaskType::Implementation, Arc::new(ImplementationHandler));
        handlers.insert(TaskType::Testing, Arc::new(TestingHandler));

        Self {
            handlers,
            generic: Arc::new(GenericHandler),
        }
    }

    /// Create a registry with only the generic fallback (for testing)
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
            generic: Arc::new(GenericHandler),
        }
    }

    /// Register a handler for a task type, replacing any existing one
    pub fn register(&mut self, task_type: impl Into<TaskType>, handler: Arc<dyn TaskHandler>) {
        let task_type = task_type.into();
        debug!(%task_type, handler = handler.name(), "HandlerRegistry::register: called");
        self.handlers.insert(task_type, handler);
    }

    /// Replace the generic fallback handler
    pub fn set_generic(&mut self, handler: Arc<dyn TaskHandler>) {
        self.generic = handler;
    }

    /// Resolve the handler for a task type, falling back to generic
    pub fn resolve(&self, task_type: &TaskType) -> Arc<dyn TaskHandler> {
        match self.handlers.get(task_type) {
            Some(handler) => Arc::clone(handler),
            None => {
                debug!(%task_type, "HandlerRegistry::resolve: no handler, using generic fallback");
                Arc::clone(&self.generic)
            }
        }
    }

    /// Check if a task type has a dedicated handler
    pub fn has_handler(&self, task_type: &TaskType) -> bool {
        self.handlers.contains_key(task_type)
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_registry_covers_builtin_types() {
        let registry = HandlerRegistry::standard();

        assert!(registry.has_handler(&TaskType::Analysis));
        assert!(registry.has_handler(&TaskType::Research));
        assert!(registry.has_handler(&TaskType::Implementation));
        assert!(registry.has_handler(&TaskType::Testing));
        assert!(!registry.has_handler(&TaskType::Other("migration".to_string())));
    }

    #[test]
    fn test_resolve_known_type() {
        let registry = HandlerRegistry::standard();
        let handler = registry.resolve(&TaskType::Research);
        assert_eq!(handler.name(), "research");
    }

    #[test]
    fn test_resolve_unknown_type_falls_back_to_generic() {
        let registry = HandlerRegistry::standard();
        let handler = registry.resolve(&TaskType::Other("migration".to_string()));
        assert_eq!(handler.name(), "generic");
    }

    #[test]
    fn test_register_custom_type() {
        let mut registry = HandlerRegistry::empty();
        assert_eq!(registry.resolve(&TaskType::Analysis).name(), "generic");

        registry.register("analysis", Arc::new(AnalysisHandler));
        assert_eq!(registry.resolve(&TaskType::Analysis).name(), "analysis");
    }
}
