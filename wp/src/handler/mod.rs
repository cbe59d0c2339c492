//! Task execution routines
//!
//! Pluggable handlers keyed by task type. Unknown types fall back to the
//! generic handler rather than failing.

mod builtin;
mod registry;
mod traits;

pub use builtin::{AnalysisHandler, GenericHandler, ImplementationHandler, ResearchHandler, TestingHandler};
pub use registry::HandlerRegistry;
pub use traits::{HandlerOutcome, TaskHandler};
