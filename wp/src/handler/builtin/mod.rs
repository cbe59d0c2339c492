//! Built-in execution routines

mod analysis;
mod generic;
mod implementation;
mod research;
mod testing;

pub use analysis::AnalysisHandler;
pub use generic::GenericHandler;
pub use implementation::ImplementationHandler;
pub use research::ResearchHandler;
pub use testing::TestingHandler;
