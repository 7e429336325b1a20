pub mod orchestrator;
pub mod progress;
pub mod service;
pub mod stage;

#[cfg(test)]
pub(crate) mod mock;

pub use orchestrator::{AnalysisOrchestrator, AnalysisOrchestratorBuilder};
pub use progress::{ProgressEvent, StreamingProgressReporter};
pub use service::{AnalysisService, DeadlineAnalyzer, DeadlineAnalyzerBuilder};
pub use stage::{AnalysisStage, SilentObserver, StageObserver};
