pub mod capability;
pub mod context;
pub mod domain;
pub mod extraction;
pub mod heuristics;
pub mod orchestration;
pub mod synthesis;

pub use capability::{
    CompletionClient, CompletionRequest, CulturalKnowledgeSearch, FixtureCapabilities, TextReader,
    VisionRecognizer,
};
pub use domain::{AnalysisReport, CulturalAnalysis, OcrResult, SearchResult, VisionResult};
pub use orchestration::{
    AnalysisOrchestrator, AnalysisStage, DeadlineAnalyzer, ProgressEvent,
    StreamingProgressReporter,
};
