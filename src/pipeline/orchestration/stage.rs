use async_trait::async_trait;
use serde::Serialize;

/// Externally visible progress stages, in the only order they may be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStage {
    Initializing,
    VisionAnalysis,
    TextExtraction,
    GroundingSearch,
    Finished,
    Error,
}

impl AnalysisStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisStage::Initializing => "initializing",
            AnalysisStage::VisionAnalysis => "vision_analysis",
            AnalysisStage::TextExtraction => "text_extraction",
            AnalysisStage::GroundingSearch => "grounding_search",
            AnalysisStage::Finished => "finished",
            AnalysisStage::Error => "error",
        }
    }

    /// Percentage shown to the user once this stage starts. `None` for `Error`,
    /// which reports the last reached percentage instead.
    pub fn progress(&self) -> Option<u8> {
        match self {
            AnalysisStage::Initializing => Some(0),
            AnalysisStage::VisionAnalysis => Some(20),
            AnalysisStage::TextExtraction => Some(40),
            AnalysisStage::GroundingSearch => Some(60),
            AnalysisStage::Finished => Some(100),
            AnalysisStage::Error => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, AnalysisStage::Finished | AnalysisStage::Error)
    }
}

/// Notified by the orchestrator just before a stage's capability calls start.
#[async_trait]
pub trait StageObserver: Send + Sync {
    async fn stage_started(&self, stage: AnalysisStage);
}

/// Observer for callers that only want the final report.
pub struct SilentObserver;

#[async_trait]
impl StageObserver for SilentObserver {
    async fn stage_started(&self, _stage: AnalysisStage) {}
}
