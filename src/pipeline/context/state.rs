use crate::pipeline::domain::{CulturalAnalysis, OcrResult, SearchResult, VisionResult};

// Markers to track how far a request has travelled through the pipeline
pub struct Submitted;

pub struct Captured {
    pub(super) vision: VisionResult,
    pub(super) ocr: OcrResult,
}

pub struct Grounded {
    pub(super) vision: VisionResult,
    pub(super) ocr: OcrResult,
    pub(super) search: SearchResult,
}

pub struct Synthesized {
    pub(super) vision: VisionResult,
    pub(super) ocr: OcrResult,
    pub(super) analysis: CulturalAnalysis,
}

pub trait ProcessingState: 'static {
    fn state_name() -> &'static str;
}

impl ProcessingState for Submitted {
    fn state_name() -> &'static str {
        "Submitted"
    }
}

impl ProcessingState for Captured {
    fn state_name() -> &'static str {
        "Captured"
    }
}

impl ProcessingState for Grounded {
    fn state_name() -> &'static str {
        "Grounded"
    }
}

impl ProcessingState for Synthesized {
    fn state_name() -> &'static str {
        "Synthesized"
    }
}
