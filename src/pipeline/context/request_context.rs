use crate::common::AnalysisRequest;
use crate::pipeline::context::metrics::{PipelinePhase, StageTimings};
use crate::pipeline::context::state::{Captured, Grounded, ProcessingState, Submitted, Synthesized};
use crate::pipeline::domain::{
    AnalysisReport, CulturalAnalysis, OcrResult, SearchResult, TextExtractionMetadata,
    VisionResult,
};
use chrono::Utc;
use std::time::Instant;
use tracing::debug;

// RequestContext with compile-time stage tracking via the state marker
pub struct RequestContext<S> {
    request: AnalysisRequest,
    timings: StageTimings,
    phase_start: Instant,
    state: S,
}

impl<S: ProcessingState> RequestContext<S> {
    pub fn request(&self) -> &AnalysisRequest {
        &self.request
    }

    pub fn state_name(&self) -> &'static str {
        S::state_name()
    }

    /// Closes the current phase and moves the accumulated data into the next state.
    fn advance<T>(self, phase: PipelinePhase, next: impl FnOnce(S) -> T) -> RequestContext<T> {
        let RequestContext {
            request,
            mut timings,
            phase_start,
            state,
        } = self;
        timings.record(phase, phase_start.elapsed());
        RequestContext {
            request,
            timings,
            phase_start: Instant::now(),
            state: next(state),
        }
    }
}

impl RequestContext<Submitted> {
    pub fn new(request: AnalysisRequest) -> Self {
        let now = Instant::now();
        Self {
            request,
            timings: StageTimings::new(),
            phase_start: now,
            state: Submitted,
        }
    }

    pub fn into_captured(self, vision: VisionResult, ocr: OcrResult) -> RequestContext<Captured> {
        self.advance(PipelinePhase::Capture, |_| Captured { vision, ocr })
    }
}

impl RequestContext<Captured> {
    pub fn vision(&self) -> &VisionResult {
        &self.state.vision
    }

    pub fn ocr(&self) -> &OcrResult {
        &self.state.ocr
    }

    pub fn into_grounded(self, search: SearchResult) -> RequestContext<Grounded> {
        self.advance(PipelinePhase::Grounding, |Captured { vision, ocr }| Grounded {
            vision,
            ocr,
            search,
        })
    }
}

impl RequestContext<Grounded> {
    pub fn vision(&self) -> &VisionResult {
        &self.state.vision
    }

    pub fn ocr(&self) -> &OcrResult {
        &self.state.ocr
    }

    pub fn search(&self) -> &SearchResult {
        &self.state.search
    }

    pub fn into_synthesized(self, analysis: CulturalAnalysis) -> RequestContext<Synthesized> {
        self.advance(PipelinePhase::Synthesis, |Grounded { vision, ocr, .. }| {
            Synthesized {
                vision,
                ocr,
                analysis,
            }
        })
    }
}

impl RequestContext<Synthesized> {
    pub fn ocr(&self) -> &OcrResult {
        &self.state.ocr
    }

    pub fn analysis(&self) -> &CulturalAnalysis {
        &self.state.analysis
    }

    /// Consumes the context into the final report and the request's timings.
    pub fn into_report(self, metadata: TextExtractionMetadata) -> (AnalysisReport, StageTimings) {
        let RequestContext {
            request,
            mut timings,
            phase_start,
            state,
        } = self;
        timings.record(PipelinePhase::Assembly, phase_start.elapsed());
        debug!(
            "Request {} assembled {:?} after submission",
            request.request_id(),
            (Utc::now() - request.submitted_at()).to_std().unwrap_or_default()
        );
        let Synthesized {
            vision,
            ocr,
            analysis,
        } = state;
        (AnalysisReport::assemble(vision, ocr, metadata, analysis), timings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::domain::report::GENERIC_CATEGORY;

    fn analysis() -> CulturalAnalysis {
        CulturalAnalysis {
            origin_region: "Bali".into(),
            historical_period: "20th century CE".into(),
            traditional_use: "Temple dance".into(),
            artistic_elements: vec!["gold leaf".into()],
            preservation_notes: None,
        }
    }

    #[test]
    fn walks_every_state_and_records_each_phase() {
        let request = AnalysisRequest::from_bytes(vec![1u8, 2, 3]).unwrap();
        let context = RequestContext::new(request.clone());
        assert_eq!(context.state_name(), "Submitted");
        assert_eq!(context.request().request_id(), request.request_id());

        let context = context.into_captured(VisionResult::new("topeng", "barong"), OcrResult::new("Ubud 1932"));
        assert_eq!(context.state_name(), "Captured");
        assert_eq!(context.vision().search_query(), "topeng barong");

        let context = context.into_grounded(SearchResult::empty());
        assert_eq!(context.search(), &SearchResult::empty());

        let context = context.into_synthesized(analysis());
        assert_eq!(context.analysis().origin_region, "Bali");

        let (report, timings) = context.into_report(TextExtractionMetadata::default());
        assert_eq!(report.object_recognition.category, "topeng");
        assert_eq!(report.text_extraction.text, "Ubud 1932");

        let phases: Vec<_> = timings.phases().map(|(phase, _)| *phase).collect();
        assert_eq!(
            phases,
            vec![
                PipelinePhase::Capture,
                PipelinePhase::Grounding,
                PipelinePhase::Synthesis,
                PipelinePhase::Assembly
            ]
        );
    }

    #[test]
    fn report_defaults_apply_to_blank_vision() {
        let request = AnalysisRequest::from_bytes(vec![9u8]).unwrap();
        let (report, _) = RequestContext::new(request)
            .into_captured(VisionResult::default(), OcrResult::default())
            .into_grounded(SearchResult::empty())
            .into_synthesized(analysis())
            .into_report(TextExtractionMetadata::default());
        assert_eq!(report.object_recognition.category, GENERIC_CATEGORY);
    }
}
