use super::stage::{AnalysisStage, SilentObserver, StageObserver};
use crate::common::{AnalysisRequest, ImageSource};
use crate::config::{Configuration, SynthesisConfig};
use crate::error::{AppError, Capability, CapabilityError};
use crate::pipeline::capability::{
    CompletionClient, CulturalKnowledgeSearch, TextReader, VisionRecognizer,
};
use crate::pipeline::context::RequestContext;
use crate::pipeline::domain::{AnalysisReport, OcrResult, VisionResult};
use crate::pipeline::extraction::extract_metadata;
use crate::pipeline::synthesis::CulturalSynthesizer;
use futures::future;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, instrument};

/// Pipeline entry point: sequences the capabilities for one photo and always
/// hands back a report.
pub struct AnalysisOrchestrator {
    vision: Arc<dyn VisionRecognizer>,
    reader: Arc<dyn TextReader>,
    search: Arc<dyn CulturalKnowledgeSearch>,
    synthesizer: CulturalSynthesizer,
    capability_timeout: Option<Duration>,
    concurrent_capture: bool,
}

impl AnalysisOrchestrator {
    pub fn builder() -> AnalysisOrchestratorBuilder {
        AnalysisOrchestratorBuilder::new()
    }

    /// Never fails; any stage error collapses into [`AnalysisReport::degraded`].
    #[instrument(skip(self, request), fields(request_id = %request.request_id()))]
    pub async fn analyze(&self, request: &AnalysisRequest) -> AnalysisReport {
        match self.try_analyze(request, &SilentObserver).await {
            Ok(report) => report,
            Err(e) => {
                error!("Analysis degraded after {} failure: {}", e.capability(), e);
                AnalysisReport::degraded()
            }
        }
    }

    /// Runs every stage, reporting stage starts to `observer`, and returns the
    /// first capability error instead of degrading.
    pub async fn try_analyze(
        &self,
        request: &AnalysisRequest,
        observer: &dyn StageObserver,
    ) -> Result<AnalysisReport, CapabilityError> {
        let context = RequestContext::new(request.clone());

        let (vision, ocr) = self.capture(context.request().image(), observer).await?;
        debug!(
            "Recognized {:?} / {:?} and read {} characters",
            vision.category,
            vision.specific_type,
            ocr.text.len()
        );
        let context = context.into_captured(vision, ocr);

        observer.stage_started(AnalysisStage::GroundingSearch).await;
        let query = context.vision().search_query();
        let search = self
            .call(Capability::Search, self.search.lookup(&query))
            .await?;
        let context = context.into_grounded(search);

        let analysis = self
            .synthesizer
            .synthesize(context.vision(), context.search(), &context.ocr().text)
            .await;
        let context = context.into_synthesized(analysis);

        let metadata = extract_metadata(&context.ocr().text);
        let (report, timings) = context.into_report(metadata);

        info!(
            "Analysis finished as {:?} in {}ms ({})",
            report.object_recognition.category,
            timings.total().as_millis(),
            timings
        );
        Ok(report)
    }

    async fn capture(
        &self,
        image: &ImageSource,
        observer: &dyn StageObserver,
    ) -> Result<(VisionResult, OcrResult), CapabilityError> {
        if self.concurrent_capture {
            observer.stage_started(AnalysisStage::VisionAnalysis).await;
            observer.stage_started(AnalysisStage::TextExtraction).await;
            let (vision, ocr) = future::join(
                self.call(Capability::Vision, self.vision.recognize(image)),
                self.call(Capability::TextReader, self.reader.read_text(image)),
            )
            .await;
            Ok((vision?, ocr?))
        } else {
            observer.stage_started(AnalysisStage::VisionAnalysis).await;
            let vision = self
                .call(Capability::Vision, self.vision.recognize(image))
                .await?;
            observer.stage_started(AnalysisStage::TextExtraction).await;
            let ocr = self
                .call(Capability::TextReader, self.reader.read_text(image))
                .await?;
            Ok((vision, ocr))
        }
    }

    async fn call<T>(
        &self,
        capability: Capability,
        call: impl Future<Output = Result<T, CapabilityError>>,
    ) -> Result<T, CapabilityError> {
        match self.capability_timeout {
            Some(after) => tokio::time::timeout(after, call)
                .await
                .map_err(|_| CapabilityError::TimedOut { capability, after })?,
            None => call.await,
        }
    }
}

pub struct AnalysisOrchestratorBuilder {
    vision: Option<Arc<dyn VisionRecognizer>>,
    reader: Option<Arc<dyn TextReader>>,
    search: Option<Arc<dyn CulturalKnowledgeSearch>>,
    completion: Option<Arc<dyn CompletionClient>>,
    synthesis: SynthesisConfig,
    capability_timeout: Option<Duration>,
    concurrent_capture: bool,
}

impl AnalysisOrchestratorBuilder {
    pub fn new() -> Self {
        Self {
            vision: None,
            reader: None,
            search: None,
            completion: None,
            synthesis: SynthesisConfig::default(),
            capability_timeout: None,
            concurrent_capture: true,
        }
    }

    pub fn vision(mut self, vision: Arc<dyn VisionRecognizer>) -> Self {
        self.vision = Some(vision);
        self
    }

    pub fn text_reader(mut self, reader: Arc<dyn TextReader>) -> Self {
        self.reader = Some(reader);
        self
    }

    pub fn search(mut self, search: Arc<dyn CulturalKnowledgeSearch>) -> Self {
        self.search = Some(search);
        self
    }

    pub fn completion(mut self, completion: Arc<dyn CompletionClient>) -> Self {
        self.completion = Some(completion);
        self
    }

    /// Uses one provider for all four capabilities.
    pub fn capabilities<C>(self, capabilities: Arc<C>) -> Self
    where
        C: VisionRecognizer + TextReader + CulturalKnowledgeSearch + CompletionClient + 'static,
    {
        self.vision(capabilities.clone())
            .text_reader(capabilities.clone())
            .search(capabilities.clone())
            .completion(capabilities)
    }

    pub fn configuration(mut self, configuration: &Configuration) -> Self {
        self.synthesis = configuration.synthesis.clone();
        self.capability_timeout = configuration.capability_timeout();
        self.concurrent_capture = configuration.concurrent_capture;
        self
    }

    pub fn capability_timeout(mut self, capability_timeout: Duration) -> Self {
        self.capability_timeout = Some(capability_timeout);
        self
    }

    pub fn concurrent_capture(mut self, concurrent_capture: bool) -> Self {
        self.concurrent_capture = concurrent_capture;
        self
    }

    pub fn build(self) -> Result<AnalysisOrchestrator, AppError> {
        let missing = |name: &str| AppError::Configuration(format!("no {} capability configured", name));
        let completion = self.completion.ok_or_else(|| missing("completion"))?;
        let synthesizer = CulturalSynthesizer::new(completion)
            .with_config(&self.synthesis)
            .with_call_timeout(self.capability_timeout);

        Ok(AnalysisOrchestrator {
            vision: self.vision.ok_or_else(|| missing("vision"))?,
            reader: self.reader.ok_or_else(|| missing("text reader"))?,
            search: self.search.ok_or_else(|| missing("search"))?,
            synthesizer,
            capability_timeout: self.capability_timeout,
            concurrent_capture: self.concurrent_capture,
        })
    }
}

impl Default for AnalysisOrchestratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
