use crate::common::{AnalysisRequest, ImageSource};
use crate::error::{Capability, CapabilityError};
use crate::pipeline::capability::{
    CompletionClient, CompletionRequest, CulturalKnowledgeSearch, TextReader, VisionRecognizer,
};
use crate::pipeline::domain::{CulturalInfo, OcrResult, SearchResult, VisionResult};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Scriptable capabilities shared by the orchestration tests.
pub(crate) struct MockCapabilities {
    pub vision: Result<VisionResult, CapabilityError>,
    pub ocr: Result<OcrResult, CapabilityError>,
    pub search: Result<SearchResult, CapabilityError>,
    pub completion: Result<String, CapabilityError>,
    pub delay: Option<(Capability, Duration)>,
    pub calls: Mutex<Vec<Capability>>,
}

impl MockCapabilities {
    pub fn keris() -> Self {
        Self {
            vision: Ok(VisionResult::new("keris", "keris luk 7")
                .with_confidence(0.82)
                .with_description("A wavy-bladed dagger with a carved hilt")
                .with_elements(["pamor pattern", "wrangka sheath"])),
            ocr: Ok(OcrResult::new("Museum Pusaka Taman Mini, Jakarta 1998").with_confidence(0.9)),
            search: Ok(SearchResult::with_info(
                CulturalInfo::default().with_significance("Heirloom and spiritual weapon"),
            )),
            completion: Ok("{\"historicalPeriod\": \"Majapahit era\"}".to_string()),
            delay: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(mut self, capability: Capability) -> Self {
        let error = CapabilityError::failed(capability, "scripted failure");
        match capability {
            Capability::Vision => self.vision = Err(error),
            Capability::TextReader => self.ocr = Err(error),
            Capability::Search => self.search = Err(error),
            Capability::Completion => self.completion = Err(error),
        }
        self
    }

    pub fn slow(mut self, capability: Capability, delay: Duration) -> Self {
        self.delay = Some((capability, delay));
        self
    }

    pub fn calls(&self) -> Vec<Capability> {
        self.calls.lock().unwrap().clone()
    }

    async fn enter(&self, capability: Capability) {
        self.calls.lock().unwrap().push(capability);
        if let Some((slow, delay)) = self.delay {
            if slow == capability {
                tokio::time::sleep(delay).await;
            }
        }
    }
}

#[async_trait]
impl VisionRecognizer for MockCapabilities {
    async fn recognize(&self, _image: &ImageSource) -> Result<VisionResult, CapabilityError> {
        self.enter(Capability::Vision).await;
        self.vision.clone()
    }
}

#[async_trait]
impl TextReader for MockCapabilities {
    async fn read_text(&self, _image: &ImageSource) -> Result<OcrResult, CapabilityError> {
        self.enter(Capability::TextReader).await;
        self.ocr.clone()
    }
}

#[async_trait]
impl CulturalKnowledgeSearch for MockCapabilities {
    async fn lookup(&self, _query: &str) -> Result<SearchResult, CapabilityError> {
        self.enter(Capability::Search).await;
        self.search.clone()
    }
}

#[async_trait]
impl CompletionClient for MockCapabilities {
    async fn complete(&self, _request: CompletionRequest) -> Result<String, CapabilityError> {
        self.enter(Capability::Completion).await;
        self.completion.clone()
    }
}

pub(crate) fn photo() -> AnalysisRequest {
    AnalysisRequest::from_bytes(vec![0xFF, 0xD8, 0xFF, 0xE0]).unwrap()
}

pub(crate) fn shared(mock: MockCapabilities) -> Arc<MockCapabilities> {
    Arc::new(mock)
}
