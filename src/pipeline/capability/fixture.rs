use super::{
    CompletionClient, CompletionRequest, CulturalKnowledgeSearch, TextReader, VisionRecognizer,
};
use crate::common::ImageSource;
use crate::error::{AppError, Capability, CapabilityError};
use crate::pipeline::domain::{OcrResult, SearchResult, VisionResult};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// A scripted capability answer: either a payload or `{"error": "..."}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Scripted<T> {
    Failure { error: String },
    Success(T),
}

impl<T: Clone> Scripted<T> {
    fn answer(&self, capability: Capability) -> Result<T, CapabilityError> {
        match self {
            Scripted::Success(value) => Ok(value.clone()),
            Scripted::Failure { error } => Err(CapabilityError::failed(capability, error.clone())),
        }
    }
}

/// JSON-scripted stand-in for all four capabilities, used for offline runs.
///
/// ```json
/// {
///   "vision": { "category": "keris", "specificType": "keris luk 7", "confidence": 0.82 },
///   "ocr": { "text": "Museum Pusaka, 1998" },
///   "search": { "culturalInfo": { "origin": "Java" } },
///   "completion": "{\"traditionalUse\": \"Heirloom weapon\"}",
///   "latencyMs": 250
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureCapabilities {
    vision: Scripted<VisionResult>,
    #[serde(default = "unscripted_ocr")]
    ocr: Scripted<OcrResult>,
    #[serde(default = "unscripted_search")]
    search: Scripted<SearchResult>,
    #[serde(default = "unscripted_completion")]
    completion: Scripted<String>,
    #[serde(default)]
    latency_ms: u64,
}

fn unscripted_ocr() -> Scripted<OcrResult> {
    Scripted::Success(OcrResult::default())
}

fn unscripted_search() -> Scripted<SearchResult> {
    Scripted::Success(SearchResult::empty())
}

fn unscripted_completion() -> Scripted<String> {
    Scripted::Failure {
        error: "no completion response scripted".to_string(),
    }
}

impl FixtureCapabilities {
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let raw = tokio::fs::read_to_string(path.as_ref()).await?;
        let fixture = serde_json::from_str(&raw)?;
        debug!("Loaded capability fixture from {}", path.as_ref().display());
        Ok(fixture)
    }

    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }

    async fn simulate_latency(&self) {
        if self.latency_ms > 0 {
            tokio::time::sleep(self.latency()).await;
        }
    }
}

#[async_trait]
impl VisionRecognizer for FixtureCapabilities {
    async fn recognize(&self, _image: &ImageSource) -> Result<VisionResult, CapabilityError> {
        self.simulate_latency().await;
        self.vision.answer(Capability::Vision)
    }
}

#[async_trait]
impl TextReader for FixtureCapabilities {
    async fn read_text(&self, _image: &ImageSource) -> Result<OcrResult, CapabilityError> {
        self.simulate_latency().await;
        self.ocr.answer(Capability::TextReader)
    }
}

#[async_trait]
impl CulturalKnowledgeSearch for FixtureCapabilities {
    async fn lookup(&self, _query: &str) -> Result<SearchResult, CapabilityError> {
        self.simulate_latency().await;
        self.search.answer(Capability::Search)
    }
}

#[async_trait]
impl CompletionClient for FixtureCapabilities {
    async fn complete(&self, _request: CompletionRequest) -> Result<String, CapabilityError> {
        self.simulate_latency().await;
        self.completion.answer(Capability::Completion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn image() -> ImageSource {
        ImageSource::Bytes(vec![0u8; 4].into())
    }

    #[tokio::test]
    async fn scripted_success_and_failure() {
        let fixture: FixtureCapabilities = serde_json::from_str(
            r#"{
                "vision": {"category": "batik", "specificType": "kawung", "confidence": 0.9},
                "search": {"error": "search backend down"},
                "completion": "{\"originRegion\": \"Yogyakarta\"}"
            }"#,
        )
        .unwrap();

        let vision = fixture.recognize(&image()).await.unwrap();
        assert_eq!(vision.category, "batik");

        let ocr = fixture.read_text(&image()).await.unwrap();
        assert!(ocr.is_empty());

        let err = fixture.lookup("batik kawung").await.unwrap_err();
        assert_eq!(err.capability(), Capability::Search);

        let request = CompletionRequest {
            prompt: String::new(),
            max_tokens: 10,
            temperature: 0.3,
        };
        assert!(fixture.complete(request).await.unwrap().contains("Yogyakarta"));
    }

    #[tokio::test]
    async fn missing_completion_is_a_failure() {
        let fixture: FixtureCapabilities =
            serde_json::from_str(r#"{"vision": {"category": "keris"}}"#).unwrap();
        let request = CompletionRequest {
            prompt: "p".into(),
            max_tokens: 10,
            temperature: 0.3,
        };
        assert!(fixture.complete(request).await.is_err());
    }

    #[tokio::test]
    async fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"vision": {{"error": "unreadable image"}}, "latencyMs": 5}}"#).unwrap();

        let fixture = FixtureCapabilities::load(file.path()).await.unwrap();
        assert_eq!(fixture.latency(), Duration::from_millis(5));
        assert!(fixture.recognize(&image()).await.is_err());
    }
}
