//! Seams to the external services the pipeline consumes.
//!
//! Every collaborator is constructed by the caller and injected as an
//! `Arc<dyn ...>`; nothing here holds process-wide client state.

pub mod fixture;

use crate::common::ImageSource;
use crate::error::CapabilityError;
use crate::pipeline::domain::{OcrResult, SearchResult, VisionResult};
use async_trait::async_trait;

pub use fixture::FixtureCapabilities;

#[async_trait]
pub trait VisionRecognizer: Send + Sync {
    async fn recognize(&self, image: &ImageSource) -> Result<VisionResult, CapabilityError>;
}

/// Reads text in the photo. "No text found" is `Ok` with empty text.
#[async_trait]
pub trait TextReader: Send + Sync {
    async fn read_text(&self, image: &ImageSource) -> Result<OcrResult, CapabilityError>;
}

#[async_trait]
pub trait CulturalKnowledgeSearch: Send + Sync {
    async fn lookup(&self, query: &str) -> Result<SearchResult, CapabilityError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CapabilityError>;
}
