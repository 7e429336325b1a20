use super::json_object::extract_first_object;
use super::prompt::build_prompt;
use crate::config::SynthesisConfig;
use crate::error::{Capability, CapabilityError, SynthesisError};
use crate::pipeline::capability::{CompletionClient, CompletionRequest};
use crate::pipeline::domain::cultural_analysis::non_blank_list;
use crate::pipeline::domain::{CulturalAnalysis, CulturalAnalysisDraft, SearchResult, VisionResult};
use crate::pipeline::heuristics::{explain_origin, explain_period};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

pub const DEFAULT_TRADITIONAL_USE: &str =
    "Used in traditional Indonesian cultural and ceremonial life";
pub const DEFAULT_ARTISTIC_ELEMENT: &str = "Traditional Indonesian craftsmanship";

/// Merges vision, search and OCR evidence into a cultural analysis with one
/// completion call, falling back to heuristics field by field.
pub struct CulturalSynthesizer {
    client: Arc<dyn CompletionClient>,
    max_tokens: u32,
    temperature: f32,
    call_timeout: Option<Duration>,
}

impl CulturalSynthesizer {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        let defaults = SynthesisConfig::default();
        Self {
            client,
            max_tokens: defaults.max_tokens,
            temperature: defaults.temperature,
            call_timeout: None,
        }
    }

    pub fn with_config(mut self, config: &SynthesisConfig) -> Self {
        self.max_tokens = config.max_tokens;
        self.temperature = config.temperature;
        self
    }

    pub fn with_call_timeout(mut self, call_timeout: Option<Duration>) -> Self {
        self.call_timeout = call_timeout;
        self
    }

    /// Never fails: any completion or parse problem yields the heuristic analysis.
    #[instrument(skip_all, fields(category = %vision.category))]
    pub async fn synthesize(
        &self,
        vision: &VisionResult,
        search: &SearchResult,
        ocr_text: &str,
    ) -> CulturalAnalysis {
        let draft = match self.request_draft(vision, search, ocr_text).await {
            Ok(draft) => Some(draft),
            Err(e) => {
                warn!("Cultural synthesis fell back to heuristics: {}", e);
                None
            }
        };
        merge_with_fallbacks(draft.as_ref(), vision, search)
    }

    pub async fn request_draft(
        &self,
        vision: &VisionResult,
        search: &SearchResult,
        ocr_text: &str,
    ) -> Result<CulturalAnalysisDraft, SynthesisError> {
        let request = CompletionRequest {
            prompt: build_prompt(vision, search, ocr_text),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let raw = match self.call_timeout {
            Some(after) => tokio::time::timeout(after, self.client.complete(request))
                .await
                .map_err(|_| CapabilityError::TimedOut {
                    capability: Capability::Completion,
                    after,
                })??,
            None => self.client.complete(request).await?,
        };
        debug!("Completion returned {} bytes", raw.len());

        let object = extract_first_object(&raw).ok_or(SynthesisError::NoJsonObject)?;
        Ok(serde_json::from_str(object)?)
    }
}

/// Field-by-field precedence: AI draft first, then search or vision evidence,
/// then the provenance rules or fixed defaults.
pub fn merge_with_fallbacks(
    draft: Option<&CulturalAnalysisDraft>,
    vision: &VisionResult,
    search: &SearchResult,
) -> CulturalAnalysis {
    let origin_region = draft
        .and_then(CulturalAnalysisDraft::origin_region)
        .unwrap_or_else(|| {
            let verdict = explain_origin(vision, search);
            debug!("Origin inferred by rule {}", verdict.rule);
            verdict.value
        });
    let historical_period = draft
        .and_then(CulturalAnalysisDraft::historical_period)
        .unwrap_or_else(|| {
            let verdict = explain_period(vision, search);
            debug!("Period inferred by rule {}", verdict.rule);
            verdict.value
        });
    let traditional_use = draft
        .and_then(CulturalAnalysisDraft::traditional_use)
        .or_else(|| search.significance().map(str::to_string))
        .unwrap_or_else(|| DEFAULT_TRADITIONAL_USE.to_string());
    let artistic_elements = draft
        .and_then(CulturalAnalysisDraft::artistic_elements)
        .or_else(|| non_blank_list(&vision.cultural_elements))
        .unwrap_or_else(|| vec![DEFAULT_ARTISTIC_ELEMENT.to_string()]);

    CulturalAnalysis {
        origin_region,
        historical_period,
        traditional_use,
        artistic_elements,
        preservation_notes: draft.and_then(CulturalAnalysisDraft::preservation_notes),
    }
}
