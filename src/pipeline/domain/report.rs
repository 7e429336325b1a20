use crate::pipeline::domain::{CulturalAnalysis, OcrResult, VisionResult};
use serde::{Deserialize, Serialize};

pub const GENERIC_CATEGORY: &str = "generic_cultural_object";
pub const DEFAULT_CONFIDENCE: f32 = 0.7;
pub const DEGRADED_CONFIDENCE: f32 = 0.3;
pub const DEFAULT_DESCRIPTION: &str =
    "An Indonesian cultural object whose details could not be described automatically.";

const DEGRADED_SPECIFIC_TYPE: &str = "unidentified_artifact";
const DEGRADED_DESCRIPTION: &str = "The object could not be analyzed in detail. It appears to be an Indonesian cultural artifact; try another photo with better lighting for a fuller result.";
const DEGRADED_ORIGIN: &str = "Indonesia";
const DEGRADED_PERIOD: &str = "unknown";
const DEGRADED_TRADITIONAL_USE: &str =
    "Traditional use could not be determined for this object.";
const DEGRADED_ARTISTIC_ELEMENT: &str = "Traditional Indonesian craftsmanship";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectRecognition {
    pub category: String,
    pub specific_type: String,
    pub confidence: f32,
    pub description: String,
    pub cultural_elements: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextExtractionMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub museum_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextExtraction {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
    pub metadata: TextExtractionMetadata,
}

/// The terminal value handed back to the caller, once per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub object_recognition: ObjectRecognition,
    pub text_extraction: TextExtraction,
    pub cultural_analysis: CulturalAnalysis,
}

impl ObjectRecognition {
    /// Applies the defaults for whatever the recognizer left out.
    pub fn from_vision(vision: VisionResult) -> Self {
        let category = if vision.category.trim().is_empty() {
            GENERIC_CATEGORY.to_string()
        } else {
            vision.category
        };
        let description = if vision.description.trim().is_empty() {
            DEFAULT_DESCRIPTION.to_string()
        } else {
            vision.description
        };
        Self {
            category,
            specific_type: vision.specific_type,
            confidence: normalize_confidence(vision.confidence),
            description,
            cultural_elements: vision.cultural_elements,
        }
    }
}

fn normalize_confidence(confidence: Option<f32>) -> f32 {
    match confidence {
        Some(value) if value.is_finite() => value.clamp(0.0, 1.0),
        _ => DEFAULT_CONFIDENCE,
    }
}

impl AnalysisReport {
    pub fn assemble(
        vision: VisionResult,
        ocr: OcrResult,
        metadata: TextExtractionMetadata,
        cultural_analysis: CulturalAnalysis,
    ) -> Self {
        Self {
            object_recognition: ObjectRecognition::from_vision(vision),
            text_extraction: TextExtraction {
                text: ocr.text,
                confidence: ocr.confidence,
                metadata,
            },
            cultural_analysis,
        }
    }

    /// The fixed low-confidence report returned when any stage fails.
    pub fn degraded() -> Self {
        Self {
            object_recognition: ObjectRecognition {
                category: GENERIC_CATEGORY.to_string(),
                specific_type: DEGRADED_SPECIFIC_TYPE.to_string(),
                confidence: DEGRADED_CONFIDENCE,
                description: DEGRADED_DESCRIPTION.to_string(),
                cultural_elements: Vec::new(),
            },
            text_extraction: TextExtraction::default(),
            cultural_analysis: CulturalAnalysis {
                origin_region: DEGRADED_ORIGIN.to_string(),
                historical_period: DEGRADED_PERIOD.to_string(),
                traditional_use: DEGRADED_TRADITIONAL_USE.to_string(),
                artistic_elements: vec![DEGRADED_ARTISTIC_ELEMENT.to_string()],
                preservation_notes: None,
            },
        }
    }

    pub fn is_degraded(&self) -> bool {
        *self == Self::degraded()
    }
}
