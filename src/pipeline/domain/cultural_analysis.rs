use serde::{Deserialize, Serialize};

/// Historical and geographic attribution of the artifact.
///
/// The four required fields are always populated, either from the AI draft or
/// from the heuristic fallbacks. Only `preservation_notes` may be absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CulturalAnalysis {
    pub origin_region: String,
    pub historical_period: String,
    pub traditional_use: String,
    pub artistic_elements: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preservation_notes: Option<String>,
}

impl CulturalAnalysis {
    /// True when every required field carries a non-blank value.
    pub fn is_complete(&self) -> bool {
        !self.origin_region.trim().is_empty()
            && !self.historical_period.trim().is_empty()
            && !self.traditional_use.trim().is_empty()
            && !self.artistic_elements.is_empty()
            && self
                .artistic_elements
                .iter()
                .all(|element| !element.trim().is_empty())
    }
}

/// Partial analysis as returned by the completion capability. Every field is
/// optional; missing ones are filled by the synthesizer's fallbacks.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CulturalAnalysisDraft {
    pub origin_region: Option<String>,
    pub historical_period: Option<String>,
    pub traditional_use: Option<String>,
    pub artistic_elements: Option<Vec<String>>,
    pub preservation_notes: Option<String>,
}

impl CulturalAnalysisDraft {
    pub fn origin_region(&self) -> Option<String> {
        non_blank(self.origin_region.as_deref())
    }

    pub fn historical_period(&self) -> Option<String> {
        non_blank(self.historical_period.as_deref())
    }

    pub fn traditional_use(&self) -> Option<String> {
        non_blank(self.traditional_use.as_deref())
    }

    pub fn preservation_notes(&self) -> Option<String> {
        non_blank(self.preservation_notes.as_deref())
    }

    pub fn artistic_elements(&self) -> Option<Vec<String>> {
        self.artistic_elements.as_ref().and_then(|elements| non_blank_list(elements))
    }
}

pub(crate) fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

pub(crate) fn non_blank_list(values: &[String]) -> Option<Vec<String>> {
    let cleaned: Vec<String> = values
        .iter()
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect();
    if cleaned.is_empty() { None } else { Some(cleaned) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_ignores_blank_values() {
        let draft: CulturalAnalysisDraft = serde_json::from_str(
            r#"{"originRegion":"  ","historicalPeriod":"Majapahit era","artisticElements":["", " kawung "]}"#,
        )
        .unwrap();
        assert_eq!(draft.origin_region(), None);
        assert_eq!(draft.historical_period().as_deref(), Some("Majapahit era"));
        assert_eq!(draft.artistic_elements(), Some(vec!["kawung".to_string()]));
        assert_eq!(draft.traditional_use(), None);
    }

    #[test]
    fn incomplete_analysis_is_detected() {
        let analysis = CulturalAnalysis {
            origin_region: "Java".into(),
            historical_period: "".into(),
            traditional_use: "Ceremony".into(),
            artistic_elements: vec!["relief".into()],
            preservation_notes: None,
        };
        assert!(!analysis.is_complete());
    }
}
