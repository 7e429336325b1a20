use serde::{Deserialize, Serialize};

/// What the vision capability saw in the photo.
///
/// Blank strings and a missing confidence mean the recognizer did not report
/// that field; defaults are applied when the report is assembled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VisionResult {
    pub category: String,
    pub specific_type: String,
    pub confidence: Option<f32>,
    pub description: String,
    pub cultural_elements: Vec<String>,
}

impl VisionResult {
    pub fn new(category: impl Into<String>, specific_type: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            specific_type: specific_type.into(),
            ..Self::default()
        }
    }

    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = Some(confidence);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_elements<I, S>(mut self, elements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cultural_elements = elements.into_iter().map(Into::into).collect();
        self
    }

    /// The grounding search query, `"{category} {specificType}"`.
    pub fn search_query(&self) -> String {
        format!("{} {}", self.category.trim(), self.specific_type.trim())
            .trim()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_query_joins_category_and_type() {
        let vision = VisionResult::new("candi", "borobudur temple");
        assert_eq!(vision.search_query(), "candi borobudur temple");
    }

    #[test]
    fn search_query_drops_blank_parts() {
        assert_eq!(VisionResult::new(" batik ", "").search_query(), "batik");
        assert_eq!(VisionResult::default().search_query(), "");
    }

    #[test]
    fn deserializes_partial_payload() {
        let vision: VisionResult =
            serde_json::from_str(r#"{"category":"keris","culturalElements":["pamor"]}"#).unwrap();
        assert_eq!(vision.category, "keris");
        assert_eq!(vision.specific_type, "");
        assert_eq!(vision.confidence, None);
        assert_eq!(vision.cultural_elements, vec!["pamor".to_string()]);
    }
}
