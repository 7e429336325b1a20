use crate::pipeline::domain::{SearchResult, VisionResult};

pub const LIMITED_DATA_MARKER: &str = "Limited cultural data available";

pub fn build_prompt(vision: &VisionResult, search: &SearchResult, ocr_text: &str) -> String {
    let elements = if vision.cultural_elements.is_empty() {
        "none identified".to_string()
    } else {
        vision.cultural_elements.join(", ")
    };
    let ocr_text = ocr_text.trim();
    let ocr_text = if ocr_text.is_empty() {
        "no readable text"
    } else {
        ocr_text
    };

    format!(
        "You are an expert on Indonesian cultural heritage. Analyze the artifact below.\n\
         \n\
         Visual recognition:\n\
         - Category: {category}\n\
         - Specific type: {specific_type}\n\
         - Description: {description}\n\
         - Cultural elements: {elements}\n\
         \n\
         Text found in the photo: {ocr_text}\n\
         \n\
         Reference information: {reference}\n\
         \n\
         Respond with a single JSON object and nothing else, using these keys:\n\
         {{\"originRegion\": string, \"historicalPeriod\": string, \"traditionalUse\": string, \
         \"artisticElements\": [string], \"preservationNotes\": string}}",
        category = vision.category,
        specific_type = vision.specific_type,
        description = vision.description,
        reference = summarize_search(search),
    )
}

/// Flattens the search evidence into one line, or the limited-data marker.
pub fn summarize_search(search: &SearchResult) -> String {
    let parts: Vec<String> = [
        ("Description", search.description()),
        ("Origin", search.origin()),
        ("Historical context", search.historical_context()),
        ("Significance", search.significance()),
    ]
    .into_iter()
    .filter_map(|(label, value)| value.map(|value| format!("{label}: {value}")))
    .collect();

    if parts.is_empty() {
        LIMITED_DATA_MARKER.to_string()
    } else {
        parts.join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::domain::CulturalInfo;

    #[test]
    fn prompt_embeds_vision_and_ocr() {
        let vision = VisionResult::new("wayang", "wayang kulit")
            .with_description("Leather shadow puppet")
            .with_elements(["tatah sungging", "gapit"]);
        let prompt = build_prompt(&vision, &SearchResult::empty(), "Museum Wayang 1975");

        assert!(prompt.contains("Category: wayang"));
        assert!(prompt.contains("Specific type: wayang kulit"));
        assert!(prompt.contains("tatah sungging, gapit"));
        assert!(prompt.contains("Museum Wayang 1975"));
        assert!(prompt.contains(LIMITED_DATA_MARKER));
        assert!(prompt.contains("\"originRegion\""));
    }

    #[test]
    fn search_summary_skips_missing_fields() {
        let search = SearchResult::with_info(
            CulturalInfo::default()
                .with_origin("Bali")
                .with_significance("Temple offering"),
        );
        assert_eq!(
            summarize_search(&search),
            "Origin: Bali; Significance: Temple offering"
        );
    }

    #[test]
    fn empty_ocr_text_is_called_out() {
        let prompt = build_prompt(&VisionResult::default(), &SearchResult::empty(), "   ");
        assert!(prompt.contains("no readable text"));
        assert!(prompt.contains("none identified"));
    }
}
