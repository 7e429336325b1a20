use super::rules::{Evidence, ORIGIN_RULES, PERIOD_RULES, Verdict};
use crate::pipeline::domain::{SearchResult, VisionResult};

/// Geographic origin from category knowledge and whatever search evidence exists.
pub fn infer_origin(vision: &VisionResult, search: &SearchResult) -> String {
    explain_origin(vision, search).value
}

/// Historical period as a century range plus a named era.
pub fn infer_period(vision: &VisionResult, search: &SearchResult) -> String {
    explain_period(vision, search).value
}

pub fn explain_origin(vision: &VisionResult, search: &SearchResult) -> Verdict {
    ORIGIN_RULES.evaluate(&Evidence::gather(vision, search))
}

pub fn explain_period(vision: &VisionResult, search: &SearchResult) -> Verdict {
    PERIOD_RULES.evaluate(&Evidence::gather(vision, search))
}
