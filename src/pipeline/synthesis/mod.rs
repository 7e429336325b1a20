pub mod json_object;
pub mod prompt;
pub mod synthesizer;

pub use json_object::extract_first_object;
pub use synthesizer::{CulturalSynthesizer, merge_with_fallbacks};
