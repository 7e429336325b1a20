//! Structured hints pulled out of raw OCR text.
//!
//! Each extractor is independent and may legitimately find nothing: most
//! artifact photos carry no legible institution name or date.

use crate::pipeline::domain::TextExtractionMetadata;
use once_cell::sync::Lazy;
use regex::Regex;

const ADDITIONAL_INFO_MAX_CHARS: usize = 200;

const KNOWN_LOCATIONS: &[&str] = &[
    "Yogyakarta",
    "Jogjakarta",
    "Jogja",
    "Jakarta",
    "Surakarta",
    "Solo",
    "Bandung",
    "Semarang",
    "Surabaya",
    "Malang",
    "Magelang",
    "Klaten",
    "Pekalongan",
    "Cirebon",
    "Denpasar",
    "Bali",
    "Lombok",
    "Madura",
    "Medan",
    "Palembang",
    "Padang",
    "Aceh",
    "Makassar",
    "Toraja",
    "Manado",
    "Ambon",
    "Jayapura",
    "Papua",
    "Kalimantan",
    "Sumatra",
    "Sumatera",
    "Sulawesi",
    "Java",
    "Jawa",
];

// Capitalized name run first, then any single following word.
static MUSEUM_PROPER_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i:\b(?:museum|galeri))[ \t]+(\p{Lu}[\p{L}\p{N}'.-]*(?:[ \t]+\p{Lu}[\p{L}\p{N}'.-]*)*)",
    )
    .unwrap()
});
static MUSEUM_ANY_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:museum|galeri)\s+([\p{L}\p{N}'-]+)").unwrap());
static LOCATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)\b(?:{})\b", KNOWN_LOCATIONS.join("|"))).unwrap()
});
static YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").unwrap());

pub fn extract_museum_name(text: &str) -> Option<String> {
    MUSEUM_PROPER_NAME
        .captures(text)
        .or_else(|| MUSEUM_ANY_WORD.captures(text))
        .and_then(|captures| captures.get(1))
        .map(|name| name.as_str().trim().trim_end_matches(['.', '-', '\'']).to_string())
        .filter(|name| !name.is_empty())
}

/// The first known city or region, as written in the text.
pub fn extract_location(text: &str) -> Option<String> {
    LOCATION.find(text).map(|found| found.as_str().to_string())
}

pub fn extract_year(text: &str) -> Option<String> {
    YEAR.find(text).map(|found| found.as_str().to_string())
}

pub fn extract_additional_info(text: &str) -> Option<String> {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return None;
    }
    Some(collapsed.chars().take(ADDITIONAL_INFO_MAX_CHARS).collect())
}

pub fn extract_metadata(text: &str) -> TextExtractionMetadata {
    TextExtractionMetadata {
        museum_name: extract_museum_name(text),
        location: extract_location(text),
        year: extract_year(text),
        additional_info: extract_additional_info(text),
    }
}
