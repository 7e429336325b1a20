use crate::pipeline::domain::{SearchResult, VisionResult};

/// Lower-cased view of the facts the provenance rules look at.
#[derive(Debug, Clone)]
pub struct Evidence<'a> {
    category: String,
    specific_type: String,
    search_origin: Option<String>,
    search: &'a SearchResult,
}

impl<'a> Evidence<'a> {
    pub fn gather(vision: &VisionResult, search: &'a SearchResult) -> Self {
        Self {
            category: vision.category.to_lowercase(),
            specific_type: vision.specific_type.to_lowercase(),
            search_origin: search.origin().map(str::to_lowercase),
            search,
        }
    }

    pub fn category_has(&self, needle: &str) -> bool {
        self.category.contains(needle)
    }

    pub fn type_has(&self, needle: &str) -> bool {
        self.specific_type.contains(needle)
    }

    pub fn origin_has_any(&self, needles: &[&str]) -> bool {
        self.search_origin
            .as_deref()
            .is_some_and(|origin| needles.iter().any(|needle| origin.contains(needle)))
    }

    /// Whole-word match, so "solo" does not fire on "Solok".
    pub fn origin_has_word(&self, word: &str) -> bool {
        self.search_origin.as_deref().is_some_and(|origin| {
            origin
                .split(|c: char| !c.is_alphanumeric())
                .any(|token| token == word)
        })
    }
}

/// What a matching rule yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Fixed(&'static str),
    SearchOrigin,
    SearchHistoricalContext,
}

impl Outcome {
    fn resolve(&self, evidence: &Evidence<'_>) -> Option<String> {
        match self {
            Outcome::Fixed(value) => Some((*value).to_string()),
            Outcome::SearchOrigin => evidence.search.origin().map(str::to_string),
            Outcome::SearchHistoricalContext => {
                evidence.search.historical_context().map(str::to_string)
            }
        }
    }
}

pub struct Rule {
    pub name: &'static str,
    pub matches: fn(&Evidence<'_>) -> bool,
    pub outcome: Outcome,
}

/// An ordered first-match-wins table with a guaranteed fallback.
pub struct RuleTable {
    pub rules: &'static [Rule],
    pub fallback: &'static str,
}

/// The winning rule and the value it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub rule: &'static str,
    pub value: String,
}

pub const FALLBACK_RULE: &str = "fallback";

impl RuleTable {
    pub fn evaluate(&self, evidence: &Evidence<'_>) -> Verdict {
        self.rules
            .iter()
            .filter(|rule| (rule.matches)(evidence))
            .find_map(|rule| {
                rule.outcome.resolve(evidence).map(|value| Verdict {
                    rule: rule.name,
                    value,
                })
            })
            .unwrap_or_else(|| Verdict {
                rule: FALLBACK_RULE,
                value: self.fallback.to_string(),
            })
    }

    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.name == name)
    }
}

pub static ORIGIN_RULES: RuleTable = RuleTable {
    rules: &[
        Rule {
            name: "candi_borobudur",
            matches: |e| e.category_has("candi") && e.type_has("borobudur"),
            outcome: Outcome::Fixed("Magelang, Central Java (Syailendra dynasty)"),
        },
        Rule {
            name: "candi_prambanan",
            matches: |e| e.category_has("candi") && e.type_has("prambanan"),
            outcome: Outcome::Fixed("Sleman, Yogyakarta (Mataram Kingdom, Sanjaya dynasty)"),
        },
        Rule {
            name: "candi_magelang",
            matches: |e| e.category_has("candi") && e.origin_has_any(&["magelang"]),
            outcome: Outcome::Fixed("Magelang, Central Java"),
        },
        Rule {
            name: "candi_sleman_klaten",
            matches: |e| e.category_has("candi") && e.origin_has_any(&["sleman", "klaten"]),
            outcome: Outcome::Fixed("Sleman-Klaten, Yogyakarta and Central Java border"),
        },
        Rule {
            name: "candi",
            matches: |e| e.category_has("candi"),
            outcome: Outcome::Fixed("Hindu-Buddhist kingdom, Java"),
        },
        Rule {
            name: "batik_yogyakarta",
            matches: |e| e.category_has("batik") && e.origin_has_any(&["yogya", "jogja"]),
            outcome: Outcome::Fixed("Yogyakarta, Central Java"),
        },
        Rule {
            name: "batik_solo",
            matches: |e| {
                e.category_has("batik")
                    && (e.origin_has_word("solo") || e.origin_has_any(&["surakarta"]))
            },
            outcome: Outcome::Fixed("Surakarta (Solo), Central Java"),
        },
        Rule {
            name: "batik",
            matches: |e| e.category_has("batik"),
            outcome: Outcome::Fixed("Central Java / Yogyakarta"),
        },
        Rule {
            name: "keris_java",
            matches: |e| e.category_has("keris") && e.origin_has_any(&["java", "jawa"]),
            outcome: Outcome::Fixed("Java"),
        },
        Rule {
            name: "keris",
            matches: |e| e.category_has("keris"),
            outcome: Outcome::Fixed("Archipelago (Java-Bali-Madura)"),
        },
        Rule {
            name: "search_origin",
            matches: |_| true,
            outcome: Outcome::SearchOrigin,
        },
    ],
    fallback: "Archipelago, Indonesia",
};

pub static PERIOD_RULES: RuleTable = RuleTable {
    rules: &[
        Rule {
            name: "candi_borobudur",
            matches: |e| e.category_has("candi") && e.type_has("borobudur"),
            outcome: Outcome::Fixed("8th-9th century CE (Syailendra dynasty, Ancient Mataram)"),
        },
        Rule {
            name: "candi_prambanan",
            matches: |e| e.category_has("candi") && e.type_has("prambanan"),
            outcome: Outcome::Fixed("9th-10th century CE (Sanjaya dynasty, Ancient Mataram)"),
        },
        Rule {
            name: "candi",
            matches: |e| e.category_has("candi"),
            outcome: Outcome::Fixed("8th-15th century CE (Hindu-Buddhist classical era)"),
        },
        Rule {
            name: "batik_court",
            matches: |e| {
                e.category_has("batik")
                    && (e.origin_has_word("solo")
                        || e.origin_has_any(&["yogya", "jogja", "surakarta"]))
            },
            outcome: Outcome::Fixed("18th-20th century CE (Yogyakarta and Surakarta court era)"),
        },
        Rule {
            name: "batik",
            matches: |e| e.category_has("batik"),
            outcome: Outcome::Fixed("17th-20th century CE (Islamic Mataram to colonial era)"),
        },
        Rule {
            name: "keris",
            matches: |e| e.category_has("keris"),
            outcome: Outcome::Fixed("14th-19th century CE (Majapahit to Islamic sultanates)"),
        },
        Rule {
            name: "wayang",
            matches: |e| e.category_has("wayang"),
            outcome: Outcome::Fixed("10th-20th century CE (Hindu-Javanese to Islamic Javanese era)"),
        },
        Rule {
            name: "search_historical_context",
            matches: |_| true,
            outcome: Outcome::SearchHistoricalContext,
        },
    ],
    fallback: "Traditional Archipelago Period",
};
