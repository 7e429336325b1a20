use serde::{Deserialize, Serialize};

/// Outcome of the grounded cultural lookup. `cultural_info` may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchResult {
    pub cultural_info: Option<CulturalInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CulturalInfo {
    pub description: Option<String>,
    pub origin: Option<String>,
    pub historical_context: Option<String>,
    pub significance: Option<String>,
}

impl SearchResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_info(info: CulturalInfo) -> Self {
        Self {
            cultural_info: Some(info),
        }
    }

    pub fn origin(&self) -> Option<&str> {
        self.field(|info| info.origin.as_deref())
    }

    pub fn historical_context(&self) -> Option<&str> {
        self.field(|info| info.historical_context.as_deref())
    }

    pub fn significance(&self) -> Option<&str> {
        self.field(|info| info.significance.as_deref())
    }

    pub fn description(&self) -> Option<&str> {
        self.field(|info| info.description.as_deref())
    }

    // Blank strings count as missing evidence.
    fn field<'a>(&'a self, pick: impl Fn(&'a CulturalInfo) -> Option<&'a str>) -> Option<&'a str> {
        self.cultural_info
            .as_ref()
            .and_then(pick)
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}

impl CulturalInfo {
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn with_historical_context(mut self, context: impl Into<String>) -> Self {
        self.historical_context = Some(context.into());
        self
    }

    pub fn with_significance(mut self, significance: impl Into<String>) -> Self {
        self.significance = Some(significance.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
