use std::fmt;
use std::time::Duration;
use thiserror::Error;

// Main Application Error Type

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Analysis is taking too long (exceeded {0:?})")]
    Timeout(Duration),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Capability error: {0}")]
    Capability(#[from] CapabilityError),
    #[error("Failed to load configuration: {0}")]
    ConfigLoad(#[from] config::ConfigError),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Analysis service error: {0}")]
    Service(String),
}

impl AppError {
    /// HTTP status the transport layer should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            AppError::Timeout(_) => 504,
            AppError::Input(_) => 400,
            _ => 500,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, AppError::Timeout(_))
    }
}

/// The external collaborators the pipeline talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Vision,
    TextReader,
    Search,
    Completion,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Vision => "vision",
            Capability::TextReader => "text_reader",
            Capability::Search => "search",
            Capability::Completion => "completion",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Capability Error Type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CapabilityError {
    #[error("{capability} capability failed: {reason}")]
    Failed {
        capability: Capability,
        reason: String,
    },
    #[error("{capability} capability did not answer within {after:?}")]
    TimedOut {
        capability: Capability,
        after: Duration,
    },
}

impl CapabilityError {
    pub fn failed(capability: Capability, reason: impl Into<String>) -> Self {
        CapabilityError::Failed {
            capability,
            reason: reason.into(),
        }
    }

    pub fn capability(&self) -> Capability {
        match self {
            CapabilityError::Failed { capability, .. } => *capability,
            CapabilityError::TimedOut { capability, .. } => *capability,
        }
    }
}

// Synthesis Error Type, never leaves the synthesizer
#[derive(Error, Debug)]
pub enum SynthesisError {
    #[error("Completion call failed: {0}")]
    Completion(#[from] CapabilityError),
    #[error("Completion response contains no JSON object")]
    NoJsonObject,
    #[error("Completion response is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
