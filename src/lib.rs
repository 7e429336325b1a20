pub mod common;
pub mod config;
pub mod error;
pub mod pipeline;

pub use common::{AnalysisRequest, ImageSource};
pub use config::Configuration;
pub use error::{AppError, Capability, CapabilityError};
pub use pipeline::{AnalysisOrchestrator, AnalysisReport, DeadlineAnalyzer, StreamingProgressReporter};
