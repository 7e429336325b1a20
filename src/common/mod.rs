pub mod request;

pub use request::{AnalysisRequest, ImageSource};
