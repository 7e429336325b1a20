pub mod cultural_analysis;
pub mod ocr;
pub mod report;
pub mod search;
pub mod vision;

pub use cultural_analysis::{CulturalAnalysis, CulturalAnalysisDraft};
pub use ocr::OcrResult;
pub use report::{AnalysisReport, ObjectRecognition, TextExtraction, TextExtractionMetadata};
pub use search::{CulturalInfo, SearchResult};
pub use vision::VisionResult;
