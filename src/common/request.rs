use crate::error::AppError;
use chrono::{DateTime, Utc};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use uuid::Uuid;

/// Where the uploaded photo lives. The pipeline only ever reads it.
#[derive(Clone, PartialEq, Eq)]
pub enum ImageSource {
    Path(PathBuf),
    Bytes(Arc<[u8]>),
}

impl fmt::Debug for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSource::Path(path) => f.debug_tuple("Path").field(path).finish(),
            ImageSource::Bytes(bytes) => write!(f, "Bytes({} bytes)", bytes.len()),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AnalysisRequest {
    request_id: Uuid,
    image: ImageSource,
    submitted_at: DateTime<Utc>,
}

impl AnalysisRequest {
    pub fn new(image: ImageSource) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            image,
            submitted_at: Utc::now(),
        }
    }

    /// Rejects a missing upload before any capability is called.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(AppError::Input(format!(
                "no image file at {}",
                path.display()
            )));
        }
        Ok(Self::new(ImageSource::Path(path.to_path_buf())))
    }

    pub fn from_bytes(bytes: impl Into<Arc<[u8]>>) -> Result<Self, AppError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(AppError::Input("image payload is empty".to_string()));
        }
        Ok(Self::new(ImageSource::Bytes(bytes)))
    }

    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    pub fn image(&self) -> &ImageSource {
        &self.image
    }

    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_an_input_failure() {
        let err = AnalysisRequest::from_path("/definitely/not/here.jpg").unwrap_err();
        assert!(matches!(err, AppError::Input(_)));
    }

    #[test]
    fn existing_file_is_accepted() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let request = AnalysisRequest::from_path(file.path()).unwrap();
        assert_eq!(request.image(), &ImageSource::Path(file.path().to_path_buf()));
    }

    #[test]
    fn empty_bytes_are_rejected() {
        assert!(AnalysisRequest::from_bytes(Vec::<u8>::new()).is_err());
    }

    #[test]
    fn cloning_request_shares_image_bytes() {
        let request = AnalysisRequest::from_bytes(vec![1u8, 2, 3]).unwrap();
        let copy = request.clone();
        match (request.image(), copy.image()) {
            (ImageSource::Bytes(a), ImageSource::Bytes(b)) => assert!(Arc::ptr_eq(a, b)),
            _ => panic!("expected byte sources"),
        }
        assert_eq!(request.request_id(), copy.request_id());
    }
}
