//! Error types for gallery operations

use thiserror::Error;

/// Unified error type for catalog, asset and entitlement operations
#[derive(Debug, Error)]
pub enum GalleryError {
    /// Remote key absent
    #[error("Asset not found: {0}")]
    NotFound(String),
    /// Remote payload larger than the allowed maximum
    #[error("Asset {key} exceeds the maximum size of {limit} bytes")]
    TooLarge { key: String, limit: usize },
    /// Payload could not be recognized as an image
    #[error("Asset {0} is not a recognized image")]
    InvalidImage(String),
    /// HTTP request failed (network error, timeout, etc.)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP error status code
    #[error("HTTP error: {0}")]
    HttpStatus(reqwest::StatusCode),
    /// Local file read/write failed
    #[error("Persistence error: {0}")]
    Persistence(#[from] std::io::Error),
    /// Failed to parse JSON
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// Provider document missing required fields
    #[error("Malformed document {id}: {reason}")]
    MalformedDocument { id: String, reason: String },
    /// Entitlement collaborator failed
    #[error("Entitlement error: {0}")]
    Entitlement(String),
    /// No watch face is currently selected
    #[error("No watch face selected")]
    NothingSelected,
}

impl GalleryError {
    /// True for failures that mean "the asset does not exist remotely"
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            GalleryError::NotFound(_)
                | GalleryError::TooLarge { .. }
                | GalleryError::InvalidImage(_)
        )
    }
}

/// Result alias for gallery operations
pub type GalleryResult<T> = Result<T, GalleryError>;
