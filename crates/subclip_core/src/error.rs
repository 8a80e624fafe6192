use crate::types::{ComponentId, Frame, SubclipId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid end frame: {end} is before {start}")]
    InvalidRange { start: Frame, end: Frame },

    #[error("Frame range {start}..={end} is too long")]
    RangeTooLong { start: Frame, end: Frame },

    #[error("Subclip not found: {0}")]
    SubclipNotFound(SubclipId),

    #[error("Subclip has no frame range")]
    MissingRange,

    #[error("Video component not found: {0}")]
    VideoNotFound(ComponentId),

    #[error("No video component available")]
    NoVideoAvailable,

    #[error("No video selected")]
    NoVideoSelected,

    #[error("Audio component not found: {0}")]
    AudioNotFound(ComponentId),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
