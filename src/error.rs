use thiserror::Error;

use crate::command::CommandError;
use crate::host::HostError;

/// Errors surfaced by editor operations.
///
/// Every variant is recoverable: the document is left exactly as it was
/// before the failing operation started.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("could not decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    #[error("background removal failed: {0}")]
    BackgroundRemoval(String),

    #[error("crop area is too small ({width}x{height})")]
    CropTooSmall { width: f32, height: f32 },

    #[error("export failed: {0}")]
    Export(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Host(#[from] HostError),

    #[error("{0}")]
    NoSuitableSelection(&'static str),

    #[error(transparent)]
    Command(#[from] CommandError),
}

pub type EditorResult<T> = Result<T, EditorError>;
