//! Crate-level error type and `Result` alias for stable, structured error handling.
//! The pipeline itself only ever fails with `InvalidBuffer`; every other variant
//! belongs to the upload/decode/encode glue around it.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid buffer ({width}x{height}): {reason}")]
    InvalidBuffer {
        width: usize,
        height: usize,
        reason: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No image uploaded")]
    EmptyUpload,

    #[error("No file selected")]
    NoFileSelected,

    #[error("Invalid file type: {filename}. Please upload an image file")]
    UnsupportedFileType { filename: String },

    #[error("Upload of {size} bytes exceeds the limit of {limit} bytes")]
    UploadTooLarge { size: usize, limit: usize },

    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Failed to encode image: {0}")]
    Encode(String),

    #[error("Resize error: {0}")]
    Resize(String),

    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid_buffer(width: usize, height: usize, reason: impl Into<String>) -> Self {
        Error::InvalidBuffer {
            width,
            height,
            reason: reason.into(),
        }
    }
}
