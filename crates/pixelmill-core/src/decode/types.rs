//! Core types for image decoding.

use thiserror::Error;

/// Orientation code reported when the source carries no usable EXIF
/// orientation tag. The meaningful rotation codes are 3, 6 and 8.
pub const ORIENTATION_ABSENT: u32 = 0;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The byte stream is not recognized by any registered codec.
    #[error("Invalid or unsupported image format")]
    UnrecognizedFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image data: {0}")]
    CorruptedData(String),
}
