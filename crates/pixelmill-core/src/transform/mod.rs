//! Geometric transformations: rotation and cropping.
//!
//! Exactly one geometric branch runs per request — rotate, crop, or plain
//! resize — and rotation wins when both a rotate mode and a crop rectangle
//! are supplied. Rotation is expressed as a forward 2x3 affine matrix and
//! applied by inverse mapping onto a destination canvas; cropping is a
//! plain rectangular extraction.

mod crop;
mod rotation;

pub use crop::{crop, normalize_rect, ClampedRect};
pub use rotation::rotate;

use thiserror::Error;

/// Error types for the geometric branch.
#[derive(Debug, Error)]
pub enum TransformError {
    /// The rotate mode string is not in the known set.
    #[error("Invalid rotate parameter: {value}")]
    InvalidRotateParameter { value: String },

    /// The crop rectangle has no area inside the image bounds.
    #[error("Invalid crop parameter: rectangle ({x0},{y0})-({x1},{y1}) has no area within {width}x{height}")]
    InvalidCropParameter {
        x0: i64,
        y0: i64,
        x1: i64,
        y1: i64,
        width: u32,
        height: u32,
    },
}
