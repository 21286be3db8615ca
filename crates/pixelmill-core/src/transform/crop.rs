//! Rectangle extraction from the working buffer.
//!
//! Crop corners arrive as two arbitrary points. They are normalized so
//! the rectangle is corner-order independent, then clamped to the image
//! bounds; the clamped rectangle drives both the output geometry and the
//! pixel copy, so a partially off-image request degrades to the visible
//! intersection instead of failing.

use image::RgbaImage;
use tracing::debug;

use crate::transform::TransformError;
use crate::CropRect;

/// A normalized, in-bounds crop rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClampedRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Normalize `rect` (any corner order) and clamp it to a `width` x
/// `height` image. Returns an error when the clamped rectangle has zero
/// area, which covers degenerate requests and rectangles entirely
/// outside the image.
pub fn normalize_rect(
    rect: &CropRect,
    width: u32,
    height: u32,
) -> Result<ClampedRect, TransformError> {
    let invalid = || TransformError::InvalidCropParameter {
        x0: rect.x0,
        y0: rect.y0,
        x1: rect.x1,
        y1: rect.y1,
        width,
        height,
    };

    let left = rect.x0.min(rect.x1).clamp(0, i64::from(width));
    let top = rect.y0.min(rect.y1).clamp(0, i64::from(height));
    let right = rect.x0.max(rect.x1).clamp(0, i64::from(width));
    let bottom = rect.y0.max(rect.y1).clamp(0, i64::from(height));

    if left >= right || top >= bottom {
        return Err(invalid());
    }

    Ok(ClampedRect {
        x: left as u32,
        y: top as u32,
        width: (right - left) as u32,
        height: (bottom - top) as u32,
    })
}

/// Extract the clamped crop rectangle from `src`.
pub fn crop(src: &RgbaImage, rect: &CropRect) -> Result<RgbaImage, TransformError> {
    let clamped = normalize_rect(rect, src.width(), src.height())?;
    debug!(
        x = clamped.x,
        y = clamped.y,
        width = clamped.width,
        height = clamped.height,
        "cropping"
    );

    let out = RgbaImage::from_fn(clamped.width, clamped.height, |x, y| {
        *src.get_pixel(clamped.x + x, clamped.y + y)
    });
    Ok(out)
}
