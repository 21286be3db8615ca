//! Pixelmill Core - Image transformation engine
//!
//! This crate provides the server-side image transformation pipeline for
//! Pixelmill: decoding, EXIF orientation probing, destination geometry
//! planning, rotation, cropping, scaling, per-pixel color correction, and
//! re-encoding.
//!
//! The crate knows nothing about transport, caching, or object storage.
//! The HTTP layer hands the engine a byte slice and a [`TransformOptions`]
//! value and receives encoded bytes (or an error) back.

pub mod color;
pub mod decode;
pub mod encode;
pub mod engine;
pub mod geometry;
pub mod scale;
pub mod sniff;
pub mod transform;
pub mod validate;

pub use decode::DecodeError;
pub use encode::{ContentType, EncodeError};
pub use engine::{EngineError, ImageTransformer};
pub use transform::TransformError;
pub use validate::{ImageValidator, ValidationError};

use std::str::FromStr;

/// Rotation requested for an image, keyed by the wire strings the HTTP
/// layer accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotateMode {
    /// Rotate 90 degrees clockwise.
    Right,
    /// Rotate 90 degrees counter-clockwise.
    Left,
    /// Rotate 180 degrees.
    Upsidedown,
    /// Rotate right, but only when the image is wider than it is tall.
    AutoVertical,
    /// Rotate left, but only when the image is taller than it is wide.
    AutoHorizontal,
    /// Rotate according to the EXIF orientation tag (codes 3, 6, 8).
    ExifOrientation,
}

impl FromStr for RotateMode {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "right" => Ok(RotateMode::Right),
            "left" => Ok(RotateMode::Left),
            "upsidedown" => Ok(RotateMode::Upsidedown),
            "autovertical" => Ok(RotateMode::AutoVertical),
            "autohorizontal" => Ok(RotateMode::AutoHorizontal),
            "exiforientation" => Ok(RotateMode::ExifOrientation),
            other => Err(TransformError::InvalidRotateParameter {
                value: other.to_string(),
            }),
        }
    }
}

/// Interpolation kernel used by the scaler and the affine transformer,
/// selected by the small integer quality code the HTTP layer passes
/// through. Unknown codes fall back to the highest quality kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum ScaleQuality {
    /// Code 1: nearest-neighbor (fastest, lowest quality).
    NearestNeighbor,
    /// Code 2: approximate bilinear.
    ApproxBilinear,
    /// Code 3: bilinear.
    Bilinear,
    /// Code 4: Catmull-Rom (highest quality).
    CatmullRom,
    /// Code 0 / unset and out-of-range codes. Scales with the Catmull-Rom
    /// kernel but encodes JPEG at the middle quality setting.
    #[default]
    Unspecified,
}

impl ScaleQuality {
    /// Map a raw quality code onto a kernel selection.
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => ScaleQuality::NearestNeighbor,
            2 => ScaleQuality::ApproxBilinear,
            3 => ScaleQuality::Bilinear,
            4 => ScaleQuality::CatmullRom,
            _ => ScaleQuality::Unspecified,
        }
    }

    /// JPEG encoder quality for this code: 75/85/90/100, default 85.
    pub fn jpeg_quality(self) -> u8 {
        match self {
            ScaleQuality::NearestNeighbor => 75,
            ScaleQuality::ApproxBilinear | ScaleQuality::Unspecified => 85,
            ScaleQuality::Bilinear => 90,
            ScaleQuality::CatmullRom => 100,
        }
    }
}

/// Axis-aligned crop rectangle in absolute pixel coordinates. The two
/// corners may be given in any order; the engine normalizes them before
/// extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CropRect {
    pub x0: i64,
    pub y0: i64,
    pub x1: i64,
    pub y1: i64,
}

impl CropRect {
    pub fn new(x0: i64, y0: i64, x1: i64, y1: i64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Width of the rectangle as requested, before any clamping.
    pub fn requested_width(&self) -> u32 {
        self.x1.abs_diff(self.x0).min(u64::from(u32::MAX)) as u32
    }

    /// Height of the rectangle as requested, before any clamping.
    pub fn requested_height(&self) -> u32 {
        self.y1.abs_diff(self.y0).min(u64::from(u32::MAX)) as u32
    }
}

/// Declarative description of one transformation request.
///
/// The default value is a full no-op: decode and re-encode without any
/// geometric or color change.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransformOptions {
    /// Requested width; 0 means "derive from height" (or keep origin).
    pub width: u32,
    /// Requested height; 0 means "derive from width" (or keep origin).
    pub height: u32,
    /// Interpolation kernel / JPEG quality selector.
    pub quality: ScaleQuality,
    /// Rotation mode; `None` skips the rotate branch.
    pub rotate: Option<RotateMode>,
    /// Crop rectangle; `None` skips the crop branch. Ignored when a
    /// rotation is also requested (rotate takes precedence).
    pub crop: Option<CropRect>,
    /// Brightness percentage, -100..100; 0 skips the pass.
    pub brightness: i32,
    /// Contrast percentage, -100..100; 0 skips the pass.
    pub contrast: i32,
    /// Gamma exponent; 0.0 skips the pass.
    pub gamma: f64,
}

impl TransformOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no color-correction pass is requested.
    pub fn is_color_identity(&self) -> bool {
        self.gamma == 0.0 && self.contrast == 0 && self.brightness == 0
    }
}
