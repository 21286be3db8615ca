//! Request-scoped transformation pipeline.
//!
//! An [`ImageTransformer`] walks one image through three phases:
//! `decode` materializes the source buffer and records its original
//! dimensions and EXIF orientation, `process` runs the color passes and
//! exactly one geometric branch, and `encoded_bytes` serializes the
//! result. The original dimensions are captured once at decode and
//! never change afterwards; the geometric branch works on the current
//! buffer's own dimensions.

use image::RgbaImage;
use thiserror::Error;
use tracing::debug;

use crate::color;
use crate::decode::{decode_image, probe_orientation, DecodeError, ORIENTATION_ABSENT};
use crate::encode::{encode, ContentType, EncodeError};
use crate::geometry::fit_dimensions;
use crate::scale::scale;
use crate::transform::{crop, normalize_rect, rotate, TransformError};
use crate::TransformOptions;

/// Error type aggregating every pipeline phase.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// `process` was called before `decode`.
    #[error("No decoded image available")]
    NotDecoded,

    /// `encoded_bytes` was called before `process`.
    #[error("No processed image available")]
    NotProcessed,
}

/// One transformation request: target content type plus options.
pub struct ImageTransformer {
    content_type: String,
    options: TransformOptions,
    source: Option<RgbaImage>,
    processed: Option<RgbaImage>,
    origin_width: u32,
    origin_height: u32,
    orientation: u32,
}

impl ImageTransformer {
    /// The target `content_type` is validated at encode time, not here,
    /// so decoding and processing always run to completion first.
    pub fn new(content_type: impl Into<String>, options: TransformOptions) -> Self {
        Self {
            content_type: content_type.into(),
            options,
            source: None,
            processed: None,
            origin_width: 0,
            origin_height: 0,
            orientation: ORIENTATION_ABSENT,
        }
    }

    /// Decode `bytes` into the working buffer, recording the original
    /// dimensions and the EXIF orientation code (if any).
    pub fn decode(&mut self, bytes: &[u8]) -> Result<(), EngineError> {
        let img = decode_image(bytes)?;
        self.origin_width = img.width();
        self.origin_height = img.height();
        self.orientation = probe_orientation(bytes);
        debug!(
            width = self.origin_width,
            height = self.origin_height,
            orientation = self.orientation,
            "decoded source image"
        );
        self.source = Some(img);
        self.processed = None;
        Ok(())
    }

    /// Run the color passes and the geometric branch.
    ///
    /// Color passes run in gamma, contrast, brightness order; each is
    /// skipped when its option holds the zero sentinel. The geometric
    /// branch is then exactly one of rotate, crop, or plain resize,
    /// with rotate taking precedence over crop.
    pub fn process(&mut self) -> Result<(), EngineError> {
        let mut working = self.source.clone().ok_or(EngineError::NotDecoded)?;

        if self.options.gamma != 0.0 {
            color::apply_lut(&mut working, &color::gamma_lut(self.options.gamma));
        }
        if self.options.contrast != 0 {
            color::apply_lut(&mut working, &color::contrast_lut(self.options.contrast));
        }
        if self.options.brightness != 0 {
            color::apply_lut(&mut working, &color::brightness_lut(self.options.brightness));
        }

        let want_w = self.options.width;
        let want_h = self.options.height;
        let quality = self.options.quality;

        let result = if let Some(mode) = self.options.rotate {
            if let Some(rotated) = rotate(&working, mode, self.orientation, quality) {
                working = rotated;
            }
            let (dst_w, dst_h) =
                fit_dimensions(working.width(), working.height(), want_w, want_h);
            scale(&working, dst_w, dst_h, quality)
        } else if let Some(rect) = self.options.crop {
            let clamped = normalize_rect(&rect, working.width(), working.height())?;
            let cropped = crop(&working, &rect)?;
            let (dst_w, dst_h) = fit_dimensions(clamped.width, clamped.height, want_w, want_h);
            scale(&cropped, dst_w, dst_h, quality)
        } else {
            let (dst_w, dst_h) =
                fit_dimensions(working.width(), working.height(), want_w, want_h);
            scale(&working, dst_w, dst_h, quality)
        };

        debug!(
            width = result.width(),
            height = result.height(),
            "processed image"
        );
        self.processed = Some(result);
        Ok(())
    }

    /// Serialize the processed buffer as the requested content type.
    pub fn encoded_bytes(&self) -> Result<Vec<u8>, EngineError> {
        let img = self.processed.as_ref().ok_or(EngineError::NotProcessed)?;
        let content_type = ContentType::from_mime(&self.content_type)?;
        Ok(encode(img, content_type, self.options.quality)?)
    }

    /// Dimensions of the source image at decode time.
    pub fn origin_dimensions(&self) -> (u32, u32) {
        (self.origin_width, self.origin_height)
    }

    /// EXIF orientation code probed at decode time; zero when absent.
    pub fn orientation(&self) -> u32 {
        self.orientation
    }

    /// Dimensions of the processed buffer, if `process` has run.
    pub fn processed_dimensions(&self) -> Option<(u32, u32)> {
        self.processed.as_ref().map(|i| (i.width(), i.height()))
    }
}
