//! Encoding of the processed buffer into output bytes.
//!
//! The output format is chosen by MIME type. JPEG output carries the
//! quality value derived from the scale-quality code; PNG and GIF have
//! no quality knob. MIME strings outside the supported set are rejected
//! here, at encode time, so an unsupported target never produces
//! partial output.

use std::io::Cursor;

use image::codecs::gif::GifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ExtendedColorType, Frame, ImageEncoder, RgbaImage};
use thiserror::Error;
use tracing::debug;

use crate::ScaleQuality;

/// Error types for encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The requested MIME type is not an encodable format.
    #[error("Unsupported content type: {0}")]
    UnsupportedContentType(String),

    /// The underlying codec failed to write the image.
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

/// Output formats the engine can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Jpeg,
    Png,
    Gif,
}

impl ContentType {
    /// Map a MIME string to a supported output format.
    pub fn from_mime(mime: &str) -> Result<Self, EncodeError> {
        match mime {
            "image/jpeg" => Ok(ContentType::Jpeg),
            "image/png" => Ok(ContentType::Png),
            "image/gif" => Ok(ContentType::Gif),
            other => Err(EncodeError::UnsupportedContentType(other.to_string())),
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            ContentType::Jpeg => "image/jpeg",
            ContentType::Png => "image/png",
            ContentType::Gif => "image/gif",
        }
    }
}

/// Encode `img` as `content_type`.
pub fn encode(
    img: &RgbaImage,
    content_type: ContentType,
    quality: ScaleQuality,
) -> Result<Vec<u8>, EncodeError> {
    debug!(
        content_type = content_type.mime(),
        width = img.width(),
        height = img.height(),
        "encoding"
    );
    match content_type {
        ContentType::Jpeg => encode_jpeg(img, quality.jpeg_quality()),
        ContentType::Png => encode_png(img),
        ContentType::Gif => encode_gif(img),
    }
}

/// JPEG has no alpha channel, so the buffer is flattened to RGB first.
fn encode_jpeg(img: &RgbaImage, quality: u8) -> Result<Vec<u8>, EncodeError> {
    let rgb = DynamicImage::ImageRgba8(img.clone()).into_rgb8();
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(Cursor::new(&mut buf), quality)
        .write_image(
            rgb.as_raw(),
            rgb.width(),
            rgb.height(),
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;
    Ok(buf)
}

fn encode_png(img: &RgbaImage) -> Result<Vec<u8>, EncodeError> {
    let mut buf = Vec::new();
    PngEncoder::new(Cursor::new(&mut buf))
        .write_image(
            img.as_raw(),
            img.width(),
            img.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;
    Ok(buf)
}

fn encode_gif(img: &RgbaImage) -> Result<Vec<u8>, EncodeError> {
    let mut buf = Vec::new();
    {
        let mut encoder = GifEncoder::new(Cursor::new(&mut buf));
        encoder
            .encode_frame(Frame::new(img.clone()))
            .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;
    }
    Ok(buf)
}
