//! Upload validation against format and size policies.
//!
//! Validation reads only the image header: the format is sniffed from
//! magic bytes and the dimensions come from the header, so oversized
//! uploads are rejected without a full pixel decode. Size limits with a
//! zero value are unlimited, and all exceeded limits are reported in
//! one error rather than first-failure-wins.

use std::io::Cursor;

use image::{ImageFormat, ImageReader};
use thiserror::Error;
use tracing::debug;

/// Formats a validator may be configured to accept.
pub const KNOWN_IMAGE_TYPES: [&str; 5] = ["jpeg", "gif", "png", "bmp", "tiff"];

#[derive(Debug, Error)]
pub enum ValidationError {
    /// The header could not be read as any known image format.
    #[error("Unreadable image: {0}")]
    UnreadableImage(String),

    /// The sniffed format is not in the configured allow list.
    #[error("Invalid image type: {allowed}")]
    InvalidImageType { allowed: String },

    /// One or more size limits were exceeded; all violations joined.
    #[error("{0}")]
    OverLimit(String),
}

/// Policy checker for uploaded image bytes.
#[derive(Debug, Clone)]
pub struct ImageValidator {
    image_types: Vec<String>,
    max_width: u32,
    max_height: u32,
    max_file_size: usize,
}

impl ImageValidator {
    /// Configured allow-list entries outside [`KNOWN_IMAGE_TYPES`] are
    /// silently dropped.
    pub fn new(
        image_types: &[&str],
        max_width: u32,
        max_height: u32,
        max_file_size: usize,
    ) -> Self {
        let image_types = image_types
            .iter()
            .filter(|t| KNOWN_IMAGE_TYPES.contains(&t.to_lowercase().as_str()))
            .map(|t| t.to_lowercase())
            .collect();
        Self {
            image_types,
            max_width,
            max_height,
            max_file_size,
        }
    }

    pub fn validate(&self, bytes: &[u8]) -> Result<(), ValidationError> {
        let reader = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| ValidationError::UnreadableImage(e.to_string()))?;
        let format = reader
            .format()
            .ok_or_else(|| ValidationError::UnreadableImage("unknown format".to_string()))?;
        let name = format_name(format);
        debug!(format = name, "validating upload");

        if !self.image_types.iter().any(|t| t == name) {
            return Err(ValidationError::InvalidImageType {
                allowed: self.image_types.join("/"),
            });
        }

        let (width, height) = reader
            .into_dimensions()
            .map_err(|e| ValidationError::UnreadableImage(e.to_string()))?;

        let mut violations = Vec::new();
        if self.max_width != 0 && width > self.max_width {
            violations.push(format!("Over image width: {} px", self.max_width));
        }
        if self.max_height != 0 && height > self.max_height {
            violations.push(format!("Over image height: {} px", self.max_height));
        }
        if self.max_file_size != 0 && bytes.len() > self.max_file_size {
            violations.push(format!(
                "Over image filesize: {:.2} MB",
                self.max_file_size as f64 / 1024.0 / 1024.0
            ));
        }
        if !violations.is_empty() {
            return Err(ValidationError::OverLimit(violations.join("/")));
        }
        Ok(())
    }
}

fn format_name(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Jpeg => "jpeg",
        ImageFormat::Png => "png",
        ImageFormat::Gif => "gif",
        ImageFormat::Bmp => "bmp",
        ImageFormat::Tiff => "tiff",
        _ => "unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgba, RgbaImage};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([5, 6, 7, 255]));
        let mut buf = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn test_accepts_allowed_format_within_limits() {
        let v = ImageValidator::new(&["png", "jpeg"], 100, 100, 1024 * 1024);
        v.validate(&png_bytes(50, 40)).unwrap();
    }

    #[test]
    fn test_rejects_disallowed_format() {
        let v = ImageValidator::new(&["jpeg"], 0, 0, 0);
        let err = v.validate(&png_bytes(10, 10)).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidImageType { ref allowed } if allowed == "jpeg"));
    }

    #[test]
    fn test_unknown_allow_list_entries_are_dropped() {
        let v = ImageValidator::new(&["png", "webp", "svg"], 0, 0, 0);
        v.validate(&png_bytes(10, 10)).unwrap();
        let err = ImageValidator::new(&["webp"], 0, 0, 0)
            .validate(&png_bytes(10, 10))
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidImageType { ref allowed } if allowed.is_empty()));
    }

    #[test]
    fn test_zero_limits_are_unlimited() {
        let v = ImageValidator::new(&["png"], 0, 0, 0);
        v.validate(&png_bytes(500, 500)).unwrap();
    }

    #[test]
    fn test_collects_all_size_violations() {
        let v = ImageValidator::new(&["png"], 10, 10, 1);
        let err = v.validate(&png_bytes(50, 40)).unwrap_err();
        match err {
            ValidationError::OverLimit(msg) => {
                assert!(msg.contains("width"));
                assert!(msg.contains("height"));
                assert!(msg.contains("filesize"));
                assert_eq!(msg.matches('/').count(), 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rejects_non_image_bytes() {
        let v = ImageValidator::new(&["png"], 0, 0, 0);
        let err = v.validate(b"definitely not an image").unwrap_err();
        assert!(matches!(err, ValidationError::UnreadableImage(_)));
    }
}
