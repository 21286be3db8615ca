//! Resampling of the working buffer onto the destination canvas.

use image::imageops::{self, FilterType};
use image::RgbaImage;

use crate::ScaleQuality;

impl ScaleQuality {
    /// Resampling kernel of the `image` crate for this quality code.
    ///
    /// The crate ships a single bilinear kernel (`Triangle`), so the
    /// approximate-bilinear and bilinear codes select the same filter.
    pub(crate) fn filter(self) -> FilterType {
        match self {
            ScaleQuality::NearestNeighbor => FilterType::Nearest,
            ScaleQuality::ApproxBilinear | ScaleQuality::Bilinear => FilterType::Triangle,
            ScaleQuality::CatmullRom | ScaleQuality::Unspecified => FilterType::CatmullRom,
        }
    }
}

/// Resample `src` into a freshly allocated `dst_w` x `dst_h` buffer with
/// the kernel selected by `quality`. Degenerate destination axes are
/// raised to one pixel; the planner only produces them from degenerate
/// sources.
pub fn scale(src: &RgbaImage, dst_w: u32, dst_h: u32, quality: ScaleQuality) -> RgbaImage {
    let (dst_w, dst_h) = (dst_w.max(1), dst_h.max(1));
    if src.width() == dst_w && src.height() == dst_h {
        return src.clone();
    }
    imageops::resize(src, dst_w, dst_h, quality.filter())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn solid(w: u32, h: u32, px: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(w, h, Rgba(px))
    }

    #[test]
    fn test_scale_to_exact_dimensions() {
        let src = solid(100, 50, [200, 100, 50, 255]);
        for quality in [
            ScaleQuality::NearestNeighbor,
            ScaleQuality::ApproxBilinear,
            ScaleQuality::Bilinear,
            ScaleQuality::CatmullRom,
        ] {
            let dst = scale(&src, 40, 20, quality);
            assert_eq!((dst.width(), dst.height()), (40, 20));
        }
    }

    #[test]
    fn test_scale_identity_dimensions_copies() {
        let src = solid(10, 10, [1, 2, 3, 4]);
        let dst = scale(&src, 10, 10, ScaleQuality::CatmullRom);
        assert_eq!(dst.as_raw(), src.as_raw());
    }

    #[test]
    fn test_scale_allocates_fresh_buffer() {
        let src = solid(8, 8, [9, 9, 9, 255]);
        let dst = scale(&src, 16, 16, ScaleQuality::Bilinear);
        assert_eq!((dst.width(), dst.height()), (16, 16));
        // Upscaling a solid color stays that color.
        assert_eq!(dst.get_pixel(8, 8).0, [9, 9, 9, 255]);
    }

    #[test]
    fn test_scale_guards_zero_axis() {
        let src = solid(5, 5, [0, 0, 0, 255]);
        let dst = scale(&src, 0, 3, ScaleQuality::NearestNeighbor);
        assert_eq!((dst.width(), dst.height()), (1, 3));
    }

    #[test]
    fn test_kernel_selection() {
        assert!(matches!(
            ScaleQuality::NearestNeighbor.filter(),
            FilterType::Nearest
        ));
        assert!(matches!(
            ScaleQuality::ApproxBilinear.filter(),
            FilterType::Triangle
        ));
        assert!(matches!(ScaleQuality::Bilinear.filter(), FilterType::Triangle));
        assert!(matches!(
            ScaleQuality::CatmullRom.filter(),
            FilterType::CatmullRom
        ));
        assert!(matches!(
            ScaleQuality::Unspecified.filter(),
            FilterType::CatmullRom
        ));
    }
}
