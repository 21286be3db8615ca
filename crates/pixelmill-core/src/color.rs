//! Per-channel color correction via 256-entry lookup tables.
//!
//! Gamma, contrast, and brightness each compile to a `[u8; 256]` table
//! that is applied to the R, G, and B channels of every pixel; alpha is
//! never touched. Table application is embarrassingly parallel, so the
//! buffer is split into row-aligned chunks and fanned out across the
//! rayon pool. The output is identical for any chunk count.

use image::RgbaImage;
use rayon::prelude::*;
use tracing::debug;

/// Gamma table: `255 * (i / 255) ^ (1 / gamma)`.
///
/// The exponent denominator is floored at `1e-4` so pathological inputs
/// near zero stay finite instead of producing NaN.
pub fn gamma_lut(gamma: f64) -> [u8; 256] {
    let exponent = 1.0 / gamma.max(0.0001);
    build_lut(|i| (f64::from(i) / 255.0).powf(exponent) * 255.0)
}

/// Contrast table: remap around the 0.5 midpoint by
/// `(100 + contrast) / 100`, with `contrast` clamped to [-100, 100].
pub fn contrast_lut(contrast: i32) -> [u8; 256] {
    let v = (100.0 + f64::from(contrast.clamp(-100, 100))) / 100.0;
    build_lut(|i| ((f64::from(i) / 255.0 - 0.5) * v + 0.5) * 255.0)
}

/// Brightness table: scale each value by `brightness / 100`, with
/// `brightness` clamped to [-100, 100]. At 100 the table is identity;
/// negative values always map to zero.
pub fn brightness_lut(brightness: i32) -> [u8; 256] {
    let percentage = f64::from(brightness.clamp(-100, 100));
    build_lut(|i| f64::from(i) * (percentage / 100.0))
}

/// Table values are clamped to [0, 255] and truncated, not rounded.
fn build_lut(f: impl Fn(u32) -> f64) -> [u8; 256] {
    let mut lut = [0u8; 256];
    for (i, slot) in lut.iter_mut().enumerate() {
        *slot = f(i as u32).clamp(0.0, 255.0) as u8;
    }
    lut
}

/// Apply `lut` to the RGB channels of `img` in place, fanned out over
/// the rayon pool.
pub fn apply_lut(img: &mut RgbaImage, lut: &[u8; 256]) {
    let chunks = rayon::current_num_threads() * 5;
    apply_lut_chunked(img, lut, chunks);
}

/// Chunked worker behind [`apply_lut`]; exposed within the crate so
/// tests can pin the chunk count.
pub(crate) fn apply_lut_chunked(img: &mut RgbaImage, lut: &[u8; 256], chunks: usize) {
    let width = img.width() as usize;
    let height = img.height() as usize;
    if width == 0 || height == 0 {
        return;
    }

    // Split on row boundaries; integer division leaves the remainder
    // rows in the final chunk. Fewer rows than chunks collapses to a
    // single chunk.
    let rows_per_chunk = match height / chunks.max(1) {
        0 => height,
        n => n,
    };
    let chunk_bytes = rows_per_chunk * width * 4;
    debug!(width, height, rows_per_chunk, "applying color lookup table");

    let buf: &mut [u8] = img;
    buf.par_chunks_mut(chunk_bytes).for_each(|chunk| {
        for px in chunk.chunks_exact_mut(4) {
            px[0] = lut[px[0] as usize];
            px[1] = lut[px[1] as usize];
            px[2] = lut[px[2] as usize];
        }
    });
}
