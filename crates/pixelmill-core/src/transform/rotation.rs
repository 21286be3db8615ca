//! Affine rotation of the working buffer.
//!
//! Every rotate mode reduces to a forward 2x3 matrix
//!
//! ```text
//! | cos(d)  -sin(d)  moveleft |
//! | sin(d)   cos(d)  movedown |
//! ```
//!
//! built from a degree value and a translation, plus a destination canvas
//! whose axes swap whenever the net rotation is 90 or 270 degrees. The
//! matrix is applied by inverse mapping: for each destination pixel the
//! source position is computed (the transpose of a rotation matrix is its
//! inverse) and sampled with the kernel the quality code selects.
//! Destination pixels whose source position falls outside the buffer are
//! transparent black.

use image::{Rgba, RgbaImage};
use tracing::debug;

use crate::{RotateMode, ScaleQuality};

/// One row of the rotate-mode table: degrees, translation, canvas.
struct RotationPlan {
    degrees: f64,
    translate: (f64, f64),
    canvas: (u32, u32),
}

/// Rotate `src` according to `mode`.
///
/// Returns `None` when the mode does not apply: the auto modes outside
/// their trigger aspect, and `exiforientation` when the probed code is
/// not one of the meaningful rotations (3, 6, 8). The caller then
/// proceeds with the unrotated buffer.
pub fn rotate(
    src: &RgbaImage,
    mode: RotateMode,
    orientation: u32,
    quality: ScaleQuality,
) -> Option<RgbaImage> {
    let plan = plan_rotation(mode, src.width(), src.height(), orientation)?;
    debug!(
        ?mode,
        degrees = plan.degrees,
        canvas_w = plan.canvas.0,
        canvas_h = plan.canvas.1,
        "applying rotation"
    );
    Some(apply(src, &plan, quality))
}

/// The mode table. `w`/`h` are the current working dimensions.
fn plan_rotation(mode: RotateMode, w: u32, h: u32, orientation: u32) -> Option<RotationPlan> {
    let (wf, hf) = (f64::from(w), f64::from(h));
    match mode {
        RotateMode::Right => Some(RotationPlan {
            degrees: 90.0,
            translate: (hf, 0.0),
            canvas: (h, w),
        }),
        RotateMode::Left => Some(RotationPlan {
            degrees: 270.0,
            translate: (0.0, wf),
            canvas: (h, w),
        }),
        RotateMode::Upsidedown => Some(RotationPlan {
            degrees: 180.0,
            translate: (wf, hf),
            canvas: (w, h),
        }),
        RotateMode::AutoVertical if w > h => plan_rotation(RotateMode::Right, w, h, orientation),
        RotateMode::AutoHorizontal if h > w => plan_rotation(RotateMode::Left, w, h, orientation),
        RotateMode::AutoVertical | RotateMode::AutoHorizontal => None,
        RotateMode::ExifOrientation => match orientation {
            3 => Some(RotationPlan {
                degrees: 180.0,
                translate: (0.0, wf),
                canvas: (w, h),
            }),
            6 => Some(RotationPlan {
                degrees: 90.0,
                translate: (0.0, wf),
                canvas: (h, w),
            }),
            8 => Some(RotationPlan {
                degrees: 270.0,
                translate: (0.0, wf),
                canvas: (h, w),
            }),
            _ => None,
        },
    }
}

fn apply(src: &RgbaImage, plan: &RotationPlan, quality: ScaleQuality) -> RgbaImage {
    let rad = plan.degrees * std::f64::consts::PI / 180.0;
    let (cos, sin) = (rad.cos(), rad.sin());
    let (tx, ty) = plan.translate;
    let (canvas_w, canvas_h) = plan.canvas;

    let mut dst = RgbaImage::new(canvas_w, canvas_h);
    for dst_y in 0..canvas_h {
        for dst_x in 0..canvas_w {
            // Pixel-center coordinates, translated back and un-rotated.
            let dx = f64::from(dst_x) + 0.5 - tx;
            let dy = f64::from(dst_y) + 0.5 - ty;
            let src_x = cos * dx + sin * dy - 0.5;
            let src_y = -sin * dx + cos * dy - 0.5;

            let pixel = match quality {
                ScaleQuality::NearestNeighbor => sample_nearest(src, src_x, src_y),
                _ => sample_bilinear(src, src_x, src_y),
            };
            dst.put_pixel(dst_x, dst_y, Rgba(pixel));
        }
    }
    dst
}

fn sample_nearest(src: &RgbaImage, x: f64, y: f64) -> [u8; 4] {
    let px = x.round();
    let py = y.round();
    if px < 0.0 || py < 0.0 || px >= f64::from(src.width()) || py >= f64::from(src.height()) {
        return [0, 0, 0, 0];
    }
    src.get_pixel(px as u32, py as u32).0
}

/// Bilinear sample with edge clamping; positions outside the pixel grid
/// by more than half a pixel are transparent.
fn sample_bilinear(src: &RgbaImage, x: f64, y: f64) -> [u8; 4] {
    let (w, h) = (src.width(), src.height());
    if x < -0.5 || y < -0.5 || x > f64::from(w) - 0.5 || y > f64::from(h) - 0.5 {
        return [0, 0, 0, 0];
    }

    let x0 = x.floor().max(0.0) as u32;
    let y0 = y.floor().max(0.0) as u32;
    let x1 = (x0 + 1).min(w - 1);
    let y1 = (y0 + 1).min(h - 1);
    let x0 = x0.min(w - 1);
    let y0 = y0.min(h - 1);

    let fx = (x - x.floor()).clamp(0.0, 1.0);
    let fy = (y - y.floor()).clamp(0.0, 1.0);

    let p00 = src.get_pixel(x0, y0).0;
    let p10 = src.get_pixel(x1, y0).0;
    let p01 = src.get_pixel(x0, y1).0;
    let p11 = src.get_pixel(x1, y1).0;

    let mut out = [0u8; 4];
    for (i, slot) in out.iter_mut().enumerate() {
        let v = f64::from(p00[i]) * (1.0 - fx) * (1.0 - fy)
            + f64::from(p10[i]) * fx * (1.0 - fy)
            + f64::from(p01[i]) * (1.0 - fx) * fy
            + f64::from(p11[i]) * fx * fy;
        *slot = v.round().clamp(0.0, 255.0) as u8;
    }
    out
}
