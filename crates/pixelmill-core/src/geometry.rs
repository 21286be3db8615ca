//! Destination geometry planning.
//!
//! Pure aspect-fit arithmetic: given the dimensions of the working image
//! (either the decoded origin or a crop rectangle) and the requested
//! width/height, compute the destination canvas. The rules give
//! "contain within bounding box" semantics when both axes are requested:
//! whichever axis is relatively tighter against the target wins.
//!
//! Fractional results are truncated toward zero, not rounded. Callers
//! depend on this exact truncation; do not switch to `round()`.

use tracing::debug;

/// Compute the destination dimensions for a source of `(src_w, src_h)`
/// and a request of `(want_w, want_h)` where 0 means "unconstrained".
///
/// - both unconstrained: the source dimensions pass through unscaled;
/// - one axis requested: the other is derived from the source aspect
///   ratio (width-fit / height-fit);
/// - both requested: the source aspect ratio is compared against the
///   requested box and the binding axis is fitted.
///
/// A zero-valued source axis never divides: width-fit with `src_w == 0`
/// copies `src_h` through, height-fit with `src_h == 0` copies `src_w`.
pub fn fit_dimensions(src_w: u32, src_h: u32, want_w: u32, want_h: u32) -> (u32, u32) {
    let dst = match (want_w, want_h) {
        (0, 0) => (src_w, src_h),
        (w, 0) => fit_width(src_w, src_h, w),
        (0, h) => fit_height(src_w, src_h, h),
        (w, h) => {
            let source_ratio = f64::from(src_h) / f64::from(src_w);
            let target_ratio = f64::from(h) / f64::from(w);
            if source_ratio <= target_ratio {
                fit_width(src_w, src_h, w)
            } else {
                fit_height(src_w, src_h, h)
            }
        }
    };
    debug!(
        src_w,
        src_h, want_w, want_h, dst_w = dst.0, dst_h = dst.1, "planned destination geometry"
    );
    dst
}

/// Width-fit: the requested width binds, the height follows the source
/// aspect ratio (truncated).
fn fit_width(src_w: u32, src_h: u32, want_w: u32) -> (u32, u32) {
    if src_w == 0 {
        return (want_w, src_h);
    }
    let dst_h = f64::from(want_w) * (f64::from(src_h) / f64::from(src_w));
    (want_w, dst_h as u32)
}

/// Height-fit: the requested height binds, the width follows the source
/// aspect ratio (truncated).
fn fit_height(src_w: u32, src_h: u32, want_h: u32) -> (u32, u32) {
    if src_h == 0 {
        return (src_w, want_h);
    }
    let dst_w = f64::from(want_h) * (f64::from(src_w) / f64::from(src_h));
    (dst_w as u32, want_h)
}
