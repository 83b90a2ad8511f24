use ndarray::{Array2, ArrayView2};

use crate::image_pipeline::processing::stats::min_max;

/// Added on top of `|min|` so the smallest sample never lands exactly on zero.
pub const SHIFT_EPSILON: f64 = 1e-6;

/// Adds `|min| + SHIFT_EPSILON` to every sample.
///
/// Volume viewers reject non-positive scalars, and FITS mosaics often carry
/// negative background-subtracted values. The offset is applied even when the
/// minimum is already positive. Returns the shifted array and the offset used.
pub fn shift_positive(image: ArrayView2<f64>) -> (Array2<f64>, f64) {
    let min = min_max(image).map_or(0.0, |(lo, _)| lo);
    let shift = min.abs() + SHIFT_EPSILON;
    (image.mapv(|v| v + shift), shift)
}
