//! Array processing module
//!
//! Center-cropping, missing-value sanitization and the statistics the
//! normalization and export stages need.

mod crop;
mod sanitize;
mod shift;
pub mod stats;

pub use crop::{center_crop, center_crop_with, CropRegion, CropSizing};
pub use sanitize::{count_invalid, sanitize};
pub use shift::{shift_positive, SHIFT_EPSILON};
pub use stats::{min_max, percentile};
