//! Normalization parameter types

use ndarray::ArrayView2;

use crate::image_pipeline::processing::stats::{min_max, percentile};

/// Logarithm base used by the interactive symmetric-log view. Barely above 1,
/// which makes the "log" region nearly linear.
pub const SYMLOG_BASE: f64 = 1.001;

/// One end of the intensity range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    /// An explicit intensity
    Value(f64),
    /// The given percentile (0 to 100) of the samples
    Percentile(f64),
}

impl Bound {
    /// Resolves against `image` and clamps into its `[min, max]` sample range.
    /// Returns `None` when the image holds no valid samples.
    pub fn resolve(&self, image: ArrayView2<f64>) -> Option<f64> {
        let (lo, hi) = min_max(image)?;
        let value = match *self {
            Bound::Value(v) => v,
            Bound::Percentile(q) => percentile(image, q)?,
        };
        Some(value.clamp(lo, hi))
    }
}

/// Curve used to map intensity into `[0, 1]` before the color lookup.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum NormMode {
    #[default]
    Linear,
    /// Linear within `±linthresh`, logarithmic beyond it.
    SymLog {
        linthresh: f64,
        linscale: f64,
        base: f64,
    },
}

impl NormMode {
    pub fn symlog(linthresh: f64, linscale: f64) -> Self {
        NormMode::SymLog {
            linthresh,
            linscale,
            base: SYMLOG_BASE,
        }
    }
}
