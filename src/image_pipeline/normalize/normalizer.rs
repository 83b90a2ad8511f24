use ndarray::{Array2, ArrayView2};
use tracing::debug;

use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::normalize::types::{Bound, NormMode};

/// Maps sample intensity into `[0, 1]` for a color lookup.
///
/// The intensity range can be changed at any time through [`Normalizer::set_clim`]
/// without touching the image it was derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalizer {
    mode: NormMode,
    vmin: f64,
    vmax: f64,
}

impl Normalizer {
    pub fn new(mode: NormMode, vmin: f64, vmax: f64) -> Self {
        Self { mode, vmin, vmax }
    }

    /// Resolves `low` and `high` against `image`. Both bounds end up inside the
    /// image's sample range.
    pub fn from_image(image: ArrayView2<f64>, mode: NormMode, low: Bound, high: Bound) -> Result<Self> {
        let (rows, cols) = image.dim();
        let invalid = || PipelineError::InvalidDimensions(rows, cols);

        let vmin = low.resolve(image).ok_or_else(invalid)?;
        let vmax = high.resolve(image).ok_or_else(invalid)?;
        debug!("Resolved bounds {:?} -> {}, {:?} -> {}", low, vmin, high, vmax);

        Ok(Self::new(mode, vmin, vmax))
    }

    pub fn mode(&self) -> NormMode {
        self.mode
    }

    pub fn clim(&self) -> (f64, f64) {
        (self.vmin, self.vmax)
    }

    pub fn set_clim(&mut self, vmin: f64, vmax: f64) {
        self.vmin = vmin;
        self.vmax = vmax;
    }

    pub fn set_vmin(&mut self, vmin: f64) {
        self.vmin = vmin;
    }

    pub fn set_vmax(&mut self, vmax: f64) {
        self.vmax = vmax;
    }

    /// Normalized position of `value`, clamped to `[0, 1]`.
    ///
    /// Degenerate ranges (`vmin >= vmax`) and NaN map to 0.
    pub fn normalize(&self, value: f64) -> f64 {
        if self.vmin >= self.vmax || value.is_nan() {
            return 0.0;
        }

        let lo = self.transform(self.vmin);
        let hi = self.transform(self.vmax);
        if hi <= lo {
            return 0.0;
        }

        ((self.transform(value) - lo) / (hi - lo)).clamp(0.0, 1.0)
    }

    /// Sample value whose normalized position is `t`, the inverse of
    /// [`Normalizer::normalize`] inside the current range. Used for colorbar ticks.
    pub fn value_at(&self, t: f64) -> f64 {
        if self.vmin >= self.vmax {
            return self.vmin;
        }

        let lo = self.transform(self.vmin);
        let hi = self.transform(self.vmax);
        self.inverse(lo + t.clamp(0.0, 1.0) * (hi - lo))
    }

    pub fn map(&self, image: ArrayView2<f64>) -> Array2<f64> {
        image.mapv(|v| self.normalize(v))
    }

    fn transform(&self, value: f64) -> f64 {
        match self.mode {
            NormMode::Linear => value,
            NormMode::SymLog {
                linthresh,
                linscale,
                base,
            } => symlog_transform(value, linthresh, linscale, base),
        }
    }

    fn inverse(&self, value: f64) -> f64 {
        match self.mode {
            NormMode::Linear => value,
            NormMode::SymLog {
                linthresh,
                linscale,
                base,
            } => symlog_inverse(value, linthresh, linscale, base),
        }
    }
}

/// Symmetric-log forward transform.
///
/// `|a| <= linthresh` is scaled linearly by `linscale / (1 - 1/base)`, which
/// makes the curve continuous at the threshold; beyond it the magnitude grows
/// with `log_base(|a| / linthresh)`.
pub fn symlog_transform(value: f64, linthresh: f64, linscale: f64, base: f64) -> f64 {
    let linscale_adj = linscale / (1.0 - base.recip());
    let magnitude = value.abs();

    if magnitude <= linthresh {
        value * linscale_adj
    } else {
        value.signum() * linthresh * (linscale_adj + (magnitude / linthresh).ln() / base.ln())
    }
}

/// Inverse of [`symlog_transform`] for the same parameters.
pub fn symlog_inverse(value: f64, linthresh: f64, linscale: f64, base: f64) -> f64 {
    let linscale_adj = linscale / (1.0 - base.recip());
    let magnitude = value.abs();

    if magnitude <= linthresh * linscale_adj {
        value / linscale_adj
    } else {
        value.signum() * linthresh * base.powf(magnitude / linthresh - linscale_adj)
    }
}
