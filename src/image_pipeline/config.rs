//! Display configuration and the fixed run parameters.

use crate::image_pipeline::normalize::{Bound, NormMode, SYMLOG_BASE};
use crate::image_pipeline::processing::CropSizing;

/// Default input: JWST NIRCam F322W2/F323N mosaic of Saturn.
pub const FITS_FILE: &str = "data/jw01247-o341_t637_nircam_f322w2-f323n_i2d.fits";
pub const RENDER_OUTPUT: &str = "results/output.png";
pub const VOLUME_OUTPUT: &str = "results/saturn_for_paraview.vti";

pub const INSTRUMENT: &str = "JWST NIRCam F323N";

/// Lower display bound of the Saturn view, in data units.
pub const MIN_VALUE: f64 = 28.0;
/// Upper display bound of the Saturn view, as a percentile.
pub const MAX_PERCENTILE: f64 = 100.0;
pub const LINTHRESH: f64 = 50.0;
pub const LINSCALE: f64 = 1.0;
pub const CROP_FACTOR: usize = 1;

/// How the display array and its normalization are derived from a FITS image.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayConfig {
    pub crop_factor: usize,
    pub crop_sizing: CropSizing,
    pub mode: NormMode,
    pub low: Bound,
    pub high: Bound,
    /// Instrument label used in the figure title
    pub instrument: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self::saturn()
    }
}

impl DisplayConfig {
    /// Symmetric-log view with a fixed floor and the data maximum as ceiling.
    pub fn saturn() -> Self {
        Self {
            crop_factor: CROP_FACTOR,
            crop_sizing: CropSizing::RowCount,
            mode: NormMode::SymLog {
                linthresh: LINTHRESH,
                linscale: LINSCALE,
                base: SYMLOG_BASE,
            },
            low: Bound::Value(MIN_VALUE),
            high: Bound::Percentile(MAX_PERCENTILE),
            instrument: INSTRUMENT.to_string(),
        }
    }

    /// Plain linear min-to-max view of the whole image.
    pub fn quicklook() -> Self {
        Self {
            crop_factor: 1,
            crop_sizing: CropSizing::RowCount,
            mode: NormMode::Linear,
            low: Bound::Percentile(0.0),
            high: Bound::Percentile(100.0),
            instrument: INSTRUMENT.to_string(),
        }
    }

    pub fn builder() -> DisplayConfigBuilder {
        DisplayConfigBuilder::default()
    }
}

/// Builder for DisplayConfig, starting from the Saturn view
#[derive(Default)]
pub struct DisplayConfigBuilder {
    crop_factor: Option<usize>,
    crop_sizing: Option<CropSizing>,
    mode: Option<NormMode>,
    low: Option<Bound>,
    high: Option<Bound>,
    instrument: Option<String>,
}

impl DisplayConfigBuilder {
    pub fn crop_factor(mut self, factor: usize) -> Self {
        self.crop_factor = Some(factor);
        self
    }

    pub fn crop_sizing(mut self, sizing: CropSizing) -> Self {
        self.crop_sizing = Some(sizing);
        self
    }

    pub fn mode(mut self, mode: NormMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn bounds(mut self, low: Bound, high: Bound) -> Self {
        self.low = Some(low);
        self.high = Some(high);
        self
    }

    pub fn instrument(mut self, instrument: impl Into<String>) -> Self {
        self.instrument = Some(instrument.into());
        self
    }

    pub fn build(self) -> DisplayConfig {
        let default = DisplayConfig::default();
        DisplayConfig {
            crop_factor: self.crop_factor.unwrap_or(default.crop_factor),
            crop_sizing: self.crop_sizing.unwrap_or(default.crop_sizing),
            mode: self.mode.unwrap_or(default.mode),
            low: self.low.unwrap_or(default.low),
            high: self.high.unwrap_or(default.high),
            instrument: self.instrument.unwrap_or(default.instrument),
        }
    }
}
