//! FITS image reader implementation using the fitrs library.
//!
//! This module reads one image HDU and a selection of header cards from a FITS
//! file. Integer, 32-bit and 64-bit floating point data are all widened to
//! `f64`; integer BLANK samples become NaN so they flow through the same
//! sanitization path as missing floating point data.

use std::path::Path;

use fitrs::{Fits, FitsData, FitsDataArray};
use ndarray::Array2;
use tracing::{debug, warn};

use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::fits::reader::FitsImageReader;
use crate::image_pipeline::fits::types::{FitsHeader, FitsImage, HeaderValue};

/// Header cards read by default. JWST level-3 products keep these in the primary HDU.
pub const DEFAULT_HEADER_KEYS: &[&str] = &[
    "DATE", "DATE-OBS", "TARGNAME", "TELESCOP", "INSTRUME", "FILTER", "PUPIL", "EXTNAME", "BUNIT",
];

/// Which HDUs to read and which header cards to keep.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Index of the HDU holding the image samples (1 = `SCI` for JWST `_i2d` files)
    pub data_hdu: usize,
    /// Index of the HDU whose header carries the observation metadata
    pub header_hdu: usize,
    pub header_keys: Vec<String>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            data_hdu: 1,
            header_hdu: 0,
            header_keys: DEFAULT_HEADER_KEYS.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// FITS reader backed by fitrs.
///
/// The file is opened inside [`FitsImageReader::read_fits`] and closed when the
/// `Fits` value is dropped, so the handle is released on every return path.
#[derive(Debug, Clone, Default)]
pub struct FitrsReader {
    config: ReaderConfig,
}

impl FitrsReader {
    pub fn new(config: ReaderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    fn read_header(&self, fits: &Fits) -> Result<FitsHeader> {
        let hdu = fits
            .get(self.config.header_hdu)
            .ok_or(PipelineError::HduNotFound(self.config.header_hdu))?;

        let mut header = FitsHeader::new();
        for key in &self.config.header_keys {
            if let Some(value) = hdu.value(key) {
                header.insert(key.clone(), convert_header_value(value));
            }
        }
        debug!("Read {} header cards from HDU {}", header.len(), self.config.header_hdu);
        Ok(header)
    }

    fn read_image(&self, fits: &Fits) -> Result<Array2<f64>> {
        let hdu = fits
            .get(self.config.data_hdu)
            .ok_or(PipelineError::HduNotFound(self.config.data_hdu))?;

        let (shape, samples): (Vec<usize>, Vec<f64>) = match hdu.read_data() {
            FitsData::FloatingPoint32(FitsDataArray { shape, data }) => {
                (shape.clone(), data.iter().map(|&v| v as f64).collect())
            }
            FitsData::FloatingPoint64(FitsDataArray { shape, data }) => (shape.clone(), data.clone()),
            FitsData::IntegersI32(FitsDataArray { shape, data }) => (
                shape.clone(),
                data.iter().map(|v| v.map_or(f64::NAN, |x| x as f64)).collect(),
            ),
            FitsData::IntegersU32(FitsDataArray { shape, data }) => (
                shape.clone(),
                data.iter().map(|v| v.map_or(f64::NAN, |x| x as f64)).collect(),
            ),
            _ => {
                return Err(PipelineError::UnsupportedData(format!(
                    "HDU {} does not hold numeric image data",
                    self.config.data_hdu
                )));
            }
        };

        // FITS lists NAXIS1 (the fastest varying axis) first
        let (cols, rows) = image_axes(&shape)?;
        if rows * cols != samples.len() {
            return Err(PipelineError::UnsupportedData(format!(
                "shape {:?} does not match {} samples",
                shape,
                samples.len()
            )));
        }

        debug!("Read image HDU {}: {} rows x {} cols", self.config.data_hdu, rows, cols);

        Array2::from_shape_vec((rows, cols), samples)
            .map_err(|e| PipelineError::UnsupportedData(e.to_string()))
    }
}

impl FitsImageReader for FitrsReader {
    fn read_fits(&self, path: &Path) -> Result<FitsImage> {
        let fits = Fits::open(path).map_err(|e| {
            PipelineError::InputReadError(format!("{}: {}", path.display(), e))
        })?;

        let data = self.read_image(&fits)?;
        let header = self.read_header(&fits)?;

        Ok(FitsImage { data, header })
    }
}

/// Returns `(NAXIS1, NAXIS2)`, allowing trailing degenerate axes.
fn image_axes(shape: &[usize]) -> Result<(usize, usize)> {
    match shape {
        [naxis1, naxis2, rest @ ..] if rest.iter().all(|&n| n == 1) => {
            if !rest.is_empty() {
                warn!("Ignoring {} degenerate trailing axes", rest.len());
            }
            Ok((*naxis1, *naxis2))
        }
        _ => Err(PipelineError::UnsupportedData(format!(
            "expected a 2-D image, got shape {:?}",
            shape
        ))),
    }
}

fn convert_header_value(value: &fitrs::HeaderValue) -> HeaderValue {
    match value {
        fitrs::HeaderValue::CharacterString(s) => HeaderValue::Text(s.clone()),
        fitrs::HeaderValue::Logical(b) => HeaderValue::Logical(*b),
        fitrs::HeaderValue::IntegerNumber(i) => HeaderValue::Integer(*i as i64),
        fitrs::HeaderValue::RealFloatingNumber(x) => HeaderValue::Float(*x),
        other => HeaderValue::Text(format!("{:?}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitrs::Hdu;

    fn write_fixture(dir: &tempfile::TempDir, rows: usize, cols: usize, data: Vec<f32>) -> std::path::PathBuf {
        let path = dir.path().join("fixture.fits");
        let mut hdu = Hdu::new(&[cols, rows], data);
        hdu.insert("TARGNAME", "SATURN");
        hdu.insert("DATE", "2023-11-08T12:00:00");
        Fits::create(&path, hdu).expect("Failed to create fixture");
        path
    }

    fn primary_only() -> FitrsReader {
        FitrsReader::new(ReaderConfig {
            data_hdu: 0,
            header_hdu: 0,
            ..ReaderConfig::default()
        })
    }

    #[test]
    fn test_reads_rows_and_cols_in_fits_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, 2, 3, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);

        let image = primary_only().read_fits(&path).unwrap();

        assert_eq!(image.data.dim(), (2, 3));
        assert_eq!(image.data[[0, 2]], 2.0);
        assert_eq!(image.data[[1, 0]], 3.0);
    }

    #[test]
    fn test_reads_header_cards() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, 2, 2, vec![1.0; 4]);

        let image = primary_only().read_fits(&path).unwrap();

        assert_eq!(image.header.lookup("TARGNAME"), "SATURN");
        assert_eq!(image.header.lookup("DATE"), "2023-11-08T12:00:00");
        assert_eq!(image.header.lookup("FILTER"), "Unknown");
    }

    #[test]
    fn test_nan_samples_survive_reading() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, 2, 2, vec![f32::NAN, 1.0, 2.0, 3.0]);

        let image = primary_only().read_fits(&path).unwrap();

        assert!(image.data[[0, 0]].is_nan());
        assert_eq!(image.data[[1, 1]], 3.0);
    }

    #[test]
    fn test_missing_hdu() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, 2, 2, vec![1.0; 4]);

        let reader = FitrsReader::new(ReaderConfig {
            data_hdu: 5,
            header_hdu: 0,
            ..ReaderConfig::default()
        });

        assert!(matches!(reader.read_fits(&path), Err(PipelineError::HduNotFound(5))));
    }

    #[test]
    fn test_missing_file() {
        let result = FitrsReader::default().read_fits(Path::new("does/not/exist.fits"));
        assert!(matches!(result, Err(PipelineError::InputReadError(_))));
    }

    #[test]
    fn test_image_axes() {
        assert_eq!(image_axes(&[4, 3]).unwrap(), (4, 3));
        assert_eq!(image_axes(&[4, 3, 1]).unwrap(), (4, 3));
        assert!(image_axes(&[4, 3, 2]).is_err());
        assert!(image_axes(&[4]).is_err());
        assert!(image_axes(&[]).is_err());
    }
}
