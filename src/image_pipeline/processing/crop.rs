use ndarray::{s, Array2, ArrayView2};
use tracing::debug;

use crate::image_pipeline::common::error::{PipelineError, Result};

/// How the column extent of a center crop is sized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CropSizing {
    /// Both axes use `rows / factor`, yielding a square crop.
    #[default]
    RowCount,
    /// Columns use `cols / factor`, keeping the aspect ratio.
    PerAxis,
}

/// Centered sub-rectangle of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRegion {
    pub start_row: usize,
    pub start_col: usize,
    pub height: usize,
    pub width: usize,
}

impl CropRegion {
    /// Computes the centered region for `factor`, failing if it would be empty
    /// or would not fit inside a `rows x cols` image.
    pub fn centered(rows: usize, cols: usize, factor: usize, sizing: CropSizing) -> Result<Self> {
        if factor == 0 || rows / factor == 0 {
            return Err(PipelineError::InvalidCropFactor { factor, rows });
        }

        let height = rows / factor;
        let width = match sizing {
            CropSizing::RowCount => height,
            CropSizing::PerAxis => cols / factor,
        };

        if width == 0 || width > cols {
            return Err(PipelineError::CropOutOfBounds { size: width, rows, cols });
        }

        Ok(Self {
            start_row: (rows - height) / 2,
            start_col: (cols - width) / 2,
            height,
            width,
        })
    }

    pub fn end_row(&self) -> usize {
        self.start_row + self.height
    }

    pub fn end_col(&self) -> usize {
        self.start_col + self.width
    }
}

/// Returns the centered `rows/factor x rows/factor` sub-array of `image`.
///
/// A factor of 1 returns the whole image untouched, whatever its aspect ratio.
pub fn center_crop(image: ArrayView2<f64>, factor: usize) -> Result<Array2<f64>> {
    center_crop_with(image, factor, CropSizing::RowCount)
}

pub fn center_crop_with(image: ArrayView2<f64>, factor: usize, sizing: CropSizing) -> Result<Array2<f64>> {
    let (rows, cols) = image.dim();

    if factor == 1 && rows > 0 {
        return Ok(image.to_owned());
    }

    let region = CropRegion::centered(rows, cols, factor, sizing)?;
    debug!(
        "Cropping {}x{} to {}x{} at ({}, {})",
        rows, cols, region.height, region.width, region.start_row, region.start_col
    );

    Ok(image
        .slice(s![region.start_row..region.end_row(), region.start_col..region.end_col()])
        .to_owned())
}
