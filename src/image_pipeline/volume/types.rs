//! Volumetric grid types

use ndarray::ArrayView2;

/// Regular grid of point scalars, x varying fastest.
#[derive(Debug, Clone, PartialEq)]
pub struct VoxelGrid {
    /// Points along x, y and z
    pub dimensions: [usize; 3],
    pub spacing: [f64; 3],
    pub origin: [f64; 3],
    pub scalars: Vec<f64>,
    /// Offset that was added to every sample before export
    pub shift: f64,
}

impl VoxelGrid {
    /// A single-slice grid: image columns along x, rows along y, one point along z.
    pub fn from_image(image: ArrayView2<f64>, shift: f64) -> Self {
        let (rows, cols) = image.dim();
        Self {
            dimensions: [cols, rows, 1],
            spacing: [1.0, 1.0, 1.0],
            origin: [0.0, 0.0, 0.0],
            scalars: image.iter().copied().collect(),
            shift,
        }
    }

    pub fn point_count(&self) -> usize {
        self.dimensions.iter().product()
    }

    /// Inclusive extent `x0 x1 y0 y1 z0 z1`.
    pub fn extent(&self) -> [usize; 6] {
        let [nx, ny, nz] = self.dimensions;
        [0, nx.saturating_sub(1), 0, ny.saturating_sub(1), 0, nz.saturating_sub(1)]
    }
}
