//! VTK XML ImageData (`.vti`) writer backed by `vtkio`.
//!
//! The grid becomes one inline piece with a single `Float64` point-data array.
//! ParaView and other VTK readers load the file directly.

use std::io::Write;

use tracing::debug;
use vtkio::model::{
    Attribute, Attributes, ByteOrder, DataArray, DataSet, ElementType, Extent, IOBuffer, ImageDataPiece, Piece,
    Version, Vtk,
};

use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::volume::types::VoxelGrid;
use crate::image_pipeline::volume::writer::VolumeWriter;

/// Name of the scalar array in the written file.
pub const SCALAR_NAME: &str = "intensity";

pub struct VtiWriter;

impl VtiWriter {
    /// Builds the in-memory VTK model for `grid`.
    pub fn to_vtk(grid: &VoxelGrid) -> Result<Vtk> {
        if grid.scalars.len() != grid.point_count() {
            return Err(PipelineError::EncodeError(format!(
                "grid {:?} expects {} scalars, got {}",
                grid.dimensions,
                grid.point_count(),
                grid.scalars.len()
            )));
        }

        let extent = whole_extent(grid)?;
        let intensity = DataArray {
            name: SCALAR_NAME.to_string(),
            elem: ElementType::Scalars {
                num_comp: 1,
                lookup_table: None,
            },
            data: IOBuffer::F64(grid.scalars.clone()),
        };

        Ok(Vtk {
            version: Version { major: 1, minor: 0 },
            byte_order: ByteOrder::LittleEndian,
            title: String::from("FITS intensity"),
            file_path: None,
            data: DataSet::ImageData {
                extent: extent.clone(),
                origin: grid.origin.map(|v| v as f32),
                spacing: grid.spacing.map(|v| v as f32),
                meta: None,
                pieces: vec![Piece::Inline(Box::new(ImageDataPiece {
                    extent,
                    data: Attributes {
                        point: vec![Attribute::DataArray(intensity)],
                        cell: Vec::new(),
                    },
                }))],
            },
        })
    }
}

impl VolumeWriter for VtiWriter {
    fn write_volume(&self, grid: &VoxelGrid, output: &mut dyn Write) -> Result<()> {
        let vtk = Self::to_vtk(grid)?;

        debug!("Writing VTI grid {:?}", grid.dimensions);

        // encoded in memory so a failure leaves `output` untouched
        let mut encoded = Vec::new();
        vtk.write_xml(&mut encoded)
            .map_err(|e| PipelineError::EncodeError(e.to_string()))?;
        output.write_all(&encoded)?;

        debug!("VTI writing complete");
        Ok(())
    }
}

fn whole_extent(grid: &VoxelGrid) -> Result<Extent> {
    let [_, x1, _, y1, _, z1] = grid.extent();
    let to_index = |v: usize| {
        i32::try_from(v).map_err(|_| PipelineError::EncodeError(format!("grid {:?} is too large", grid.dimensions)))
    };
    Ok(Extent::Ranges([0..=to_index(x1)?, 0..=to_index(y1)?, 0..=to_index(z1)?]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn encode(grid: &VoxelGrid) -> Vec<u8> {
        let mut out = Vec::new();
        VtiWriter.write_volume(grid, &mut out).unwrap();
        out
    }

    fn point_scalars(vtk: &Vtk) -> (Extent, Vec<f64>) {
        let DataSet::ImageData { extent, pieces, .. } = &vtk.data else {
            panic!("expected ImageData");
        };
        let Piece::Inline(piece) = &pieces[0] else {
            panic!("expected an inline piece");
        };
        let Attribute::DataArray(array) = &piece.data.point[0] else {
            panic!("expected a data array");
        };
        assert_eq!(array.name, SCALAR_NAME);
        let IOBuffer::F64(values) = &array.data else {
            panic!("expected Float64 scalars");
        };
        (extent.clone(), values.clone())
    }

    #[test]
    fn test_model_layout() {
        let image = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        let grid = VoxelGrid::from_image(image.view(), 0.0);
        let vtk = VtiWriter::to_vtk(&grid).unwrap();

        let (extent, values) = point_scalars(&vtk);
        assert_eq!(grid.dimensions, [3, 2, 1]);
        assert_eq!(extent, Extent::Ranges([0..=2, 0..=1, 0..=0]));
        // x (columns) varies fastest
        assert_eq!(values, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_written_file_reads_back() {
        let image = ndarray::Array2::from_shape_fn((2, 5), |(r, c)| (r * 5 + c) as f64 + 0.5);
        let out = encode(&VoxelGrid::from_image(image.view(), 0.5));

        let text = String::from_utf8(out.clone()).unwrap();
        assert!(text.contains("ImageData"));
        assert!(text.contains(SCALAR_NAME));

        let vtk = Vtk::parse_xml(&out[..]).unwrap();
        let (_, values) = point_scalars(&vtk);
        assert_eq!(values, image.iter().copied().collect::<Vec<_>>());
    }

    #[test]
    fn test_mismatched_scalars_rejected() {
        let mut grid = VoxelGrid::from_image(array![[1.0, 2.0]].view(), 0.0);
        grid.scalars.pop();
        let mut out = Vec::new();
        assert!(matches!(
            VtiWriter.write_volume(&grid, &mut out),
            Err(PipelineError::EncodeError(_))
        ));
        assert!(out.is_empty());
    }
}
