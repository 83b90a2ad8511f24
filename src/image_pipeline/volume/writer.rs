use std::io::Write;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::volume::types::VoxelGrid;

pub trait VolumeWriter {
    fn write_volume(&self, grid: &VoxelGrid, output: &mut dyn Write) -> Result<()>;
}
