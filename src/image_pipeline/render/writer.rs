use std::io::Write;

use image::RgbImage;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::render::types::RenderConfig;

pub trait RasterWriter {
    fn write_raster(&self, raster: &RgbImage, output: &mut dyn Write, config: &RenderConfig) -> Result<()>;
}
