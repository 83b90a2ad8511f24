use std::io::{Cursor, Write};

use image::{ImageFormat, RgbImage};
use tracing::debug;

use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::render::types::RenderConfig;
use crate::image_pipeline::render::writer::RasterWriter;

pub struct PngWriter;

impl RasterWriter for PngWriter {
    fn write_raster(&self, raster: &RgbImage, output: &mut dyn Write, _config: &RenderConfig) -> Result<()> {
        debug!("Encoding PNG image: {}x{}", raster.width(), raster.height());

        let mut buffer = Vec::new();
        raster
            .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
            .map_err(|e| PipelineError::EncodeError(e.to_string()))?;

        output.write_all(&buffer)?;

        debug!("PNG encoding complete");
        Ok(())
    }
}
