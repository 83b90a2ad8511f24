use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{debug, info, instrument};

use crate::image_pipeline::{
    common::error::{PipelineError, Result},
    fits::{FitrsReader, FitsImageReader, ReaderConfig},
    processing::{count_invalid, sanitize, shift_positive},
    volume::{VolumeWriter, VoxelGrid, VtiWriter},
};

pub struct FitsToVolumePipeline<R: FitsImageReader, V: VolumeWriter> {
    reader: R,
    writer: V,
}

impl FitsToVolumePipeline<FitrsReader, VtiWriter> {
    pub fn new(reader_config: ReaderConfig) -> Self {
        Self {
            reader: FitrsReader::new(reader_config),
            writer: VtiWriter,
        }
    }
}

impl<R: FitsImageReader, V: VolumeWriter> FitsToVolumePipeline<R, V> {
    pub fn with_custom(reader: R, writer: V) -> Self {
        Self { reader, writer }
    }

    #[instrument(skip(self, input_path), fields(input = %input_path.display()))]
    pub fn load(&self, input_path: &Path) -> Result<VoxelGrid> {
        let image = {
            let _span = tracing::info_span!("read_fits").entered();
            self.reader.read_fits(input_path)?
        };

        let (rows, cols) = image.data.dim();
        if rows == 0 || cols == 0 {
            return Err(PipelineError::InvalidDimensions(rows, cols));
        }

        debug!("Replacing {} invalid samples", count_invalid(image.data.view()));
        let clean = sanitize(image.data.view());
        let (shifted, shift) = shift_positive(clean.view());
        debug!("Shifted samples by {}", shift);

        Ok(VoxelGrid::from_image(shifted.view(), shift))
    }

    pub fn convert(&self, input_path: &Path, output: &mut dyn Write) -> Result<VoxelGrid> {
        let grid = self.load(input_path)?;
        {
            let _span = tracing::info_span!("write_volume").entered();
            self.writer.write_volume(&grid, output)?;
        }
        info!(dimensions = ?grid.dimensions, shift = grid.shift, "Volume export complete");
        Ok(grid)
    }

    #[instrument(skip(self, input_path, output_path))]
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(&self, input_path: P, output_path: Q) -> Result<VoxelGrid> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            "Exporting volume"
        );

        let grid = self.load(input_path)?;

        let output_file = {
            let _span = tracing::info_span!("create_output_file").entered();
            std::fs::File::create(output_path).map_err(|e| {
                PipelineError::OutputWriteError(format!("{}: {}", output_path.display(), e))
            })?
        };
        let mut output = BufWriter::new(output_file);

        self.writer.write_volume(&grid, &mut output)?;
        output.flush()?;

        info!(dimensions = ?grid.dimensions, shift = grid.shift, "Volume export complete");
        Ok(grid)
    }
}
