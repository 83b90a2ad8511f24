use std::io::{BufWriter, Write};
use std::path::Path;

use ndarray::Array2;
use tracing::{debug, info, instrument};

use crate::image_pipeline::{
    common::error::{PipelineError, Result},
    config::DisplayConfig,
    fits::{FitrsReader, FitsImage, FitsImageReader, ReaderConfig},
    normalize::Normalizer,
    processing::{center_crop_with, count_invalid, sanitize},
    render::{compose, PngWriter, RasterWriter, RenderConfig},
};

/// A display array ready to be rendered, with the normalization derived from it.
#[derive(Debug, Clone)]
pub struct PreparedImage {
    pub display: Array2<f64>,
    pub norm: Normalizer,
    pub title: String,
    /// Samples that were NaN before sanitization
    pub invalid: usize,
}

pub struct FitsRenderPipeline<R: FitsImageReader, W: RasterWriter> {
    reader: R,
    writer: W,
    display: DisplayConfig,
    render: RenderConfig,
}

impl FitsRenderPipeline<FitrsReader, PngWriter> {
    pub fn new(reader_config: ReaderConfig, display: DisplayConfig, render: RenderConfig) -> Self {
        Self {
            reader: FitrsReader::new(reader_config),
            writer: PngWriter,
            display,
            render,
        }
    }
}

impl<R: FitsImageReader, W: RasterWriter> FitsRenderPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, display: DisplayConfig, render: RenderConfig) -> Self {
        Self {
            reader,
            writer,
            display,
            render,
        }
    }

    fn validate_dimensions(&self, rows: usize, cols: usize) -> Result<()> {
        if rows == 0 || cols == 0 {
            return Err(PipelineError::InvalidDimensions(rows, cols));
        }

        Ok(())
    }

    /// Crops, sanitizes and derives the normalization for an image already in memory.
    pub fn prepare(&self, image: FitsImage) -> Result<PreparedImage> {
        self.validate_dimensions(image.rows(), image.cols())?;
        let title = image.title(&self.display.instrument);

        let cropped = {
            let _span = tracing::info_span!("center_crop", factor = self.display.crop_factor).entered();
            center_crop_with(image.data.view(), self.display.crop_factor, self.display.crop_sizing)?
        };

        let invalid = count_invalid(cropped.view());
        let display = {
            let _span = tracing::info_span!("sanitize").entered();
            sanitize(cropped.view())
        };
        debug!("Replaced {} invalid samples with 0.0", invalid);

        let norm = {
            let _span = tracing::info_span!("normalize").entered();
            Normalizer::from_image(display.view(), self.display.mode, self.display.low, self.display.high)?
        };

        Ok(PreparedImage {
            display,
            norm,
            title,
            invalid,
        })
    }

    #[instrument(skip(self, input_path), fields(input = %input_path.display()))]
    pub fn load(&self, input_path: &Path) -> Result<PreparedImage> {
        let image = {
            let _span = tracing::info_span!("read_fits").entered();
            self.reader.read_fits(input_path)?
        };

        info!(rows = image.rows(), cols = image.cols(), "Loaded FITS image");
        self.prepare(image)
    }

    pub fn render(&self, prepared: &PreparedImage, output: &mut dyn Write) -> Result<()> {
        let raster = {
            let _span = tracing::info_span!("compose").entered();
            compose(prepared.display.view(), &prepared.norm, &self.render, &prepared.title)?
        };

        {
            let _span = tracing::info_span!("encode_raster").entered();
            self.writer.write_raster(&raster, output, &self.render)?;
        }

        info!(
            width = raster.width(),
            height = raster.height(),
            clim = ?prepared.norm.clim(),
            "Render complete"
        );
        Ok(())
    }

    pub fn convert(&self, input_path: &Path, output: &mut dyn Write) -> Result<PreparedImage> {
        let prepared = self.load(input_path)?;
        info!(title = %prepared.title.replace('\n', " | "), "Rendering figure");
        self.render(&prepared, output)?;
        Ok(prepared)
    }

    /// Loads `input_path` and writes the raster to `output_path`. The output file
    /// is only created once the input has been read and prepared.
    #[instrument(skip(self, input_path, output_path))]
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(&self, input_path: P, output_path: Q) -> Result<PreparedImage> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            "Converting file"
        );

        let prepared = self.load(input_path)?;

        let output_file = {
            let _span = tracing::info_span!("create_output_file").entered();
            std::fs::File::create(output_path).map_err(|e| {
                PipelineError::OutputWriteError(format!("{}: {}", output_path.display(), e))
            })?
        };
        let mut output = BufWriter::new(output_file);

        self.render(&prepared, &mut output)?;
        output.flush()?;

        Ok(prepared)
    }

    pub fn display_config(&self) -> &DisplayConfig {
        &self.display
    }

    pub fn render_config(&self) -> &RenderConfig {
        &self.render
    }

    pub fn set_render_config(&mut self, render: RenderConfig) {
        self.render = render;
    }

    /// Hands the writer over, e.g. to an interactive session.
    pub fn into_writer(self) -> W {
        self.writer
    }
}
