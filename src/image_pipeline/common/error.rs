use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("HDU {0} not found in FITS file")]
    HduNotFound(usize),

    #[error("Unsupported FITS data: {0}")]
    UnsupportedData(String),

    #[error("Invalid image dimensions: rows={0}, cols={1}")]
    InvalidDimensions(usize, usize),

    #[error("Invalid crop factor {factor} for an image with {rows} rows: crop would be empty")]
    InvalidCropFactor { factor: usize, rows: usize },

    #[error("Crop of size {size} does not fit inside a {rows}x{cols} image")]
    CropOutOfBounds { size: usize, rows: usize, cols: usize },

    #[error("Failed to render figure: {0}")]
    RenderError(String),

    #[error("Failed to encode output: {0}")]
    EncodeError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
