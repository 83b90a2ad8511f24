//! Image processing pipeline module
//!
//! This module provides a structured approach to turning FITS images into
//! false-color rasters and volumetric grids, with separate modules for FITS
//! reading, array processing, normalization, rendering and export.

pub mod common;
pub mod config;
pub mod fits;
pub mod processing;
pub mod normalize;
pub mod colormap;
pub mod render;
pub mod interactive;
pub mod volume;
pub mod conversions;

pub use common::{
    PipelineError,
    Result,
};

pub use config::{
    DisplayConfig,
    DisplayConfigBuilder,
};

pub use fits::{
    FitsHeader,
    FitsImage,
    FitsImageReader,
    FitrsReader,
    ReaderConfig,
};

pub use normalize::{
    Bound,
    NormMode,
    Normalizer,
};

pub use colormap::Colormap;

pub use render::{
    Origin,
    PngWriter,
    RasterWriter,
    RenderConfig,
    RenderConfigBuilder,
};

pub use interactive::{
    InputEvent,
    InputSource,
    InteractiveSession,
    LineInputSource,
};

pub use volume::{
    VolumeWriter,
    VoxelGrid,
    VtiWriter,
};

pub use conversions::{
    FitsRenderPipeline,
    FitsToVolumePipeline,
    PreparedImage,
};
