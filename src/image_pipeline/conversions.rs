//! Pipeline conversions module
//!
//! This module contains orchestration logic for rendering and exporting FITS images.

mod fits_render;
mod fits_to_volume;


pub use fits_render::{FitsRenderPipeline, PreparedImage};
pub use fits_to_volume::FitsToVolumePipeline;
