//! Volumetric export module
//!
//! Wraps a 2-D image as a one-slice voxel grid and writes it in a format
//! volume visualization tools can read.

mod vti_writer;
mod writer;
pub mod types;

pub use types::VoxelGrid;
pub use vti_writer::{VtiWriter, SCALAR_NAME};
pub use writer::VolumeWriter;
