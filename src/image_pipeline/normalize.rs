//! Intensity normalization module
//!
//! Linear and symmetric-log mappings from sample intensity to a `[0, 1]`
//! position in a colormap, with bounds that can be re-parameterized at any time.

mod normalizer;
pub mod types;


pub use normalizer::{symlog_inverse, symlog_transform, Normalizer};
pub use types::{Bound, NormMode, SYMLOG_BASE};
