//! FITS reading module
//!
//! This module provides FITS image and header reading behind a reader trait.

mod reader;
mod fitrs_reader;
pub mod types;

pub use reader::FitsImageReader;
pub use fitrs_reader::{FitrsReader, ReaderConfig, DEFAULT_HEADER_KEYS};
pub use types::{FitsHeader, FitsImage, HeaderValue, UNKNOWN};
