use std::path::Path;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::fits::types::FitsImage;

pub trait FitsImageReader {
    fn read_fits(&self, path: &Path) -> Result<FitsImage>;
}
