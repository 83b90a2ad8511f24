//! Raster rendering module
//!
//! This module draws a display array as a titled false-color figure with a
//! labelled colorbar and encodes it as PNG.

mod raster;
mod writer;
mod png_writer;
pub mod types;

pub use raster::{compose, layout, FigureLayout};
pub use writer::RasterWriter;
pub use png_writer::PngWriter;
pub use types::{Origin, RenderConfig, RenderConfigBuilder};

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn checker() -> RgbImage {
        RgbImage::from_fn(4, 3, |x, y| if (x + y) % 2 == 0 { Rgb([255, 0, 0]) } else { Rgb([0, 0, 255]) })
    }

    #[test]
    fn test_png_signature() {
        let mut out = Vec::new();
        PngWriter.write_raster(&checker(), &mut out, &RenderConfig::default()).unwrap();
        assert_eq!(&out[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_png_decodes_to_same_pixels() {
        let mut out = Vec::new();
        PngWriter.write_raster(&checker(), &mut out, &RenderConfig::default()).unwrap();

        let decoded = image::load_from_memory(&out).unwrap().to_rgb8();
        assert_eq!(decoded, checker());
    }
}
