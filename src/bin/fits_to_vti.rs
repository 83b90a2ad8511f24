//! Exports the FITS image as a one-slice VTK ImageData volume.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use fits_falsecolor_rs::image_pipeline::config::{FITS_FILE, VOLUME_OUTPUT};
use fits_falsecolor_rs::image_pipeline::{FitsToVolumePipeline, ReaderConfig};
use fits_falsecolor_rs::logger;

use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "fits_to_vti", about = "Export a FITS image as a .vti volume", long_about = None)]
struct Args {
    /// FITS file to export
    #[arg(default_value = FITS_FILE)]
    input: PathBuf,

    /// Destination `.vti` file
    #[arg(short, long, default_value = VOLUME_OUTPUT)]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init();

    if let Some(parent) = args.output.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }

    let pipeline = FitsToVolumePipeline::new(ReaderConfig::default());
    let grid = pipeline
        .convert_file(&args.input, &args.output)
        .with_context(|| format!("exporting {} to {}", args.input.display(), args.output.display()))?;

    info!("Wrote {} points to {}", grid.point_count(), args.output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_arguments() {
        let args = Args::try_parse_from(["fits_to_vti"]).unwrap();
        assert_eq!(args.input, PathBuf::from(FITS_FILE));
        assert_eq!(args.output, PathBuf::from(VOLUME_OUTPUT));
    }

    #[test]
    fn test_rejects_unknown_flags() {
        assert!(Args::try_parse_from(["fits_to_vti", "--crop", "2"]).is_err());
    }
}
