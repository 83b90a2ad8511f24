use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use fits_falsecolor_rs::image_pipeline::config::{FITS_FILE, RENDER_OUTPUT};
use fits_falsecolor_rs::image_pipeline::{
    Colormap, DisplayConfig, FitsRenderPipeline, Origin, ReaderConfig, RenderConfig,
};
use fits_falsecolor_rs::logger;

use tracing::{error, info};

/// Renders a FITS image as a titled false-color PNG with a colorbar
#[derive(Parser, Debug)]
#[command(name = "fits_falsecolor", long_about = None)]
struct Args {
    /// FITS file to render
    #[arg(default_value = FITS_FILE)]
    input: PathBuf,

    /// Where the PNG is written
    #[arg(short, long, default_value = RENDER_OUTPUT)]
    output: PathBuf,

    /// Output pixels per image sample
    #[arg(long, default_value_t = 1)]
    scale: u32,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init();

    info!("Starting FITS render...");

    let render = RenderConfig::builder()
        .colormap(Colormap::inferno())
        .origin(Origin::Lower)
        .pixel_scale(args.scale)
        .build();
    let pipeline = FitsRenderPipeline::new(ReaderConfig::default(), DisplayConfig::quicklook(), render);

    info!("Colormap: {}", pipeline.render_config().colormap.name());
    info!("Normalization: {:?}", pipeline.display_config().mode);

    if let Some(parent) = args.output.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }

    match pipeline.convert_file(&args.input, &args.output) {
        Ok(prepared) => {
            info!("Target: {}", prepared.title.replace('\n', " | "));
            info!("Image shape: {:?}", prepared.display.dim());
            info!("Render successful!");
            Ok(())
        }
        Err(e) => {
            error!("Render failed: {}", e);
            Err(e).with_context(|| format!("rendering {}", args.input.display()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_arguments() {
        let args = Args::try_parse_from(["fits_falsecolor"]).unwrap();
        assert_eq!(args.input, PathBuf::from(FITS_FILE));
        assert_eq!(args.output, PathBuf::from(RENDER_OUTPUT));
        assert_eq!(args.scale, 1);
    }

    #[test]
    fn test_positional_input_and_output_flag() {
        let args = Args::try_parse_from(["fits_falsecolor", "saturn.fits", "-o", "out/saturn.png", "--scale", "2"])
            .unwrap();
        assert_eq!(args.input, PathBuf::from("saturn.fits"));
        assert_eq!(args.output, PathBuf::from("out/saturn.png"));
        assert_eq!(args.scale, 2);
    }
}
