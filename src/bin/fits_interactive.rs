//! Renders the Saturn view and adjusts its intensity range from stdin.
//!
//! Commands, one per line: `vmin <value>`, `vmax <value>`, `save`, `quit`.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use fits_falsecolor_rs::image_pipeline::config::{FITS_FILE, RENDER_OUTPUT};
use fits_falsecolor_rs::image_pipeline::{
    Colormap, DisplayConfig, FitsRenderPipeline, InteractiveSession, LineInputSource, ReaderConfig,
    RenderConfig,
};
use fits_falsecolor_rs::logger;

use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "fits_interactive", about = "Interactive symlog view of a FITS image", long_about = None)]
struct Args {
    /// FITS file to display
    #[arg(default_value = FITS_FILE)]
    input: PathBuf,

    /// Figure written at start and on every `save`
    #[arg(short, long, default_value = RENDER_OUTPUT)]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init();

    let render = RenderConfig::builder()
        .colormap(Colormap::saturn())
        .background([0, 0, 0])
        .build();
    let pipeline = FitsRenderPipeline::new(ReaderConfig::default(), DisplayConfig::saturn(), render.clone());

    let prepared = pipeline
        .load(&args.input)
        .with_context(|| format!("loading {}", args.input.display()))?;

    info!("{}", prepared.title.replace('\n', " | "));
    info!(
        "Display array {:?}, {} invalid samples replaced",
        prepared.display.dim(),
        prepared.invalid
    );

    if let Some(parent) = args.output.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }

    let writer = pipeline.into_writer();
    let mut session = InteractiveSession::new(prepared.display, prepared.norm, writer, render, &args.output)?
        .with_title(prepared.title);

    info!("Enter `vmin <value>`, `vmax <value>`, `save` or `quit`");
    let stdin = std::io::stdin();
    let mut source = LineInputSource::new(stdin.lock());
    let summary = session.run(&mut source)?;

    info!("Final range: {:?} after {} events", session.clim(), summary.events);
    Ok(())
}
