use std::cell::RefCell;
use std::fs;
use std::io::Write;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use image::RgbImage;
use ndarray::Array2;
use tracing::{debug, info, instrument};

use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::interactive::input::{InputEvent, InputSource};
use crate::image_pipeline::interactive::slider::Slider;
use crate::image_pipeline::normalize::Normalizer;
use crate::image_pipeline::processing::min_max;
use crate::image_pipeline::render::{compose, RasterWriter, RenderConfig};

/// Counts of what a finished session did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub events: usize,
    pub saves: usize,
}

/// A display array bound to two range sliders.
///
/// Moving either slider updates the shared normalizer immediately, so the next
/// render reflects it. The display array itself is never recomputed.
pub struct InteractiveSession<W: RasterWriter> {
    display: Array2<f64>,
    norm: Rc<RefCell<Normalizer>>,
    vmin: Slider,
    vmax: Slider,
    writer: W,
    config: RenderConfig,
    title: String,
    output_path: PathBuf,
}

impl<W: RasterWriter> InteractiveSession<W> {
    /// Both sliders span the display array's sample range and start at the
    /// normalizer's current bounds (clamped into that range).
    pub fn new(
        display: Array2<f64>,
        norm: Normalizer,
        writer: W,
        config: RenderConfig,
        output_path: impl Into<PathBuf>,
    ) -> Result<Self> {
        let (rows, cols) = display.dim();
        let (lo, hi) = min_max(display.view()).ok_or(PipelineError::InvalidDimensions(rows, cols))?;
        let (vmin_init, vmax_init) = norm.clim();

        let mut vmin = Slider::new("vmin", lo, hi, vmin_init);
        let mut vmax = Slider::new("vmax", lo, hi, vmax_init);

        let norm = Rc::new(RefCell::new(norm));
        norm.borrow_mut().set_clim(vmin.val(), vmax.val());

        let on_vmin = Rc::clone(&norm);
        vmin.on_changed(move |v| on_vmin.borrow_mut().set_vmin(v));
        let on_vmax = Rc::clone(&norm);
        vmax.on_changed(move |v| on_vmax.borrow_mut().set_vmax(v));

        debug!("Sliders span [{}, {}], starting at {:?}", lo, hi, norm.borrow().clim());

        Ok(Self {
            display,
            norm,
            vmin,
            vmax,
            writer,
            config,
            title: String::new(),
            output_path: output_path.into(),
        })
    }

    /// Caption drawn above every rendered figure.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn clim(&self) -> (f64, f64) {
        self.norm.borrow().clim()
    }

    pub fn vmin_slider(&mut self) -> &mut Slider {
        &mut self.vmin
    }

    pub fn vmax_slider(&mut self) -> &mut Slider {
        &mut self.vmax
    }

    pub fn display(&self) -> &Array2<f64> {
        &self.display
    }

    pub fn render(&self) -> Result<RgbImage> {
        compose(self.display.view(), &self.norm.borrow(), &self.config, &self.title)
    }

    pub fn save_to(&self, output: &mut dyn Write) -> Result<()> {
        let raster = self.render()?;
        self.writer.write_raster(&raster, output, &self.config)
    }

    /// Encodes fully in memory first, so a failed render never truncates the
    /// previously saved figure.
    fn save(&self) -> Result<()> {
        let mut encoded = Vec::new();
        self.save_to(&mut encoded)?;

        fs::write(&self.output_path, &encoded).map_err(|e| {
            PipelineError::OutputWriteError(format!("{}: {}", self.output_path.display(), e))
        })?;

        info!(output = %self.output_path.display(), clim = ?self.clim(), "Saved figure");
        Ok(())
    }

    /// Applies one event. Slider events take effect before this returns.
    pub fn handle(&mut self, event: InputEvent) -> Result<ControlFlow<()>> {
        match event {
            InputEvent::SetVmin(value) => {
                self.vmin.set_val(value);
            }
            InputEvent::SetVmax(value) => {
                self.vmax.set_val(value);
            }
            InputEvent::Save => self.save()?,
            InputEvent::Quit => return Ok(ControlFlow::Break(())),
        }
        Ok(ControlFlow::Continue(()))
    }

    /// Saves once, then processes events in arrival order until `Quit` or the
    /// source runs dry.
    #[instrument(skip(self, source), fields(output = %self.output_path.display()))]
    pub fn run<S: InputSource + ?Sized>(&mut self, source: &mut S) -> Result<SessionSummary> {
        self.save()?;
        let mut summary = SessionSummary { events: 0, saves: 1 };

        while let Some(event) = source.next_event() {
            summary.events += 1;
            if event == InputEvent::Save {
                summary.saves += 1;
            }
            if self.handle(event)?.is_break() {
                break;
            }
        }

        info!(events = summary.events, saves = summary.saves, "Interactive session finished");
        Ok(summary)
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }
}
