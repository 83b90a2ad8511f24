use image::RgbImage;
use ndarray::ArrayView2;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::{debug, warn};

use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::normalize::Normalizer;
use crate::image_pipeline::render::types::{Origin, RenderConfig};

const FONT_FAMILY: &str = "sans-serif";
const TITLE_LINE_SPACING: u32 = 4;
const TITLE_PADDING: u32 = 8;
const COLORBAR_TICKS: usize = 5;

/// Pixel geometry of a composed figure.
///
/// The title band spans the top, the image sits below it on the left and the
/// colorbar column (gap, bar, labels) is to the right of the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FigureLayout {
    pub width: u32,
    pub height: u32,
    pub title_height: u32,
    pub image_width: u32,
    pub image_height: u32,
    /// Left edge of the colorbar itself, after the gap
    pub bar_x: u32,
}

impl FigureLayout {
    pub fn image_y(&self) -> u32 {
        self.title_height
    }
}

/// Computes the figure geometry for a `rows x cols` display array.
pub fn layout(rows: usize, cols: usize, config: &RenderConfig, title: &str) -> Result<FigureLayout> {
    let scale = config.pixel_scale.max(1);
    let invalid = || PipelineError::InvalidDimensions(rows, cols);

    let image_height = to_pixels(rows, scale).ok_or_else(invalid)?;
    let image_width = to_pixels(cols, scale).ok_or_else(invalid)?;
    if image_width == 0 || image_height == 0 {
        return Err(invalid());
    }

    let title_lines = title.lines().filter(|line| !line.trim().is_empty()).count() as u32;
    let title_height = if title_lines == 0 {
        0
    } else {
        title_lines * (config.font_size + TITLE_LINE_SPACING) + TITLE_PADDING
    };

    let column = if config.colorbar {
        config.colorbar_gap + config.colorbar_width + config.colorbar_label_width
    } else {
        0
    };

    Ok(FigureLayout {
        width: image_width.checked_add(column).ok_or_else(invalid)?,
        height: image_height.checked_add(title_height).ok_or_else(invalid)?,
        title_height,
        image_width,
        image_height,
        bar_x: image_width + config.colorbar_gap,
    })
}

/// Draws the false-color figure: `title` centered above the mapped image and,
/// when enabled, a labelled vertical colorbar (low values at the bottom).
///
/// Text needs a system font. Where none is available the title and colorbar
/// labels are skipped with a warning and the image itself is still returned.
pub fn compose(display: ArrayView2<f64>, norm: &Normalizer, config: &RenderConfig, title: &str) -> Result<RgbImage> {
    let (rows, cols) = display.dim();
    let layout = layout(rows, cols, config, title)?;

    debug!(
        "Composing {}x{} figure (scale {})",
        layout.width,
        layout.height,
        config.pixel_scale
    );

    let mut buffer = vec![0u8; layout.width as usize * layout.height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (layout.width, layout.height)).into_drawing_area();
        root.fill(&rgb(config.background)).map_err(draw_error)?;

        draw_image(&root, display, norm, config, &layout)?;

        if config.colorbar {
            draw_colorbar(&root, norm, config, &layout)?;
        }

        if layout.title_height > 0 {
            if let Err(e) = draw_title(&root, config, &layout, title) {
                warn!("Title not drawn: {}", e);
            }
        }

        root.present().map_err(draw_error)?;
    }

    RgbImage::from_raw(layout.width, layout.height, buffer)
        .ok_or_else(|| PipelineError::RenderError("figure buffer has the wrong size".to_string()))
}

fn draw_image(
    root: &DrawingArea<BitMapBackend<'_>, Shift>,
    display: ArrayView2<f64>,
    norm: &Normalizer,
    config: &RenderConfig,
    layout: &FigureLayout,
) -> Result<()> {
    let rows = display.nrows();
    let scale = config.pixel_scale.max(1);

    for ((row, col), &value) in display.indexed_iter() {
        let color = rgb(config.colormap.color(norm.normalize(value)));
        let dest_row = match config.origin {
            Origin::Upper => row,
            Origin::Lower => rows - 1 - row,
        };
        let x0 = col as u32 * scale;
        let y0 = layout.image_y() + dest_row as u32 * scale;

        for dy in 0..scale {
            for dx in 0..scale {
                root.draw_pixel(((x0 + dx) as i32, (y0 + dy) as i32), &color)
                    .map_err(draw_error)?;
            }
        }
    }

    Ok(())
}

fn draw_colorbar(
    root: &DrawingArea<BitMapBackend<'_>, Shift>,
    norm: &Normalizer,
    config: &RenderConfig,
    layout: &FigureLayout,
) -> Result<()> {
    let column = root.clone().shrink(
        (layout.bar_x, layout.image_y()),
        (config.colorbar_width + config.colorbar_label_width, layout.image_height),
    );

    let mut chart = ChartBuilder::on(&column)
        .set_label_area_size(LabelAreaPosition::Right, config.colorbar_label_width)
        .build_cartesian_2d(0.0..1.0, 0.0..1.0)
        .map_err(draw_error)?;

    // one band per output row so the gradient has no visible steps
    let steps = layout.image_height.max(1);
    chart
        .draw_series((0..steps).map(|step| {
            let t0 = f64::from(step) / f64::from(steps);
            let t1 = f64::from(step + 1) / f64::from(steps);
            let color = rgb(config.colormap.color((t0 + t1) * 0.5));
            Rectangle::new([(0.0, t0), (1.0, t1)], color.filled())
        }))
        .map_err(draw_error)?;

    let fg = rgb(config.foreground());
    let text = (FONT_FAMILY, config.font_size).into_font().color(&fg);
    let ticks = |t: &f64| format_tick(norm.value_at(*t));

    let labelled = chart
        .configure_mesh()
        .disable_x_axis()
        .disable_mesh()
        .y_labels(COLORBAR_TICKS)
        .y_label_formatter(&ticks)
        .y_desc(config.colorbar_label.as_str())
        .label_style(text.clone())
        .axis_desc_style(text)
        .axis_style(fg)
        .draw();

    if let Err(e) = labelled {
        warn!("Colorbar labels not drawn: {}", e);
    }

    Ok(())
}

fn draw_title(
    root: &DrawingArea<BitMapBackend<'_>, Shift>,
    config: &RenderConfig,
    layout: &FigureLayout,
    title: &str,
) -> Result<()> {
    let fg = rgb(config.foreground());
    let style = (FONT_FAMILY, config.font_size)
        .into_font()
        .color(&fg)
        .pos(Pos::new(HPos::Center, VPos::Top));
    let center = (layout.image_width / 2) as i32;

    let lines = title.lines().filter(|line| !line.trim().is_empty());
    for (i, line) in lines.enumerate() {
        let y = TITLE_PADDING / 2 + i as u32 * (config.font_size + TITLE_LINE_SPACING);
        root.draw_text(line, &style, (center, y as i32)).map_err(draw_error)?;
    }

    Ok(())
}

fn format_tick(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-2..1e5).contains(&magnitude) {
        format!("{:.2e}", value)
    } else {
        format!("{:.1}", value)
    }
}

fn rgb([r, g, b]: [u8; 3]) -> RGBColor {
    RGBColor(r, g, b)
}

fn draw_error<E: std::fmt::Display>(e: E) -> PipelineError {
    PipelineError::RenderError(e.to_string())
}

fn to_pixels(samples: usize, scale: u32) -> Option<u32> {
    u32::try_from(samples).ok()?.checked_mul(scale)
}
