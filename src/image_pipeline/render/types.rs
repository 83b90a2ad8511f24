//! Render configuration types

use crate::image_pipeline::colormap::Colormap;

/// Where row 0 of the image is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Origin {
    /// Row 0 at the top
    #[default]
    Upper,
    /// Row 0 at the bottom, as sky images are usually shown
    Lower,
}

/// Everything the renderer needs to know about presentation.
///
/// Passed explicitly to every render call; nothing is kept in shared state.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub colormap: Colormap,
    pub origin: Origin,
    /// Output pixels per image sample along each axis
    pub pixel_scale: u32,
    /// Canvas fill behind the title and colorbar
    pub background: [u8; 3],
    pub colorbar: bool,
    pub colorbar_width: u32,
    pub colorbar_gap: u32,
    /// Room right of the colorbar for tick values and its label
    pub colorbar_label_width: u32,
    pub colorbar_label: String,
    pub font_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            colormap: Colormap::default(),
            origin: Origin::Upper,
            pixel_scale: 1,
            background: [0, 0, 0],
            colorbar: true,
            colorbar_width: 24,
            colorbar_gap: 8,
            colorbar_label_width: 72,
            colorbar_label: "Intensity".to_string(),
            font_size: 16,
        }
    }
}

impl RenderConfig {
    pub fn builder() -> RenderConfigBuilder {
        RenderConfigBuilder::default()
    }

    /// Text color that stays readable on `background`.
    pub fn foreground(&self) -> [u8; 3] {
        let [r, g, b] = self.background;
        if u32::from(r) + u32::from(g) + u32::from(b) < 384 {
            [255, 255, 255]
        } else {
            [0, 0, 0]
        }
    }
}

/// Builder for RenderConfig
#[derive(Default)]
pub struct RenderConfigBuilder {
    colormap: Option<Colormap>,
    origin: Option<Origin>,
    pixel_scale: Option<u32>,
    background: Option<[u8; 3]>,
    colorbar: Option<bool>,
    colorbar_width: Option<u32>,
    colorbar_gap: Option<u32>,
    colorbar_label_width: Option<u32>,
    colorbar_label: Option<String>,
    font_size: Option<u32>,
}

impl RenderConfigBuilder {
    pub fn colormap(mut self, colormap: Colormap) -> Self {
        self.colormap = Some(colormap);
        self
    }

    pub fn origin(mut self, origin: Origin) -> Self {
        self.origin = Some(origin);
        self
    }

    /// Values below 1 are raised to 1.
    pub fn pixel_scale(mut self, scale: u32) -> Self {
        self.pixel_scale = Some(scale.max(1));
        self
    }

    pub fn background(mut self, rgb: [u8; 3]) -> Self {
        self.background = Some(rgb);
        self
    }

    pub fn colorbar(mut self, enable: bool) -> Self {
        self.colorbar = Some(enable);
        self
    }

    pub fn colorbar_width(mut self, width: u32) -> Self {
        self.colorbar_width = Some(width);
        self
    }

    pub fn colorbar_gap(mut self, gap: u32) -> Self {
        self.colorbar_gap = Some(gap);
        self
    }

    pub fn colorbar_label_width(mut self, width: u32) -> Self {
        self.colorbar_label_width = Some(width);
        self
    }

    pub fn colorbar_label(mut self, label: impl Into<String>) -> Self {
        self.colorbar_label = Some(label.into());
        self
    }

    pub fn font_size(mut self, size: u32) -> Self {
        self.font_size = Some(size);
        self
    }

    pub fn build(self) -> RenderConfig {
        let default = RenderConfig::default();
        RenderConfig {
            colormap: self.colormap.unwrap_or(default.colormap),
            origin: self.origin.unwrap_or(default.origin),
            pixel_scale: self.pixel_scale.unwrap_or(default.pixel_scale),
            background: self.background.unwrap_or(default.background),
            colorbar: self.colorbar.unwrap_or(default.colorbar),
            colorbar_width: self.colorbar_width.unwrap_or(default.colorbar_width),
            colorbar_gap: self.colorbar_gap.unwrap_or(default.colorbar_gap),
            colorbar_label_width: self.colorbar_label_width.unwrap_or(default.colorbar_label_width),
            colorbar_label: self.colorbar_label.unwrap_or(default.colorbar_label),
            font_size: self.font_size.unwrap_or(default.font_size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_keeps_every_setting() {
        let config = RenderConfig::builder()
            .colorbar_gap(3)
            .colorbar_width(10)
            .colorbar_label_width(40)
            .colorbar_label("Counts")
            .font_size(12)
            .build();

        assert_eq!(config.colorbar_gap, 3);
        assert_eq!(config.colorbar_width, 10);
        assert_eq!(config.colorbar_label_width, 40);
        assert_eq!(config.colorbar_label, "Counts");
        assert_eq!(config.font_size, 12);
    }

    #[test]
    fn test_builder_defaults() {
        let config = RenderConfig::builder().build();
        assert_eq!(config.colorbar_gap, 8);
        assert_eq!(config.colorbar_label, "Intensity");
    }

    #[test]
    fn test_foreground_contrasts_background() {
        assert_eq!(RenderConfig::default().foreground(), [255, 255, 255]);
        let light = RenderConfig::builder().background([250, 250, 250]).build();
        assert_eq!(light.foreground(), [0, 0, 0]);
    }
}
