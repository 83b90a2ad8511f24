//! Color lookup tables
//!
//! A colormap is a fixed-size table of RGB entries built by linearly
//! interpolating evenly spaced color stops.

/// Number of entries in every lookup table.
pub const LUT_SIZE: usize = 256;

/// Stops of the warm black-to-cream gradient used for the Saturn view.
pub const SATURN_STOPS: [[f64; 3]; 4] = [
    [0.0, 0.0, 0.0],
    [0.5, 0.25, 0.0],
    [0.8, 0.6, 0.2],
    [1.0, 0.9, 0.6],
];

// Nine evenly spaced samples of matplotlib's inferno map.
const INFERNO_STOPS: [[f64; 3]; 9] = [
    [0.0 / 255.0, 0.0 / 255.0, 4.0 / 255.0],
    [27.0 / 255.0, 12.0 / 255.0, 65.0 / 255.0],
    [74.0 / 255.0, 12.0 / 255.0, 107.0 / 255.0],
    [120.0 / 255.0, 28.0 / 255.0, 109.0 / 255.0],
    [165.0 / 255.0, 44.0 / 255.0, 96.0 / 255.0],
    [207.0 / 255.0, 68.0 / 255.0, 70.0 / 255.0],
    [237.0 / 255.0, 105.0 / 255.0, 37.0 / 255.0],
    [251.0 / 255.0, 155.0 / 255.0, 6.0 / 255.0],
    [252.0 / 255.0, 255.0 / 255.0, 164.0 / 255.0],
];

#[derive(Debug, Clone, PartialEq)]
pub struct Colormap {
    name: String,
    lut: Vec<[u8; 3]>,
}

impl Colormap {
    /// Builds a map from RGB stops in `[0, 1]`, spaced evenly over the range.
    /// Fewer than two stops yield a single-color map.
    pub fn from_list(name: impl Into<String>, stops: &[[f64; 3]]) -> Self {
        let lut = (0..LUT_SIZE)
            .map(|i| {
                let t = i as f64 / (LUT_SIZE - 1) as f64;
                to_rgb8(interpolate(stops, t))
            })
            .collect();

        Self { name: name.into(), lut }
    }

    pub fn inferno() -> Self {
        Self::from_list("inferno", &INFERNO_STOPS)
    }

    pub fn saturn() -> Self {
        Self::from_list("saturn", &SATURN_STOPS)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.lut.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lut.is_empty()
    }

    /// Table index for a normalized value; `t` is clamped to `[0, 1]`.
    pub fn index(&self, t: f64) -> usize {
        let n = self.lut.len();
        if t.is_nan() {
            return 0;
        }
        ((t.clamp(0.0, 1.0) * n as f64) as usize).min(n - 1)
    }

    pub fn color(&self, t: f64) -> [u8; 3] {
        self.lut[self.index(t)]
    }
}

impl Default for Colormap {
    fn default() -> Self {
        Self::inferno()
    }
}

fn interpolate(stops: &[[f64; 3]], t: f64) -> [f64; 3] {
    match stops {
        [] => [0.0; 3],
        [only] => *only,
        _ => {
            let segments = (stops.len() - 1) as f64;
            let position = t * segments;
            let i = (position.floor() as usize).min(stops.len() - 2);
            let local = position - i as f64;
            let (a, b) = (stops[i], stops[i + 1]);
            [
                a[0] + (b[0] - a[0]) * local,
                a[1] + (b[1] - a[1]) * local,
                a[2] + (b[2] - a[2]) * local,
            ]
        }
    }
}

fn to_rgb8(rgb: [f64; 3]) -> [u8; 3] {
    rgb.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
}
