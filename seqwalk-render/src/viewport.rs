/*!
# Viewport

Maps walk coordinates to pixels inside the plot area of an export canvas, and
produces axis ticks.
*/

use seqwalk_core::AxisRange;

/// Visible walk region and the pixel rectangle it is drawn into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x_range: AxisRange,
    pub y_range: AxisRange,
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Viewport {
    /// Viewport covering the whole `width` x `height` canvas.
    pub fn new(x_range: AxisRange, y_range: AxisRange, width: u32, height: u32) -> Self {
        Self {
            x_range,
            y_range,
            left: 0.0,
            top: 0.0,
            right: width as f64,
            bottom: height as f64,
        }
    }

    /// Shrinks the plot area by the given pixel margins.
    pub fn with_margins(mut self, left: f64, top: f64, right: f64, bottom: f64) -> Self {
        self.left += left;
        self.top += top;
        self.right = (self.right - right).max(self.left + 1.0);
        self.bottom = (self.bottom - bottom).max(self.top + 1.0);
        self
    }

    pub fn plot_width(&self) -> f64 {
        self.right - self.left
    }

    pub fn plot_height(&self) -> f64 {
        self.bottom - self.top
    }

    /// World to pixel. Y grows upwards in world space and downwards on the canvas.
    pub fn world_to_pixel(&self, world_x: f64, world_y: f64) -> (f64, f64) {
        let nx = (world_x - self.x_range.min) / self.x_range.span();
        let ny = (world_y - self.y_range.min) / self.y_range.span();
        (self.left + nx * self.plot_width(), self.bottom - ny * self.plot_height())
    }
}

// Round a length to a "nice" number: 1, 2, or 5 × 10^k
pub(crate) fn nice_round_length(x: f64) -> f64 {
    if x <= 0.0 || !x.is_finite() {
        return 1.0;
    }
    let exp = x.log10().floor();
    let base = 10f64.powf(exp);
    let mant = x / base;
    let nice = if mant <= 1.0 {
        1.0
    } else if mant <= 2.0 {
        2.0
    } else if mant <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * base
}

/// Tick positions inside `range` (either orientation), about `desired` of them.
///
/// At most `4 * desired + 1` ticks are returned. Ranges whose span overflows
/// yield none, and ranges too narrow for their magnitude collapse to the
/// distinct values `f64` can represent.
pub fn nice_ticks(range: AxisRange, desired: usize) -> Vec<f64> {
    let desired = desired.max(1);
    let lo = range.min.min(range.max);
    let hi = range.min.max(range.max);
    let span = hi - lo;
    if !span.is_finite() || span <= 0.0 {
        return Vec::new();
    }
    let step = nice_round_length(span / desired as f64);

    let first = (lo / step).ceil();
    let last = (hi / step + 1e-9).floor();
    if !(last >= first) {
        return Vec::new();
    }
    let count = ((last - first) as usize).min(desired * 4);

    let mut ticks: Vec<f64> = (0..=count).map(|k| (first + k as f64) * step).collect();
    ticks.dedup();
    ticks
}

/// Compact tick label: integers plainly, large values with k/M suffixes.
pub fn format_tick(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude >= 1e6 {
        format!("{:.1}M", value / 1e6)
    } else if magnitude >= 1e4 {
        format!("{:.1}k", value / 1e3)
    } else if (value - value.round()).abs() < 1e-9 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}
