//! In-memory plot state behind the [`RenderBridge`] interface.

use seqwalk_core::{AppliedEdit, AxisRange, CosmeticEdit, PlotStyle, RenderBridge, Rgb};

/// Relative padding added around the data on each axis.
const AUTO_PADDING: f64 = 0.05;

/// Headless renderer: keeps copies of the latest pushed path so it can be
/// restyled and exported after a run.
#[derive(Debug, Clone, Default)]
pub struct PlotCanvas {
    style: PlotStyle,
    x: Vec<i64>,
    y: Vec<i64>,
    colors: Option<Vec<Rgb>>,
    revision: Option<u64>,
    updates: u64,
    marker_size: Option<u32>,
    x_range: Option<AxisRange>,
    y_range: Option<AxisRange>,
}

impl PlotCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn style(&self) -> &PlotStyle {
        &self.style
    }

    pub fn x(&self) -> &[i64] {
        &self.x
    }

    pub fn y(&self) -> &[i64] {
        &self.y
    }

    pub fn points(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Marker colors, present only once a run with color enabled has finished.
    pub fn colors(&self) -> Option<&[Rgb]> {
        self.colors.as_deref()
    }

    /// Revision of the latest update, `None` before the first one.
    pub fn revision(&self) -> Option<u64> {
        self.revision
    }

    /// Number of updates received since the last `init_plot`.
    pub fn updates(&self) -> u64 {
        self.updates
    }

    /// Marker size in effect: the user's edit, or the run's point size.
    pub fn marker_size(&self) -> u32 {
        self.marker_size.unwrap_or(self.style.point_size)
    }

    /// Color of point `i`, black when no colors were set.
    pub fn point_color(&self, i: usize) -> Rgb {
        self.colors
            .as_ref()
            .and_then(|c| c.get(i).copied())
            .unwrap_or(Rgb::BLACK)
    }

    pub fn x_range(&self) -> AxisRange {
        self.x_range.unwrap_or_else(|| auto_range(&self.x))
    }

    pub fn y_range(&self) -> AxisRange {
        self.y_range.unwrap_or_else(|| auto_range(&self.y))
    }

    fn apply_range(slot: &mut Option<AxisRange>, range: Option<AxisRange>, axis: &str) {
        match range {
            Some(r) if r.is_usable() => *slot = Some(r),
            Some(r) => log::warn!("Ignoring unusable {} range [{}, {}]", axis, r.min, r.max),
            None => {}
        }
    }
}

/// Data extent with padding; a single value gets a span of at least 1 and an
/// empty series maps to `[-1, 1]`.
pub fn auto_range(values: &[i64]) -> AxisRange {
    let (min, max) = match (values.iter().min(), values.iter().max()) {
        (Some(&min), Some(&max)) => (min as f64, max as f64),
        _ => return AxisRange::new(-1.0, 1.0),
    };

    let span = (max - min).max(1.0);
    let center = (min + max) / 2.0;
    let half = span * (0.5 + AUTO_PADDING);
    AxisRange::new(center - half, center + half)
}

impl RenderBridge for PlotCanvas {
    fn init_plot(&mut self, style: &PlotStyle) {
        log::debug!("Init plot: mode={} size={}", style.mode, style.point_size);
        *self = Self {
            style: *style,
            ..Self::default()
        };
    }

    fn update_plot(&mut self, x: &[i64], y: &[i64], revision: u64) {
        if let Some(previous) = self.revision {
            if revision <= previous {
                log::warn!("Update revision {} does not follow {}", revision, previous);
            }
        }
        self.x.clear();
        self.x.extend_from_slice(x);
        self.y.clear();
        self.y.extend_from_slice(y);
        self.revision = Some(revision);
        self.updates += 1;
    }

    fn set_colors(&mut self, colors: &[Rgb]) {
        if colors.len() != self.x.len() {
            log::warn!("Got {} colors for {} points", colors.len(), self.x.len());
        }
        self.colors = Some(colors.to_vec());
    }

    fn apply_cosmetic_edit(&mut self, edit: &CosmeticEdit) -> AppliedEdit {
        match edit.marker_size {
            Some(0) => log::warn!("Ignoring marker size 0"),
            Some(size) => self.marker_size = Some(size),
            None => {}
        }
        Self::apply_range(&mut self.x_range, edit.x_range, "x");
        Self::apply_range(&mut self.y_range, edit.y_range, "y");
        self.layout()
    }

    fn layout(&self) -> AppliedEdit {
        AppliedEdit {
            marker_size: self.marker_size(),
            x_range: self.x_range(),
            y_range: self.y_range(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seqwalk_core::PlotMode;

    fn drawn() -> PlotCanvas {
        let mut canvas = PlotCanvas::new();
        canvas.init_plot(&PlotStyle { mode: PlotMode::Markers, point_size: 3 });
        canvas.update_plot(&[0, 1, 1, 0], &[1, 1, 0, 0], 0);
        canvas
    }

    #[test]
    fn test_update_replaces_snapshot() {
        let mut canvas = drawn();
        canvas.update_plot(&[0, 1, 1, 0, 5], &[1, 1, 0, 0, 5], 1);
        assert_eq!(canvas.len(), 5);
        assert_eq!(canvas.revision(), Some(1));
        assert_eq!(canvas.updates(), 2);
    }

    #[test]
    fn test_init_clears_previous_plot() {
        let mut canvas = drawn();
        canvas.set_colors(&[Rgb::WHITE; 4]);
        canvas.apply_cosmetic_edit(&CosmeticEdit { marker_size: Some(9), ..Default::default() });

        canvas.init_plot(&PlotStyle::default());
        assert!(canvas.is_empty());
        assert!(canvas.colors().is_none());
        assert_eq!(canvas.revision(), None);
        assert_eq!(canvas.marker_size(), 2);
    }

    #[test]
    fn test_auto_range() {
        let r = auto_range(&[0, 10]);
        assert!((r.min - -0.5).abs() < 1e-9 && (r.max - 10.5).abs() < 1e-9);

        let single = auto_range(&[4]);
        assert!((single.span() - 1.1).abs() < 1e-9);

        assert_eq!(auto_range(&[]), AxisRange::new(-1.0, 1.0));
    }

    #[test]
    fn test_cosmetic_edit_keeps_path() {
        let mut canvas = drawn();
        let applied = canvas.apply_cosmetic_edit(&CosmeticEdit {
            marker_size: Some(8),
            x_range: Some(AxisRange::new(-5.0, 5.0)),
            y_range: None,
        });
        assert_eq!(applied.marker_size, 8);
        assert_eq!(applied.x_range, AxisRange::new(-5.0, 5.0));
        assert_eq!(applied.y_range, auto_range(&[1, 1, 0, 0]));
        assert_eq!(canvas.x(), &[0, 1, 1, 0]);
        assert_eq!(canvas.revision(), Some(0));
    }

    #[test]
    fn test_degenerate_range_is_ignored() {
        let mut canvas = drawn();
        canvas.apply_cosmetic_edit(&CosmeticEdit { y_range: Some(AxisRange::new(0.0, 100.0)), ..Default::default() });
        let applied = canvas.apply_cosmetic_edit(&CosmeticEdit {
            y_range: Some(AxisRange::new(3.0, 3.0)),
            marker_size: Some(0),
            ..Default::default()
        });
        assert_eq!(applied.y_range, AxisRange::new(0.0, 100.0));
        assert_eq!(applied.marker_size, 3);
    }

    #[test]
    fn test_overflowing_range_is_ignored() {
        let mut canvas = drawn();
        let before = canvas.layout();
        let applied = canvas.apply_cosmetic_edit(&CosmeticEdit {
            x_range: Some(AxisRange::new(-1e308, 1e308)),
            ..Default::default()
        });
        assert_eq!(applied.x_range, before.x_range);
    }

    #[test]
    fn test_point_color_defaults_to_black() {
        let mut canvas = drawn();
        assert_eq!(canvas.point_color(0), Rgb::BLACK);
        canvas.set_colors(&[Rgb::WHITE, Rgb::new(1, 2, 3)]);
        assert_eq!(canvas.point_color(1), Rgb::new(1, 2, 3));
        assert_eq!(canvas.point_color(3), Rgb::BLACK);
    }
}
