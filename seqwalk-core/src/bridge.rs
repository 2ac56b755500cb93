//! Interface to the plot renderer
//!
//! The encoder pushes growing coordinate buffers through a [`RenderBridge`]
//! once per chunk. Renderers receive borrowed slices and copy what they keep;
//! they never mutate the encoder's buffers.

use serde::{Deserialize, Serialize};

use crate::settings::PlotStyle;
use crate::types::Rgb;

/// Inclusive axis range in walk coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Finite, non-empty and with a finite span. `min > max` is allowed and
    /// flips the axis.
    pub fn is_usable(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min != self.max && self.span().is_finite()
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// Post-run restyling request; `None` fields are left as they are.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CosmeticEdit {
    pub marker_size: Option<u32>,
    pub x_range: Option<AxisRange>,
    pub y_range: Option<AxisRange>,
}

/// Layout values in effect after an edit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AppliedEdit {
    pub marker_size: u32,
    pub x_range: AxisRange,
    pub y_range: AxisRange,
}

pub trait RenderBridge {
    /// Clears any previous plot and sets the trace style.
    fn init_plot(&mut self, style: &PlotStyle);

    /// Replaces the plotted path. `revision` increases with every call in a run.
    fn update_plot(&mut self, x: &[i64], y: &[i64], revision: u64);

    /// Per-point marker colors, one per plotted point.
    fn set_colors(&mut self, colors: &[Rgb]);

    /// Restyles the existing plot without recomputing the path.
    fn apply_cosmetic_edit(&mut self, edit: &CosmeticEdit) -> AppliedEdit;

    /// Current marker size and axis ranges.
    fn layout(&self) -> AppliedEdit;
}

impl<B: RenderBridge + ?Sized> RenderBridge for &mut B {
    fn init_plot(&mut self, style: &PlotStyle) {
        (**self).init_plot(style)
    }

    fn update_plot(&mut self, x: &[i64], y: &[i64], revision: u64) {
        (**self).update_plot(x, y, revision)
    }

    fn set_colors(&mut self, colors: &[Rgb]) {
        (**self).set_colors(colors)
    }

    fn apply_cosmetic_edit(&mut self, edit: &CosmeticEdit) -> AppliedEdit {
        (**self).apply_cosmetic_edit(edit)
    }

    fn layout(&self) -> AppliedEdit {
        (**self).layout()
    }
}
