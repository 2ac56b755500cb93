#![allow(dead_code)]

use seqwalk_core::{AppliedEdit, AxisRange, CosmeticEdit, PlotStyle, RenderBridge, Rgb};

/// Renderer double that records every call.
#[derive(Debug, Default)]
pub struct RecordingBridge {
    pub inits: Vec<PlotStyle>,
    pub revisions: Vec<u64>,
    pub x: Vec<i64>,
    pub y: Vec<i64>,
    pub point_counts: Vec<usize>,
    pub colors: Vec<Vec<Rgb>>,
    pub edits: Vec<CosmeticEdit>,
}

impl RenderBridge for RecordingBridge {
    fn init_plot(&mut self, style: &PlotStyle) {
        self.inits.push(*style);
        self.x.clear();
        self.y.clear();
    }

    fn update_plot(&mut self, x: &[i64], y: &[i64], revision: u64) {
        self.x = x.to_vec();
        self.y = y.to_vec();
        self.point_counts.push(x.len());
        self.revisions.push(revision);
    }

    fn set_colors(&mut self, colors: &[Rgb]) {
        self.colors.push(colors.to_vec());
    }

    fn apply_cosmetic_edit(&mut self, edit: &CosmeticEdit) -> AppliedEdit {
        self.edits.push(*edit);
        self.layout()
    }

    fn layout(&self) -> AppliedEdit {
        AppliedEdit {
            marker_size: 1,
            x_range: AxisRange::new(-1.0, 1.0),
            y_range: AxisRange::new(-1.0, 1.0),
        }
    }
}
