//! SeqWalk Encoding Demo
//!
//! Walks a short FASTA record with the default rules and prints the sampled
//! path, chunk by chunk.

use seqwalk_core::{
    encode_run, AppliedEdit, AxisRange, CosmeticEdit, InputSource, MemorySource, PlotStyle, RawSettings,
    RenderBridge, Rgb, resolve_with_input,
};

/// Prints every update it receives.
struct PrintingBridge;

impl RenderBridge for PrintingBridge {
    fn init_plot(&mut self, style: &PlotStyle) {
        println!("init: mode={} size={}", style.mode, style.point_size);
    }

    fn update_plot(&mut self, x: &[i64], y: &[i64], revision: u64) {
        let tail: Vec<String> = x
            .iter()
            .zip(y)
            .rev()
            .take(3)
            .map(|(x, y)| format!("({}, {})", x, y))
            .collect();
        println!("revision {}: {} points, last {}", revision, x.len(), tail.join(" "));
    }

    fn set_colors(&mut self, colors: &[Rgb]) {
        println!("colors: {} entries, first {}", colors.len(), colors.first().copied().unwrap_or_default());
    }

    fn apply_cosmetic_edit(&mut self, _edit: &CosmeticEdit) -> AppliedEdit {
        self.layout()
    }

    fn layout(&self) -> AppliedEdit {
        AppliedEdit {
            marker_size: 2,
            x_range: AxisRange::new(-10.0, 10.0),
            y_range: AxisRange::new(-10.0, 10.0),
        }
    }
}

fn main() {
    let fasta = ">demo record\nATGCGTACGTTAGC\nccgatNNNacgt\n>second\nAAAATTTT\n";

    let mut raw = RawSettings::default();
    raw.chunk_size_bytes = Some(16);
    raw.point_offset = 2;

    let input = InputSource::new("demo.fa", "demo.fa", fasta.len() as u64);
    let config = match resolve_with_input(&raw, input) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return;
        }
    };

    let source = MemorySource::new("demo.fa", fasta);
    match encode_run(&config, source, &mut PrintingBridge, |p| println!("progress {}", p.percent_label())) {
        Ok(summary) => println!(
            "done: {} symbols, {} points, cursor at ({}, {})",
            summary.symbols(),
            summary.points(),
            summary.state.cursor.x,
            summary.state.cursor.y
        ),
        Err(e) => eprintln!("Error: {}", e),
    }
}
