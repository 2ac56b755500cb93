/*!
# Vector Export

Writes a [`PlotCanvas`] to SVG with background, title, axes, and an optional
provenance footer. Output is deterministic when the footer is disabled.
*/

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::Path;

use crate::canvas::PlotCanvas;
use crate::viewport::{format_tick, nice_ticks, Viewport};

/// Export configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub width: u32,
    pub height: u32,
    pub title: Option<String>,
    pub background_color: String,
    /// Stroke color of the connecting line.
    pub line_color: String,
    pub font_family: String,
    pub font_size: u32,
    pub show_axes: bool,
    pub show_grid: bool,
    /// Version, revision, point count and a generation timestamp.
    pub show_footer: bool,
    pub provenance_comment: Option<String>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
            title: None,
            background_color: "#ffffff".to_string(),
            line_color: "#444444".to_string(),
            font_family: "Arial, sans-serif".to_string(),
            font_size: 12,
            show_axes: true,
            show_grid: true,
            show_footer: true,
            provenance_comment: None,
        }
    }
}

impl ExportConfig {
    /// Plot area for `canvas` on this configuration's canvas size, leaving room
    /// for title, axes and footer.
    pub fn viewport(&self, canvas: &PlotCanvas) -> Viewport {
        let font = self.font_size as f64;
        let top = if self.title.is_some() { font + 24.0 } else { 20.0 };
        let (left, mut bottom) = if self.show_axes { (60.0, 40.0) } else { (20.0, 20.0) };
        if self.show_footer {
            bottom += font + 4.0;
        }
        Viewport::new(canvas.x_range(), canvas.y_range(), self.width, self.height).with_margins(left, top, 20.0, bottom)
    }

    pub(crate) fn footer_text(&self, canvas: &PlotCanvas) -> String {
        format!(
            "SeqWalk v{} | revision {} | {} points | Generated: {}",
            env!("CARGO_PKG_VERSION"),
            canvas.revision().map_or_else(|| "-".to_string(), |r| r.to_string()),
            canvas.len(),
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        )
    }
}

/// SVG writer for plot canvases.
#[derive(Debug, Clone, Default)]
pub struct SvgExporter {
    config: ExportConfig,
}

impl SvgExporter {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Renders the full document.
    pub fn render(&self, canvas: &PlotCanvas) -> String {
        let viewport = self.config.viewport(canvas);
        let mut builder = SvgBuilder::new(&self.config);

        if let Some(comment) = &self.config.provenance_comment {
            builder.add_comment(comment);
        }
        builder.add_background();
        if let Some(title) = &self.config.title {
            builder.add_title(title);
        }
        if self.config.show_axes {
            builder.add_axes(&viewport);
        }
        builder.add_path(canvas, &viewport);
        if self.config.show_footer {
            builder.add_footer(&self.config.footer_text(canvas));
        }
        builder.finish()
    }

    /// Export to SVG format
    pub fn export_svg<P: AsRef<Path>>(&self, path: P, canvas: &PlotCanvas) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.render(canvas)).with_context(|| format!("Failed to write SVG to {}", path.display()))?;
        log::info!("Exported {} points to {}", canvas.len(), path.display());
        Ok(())
    }
}

struct SvgBuilder<'a> {
    config: &'a ExportConfig,
    elements: Vec<String>,
    top_comments: Vec<String>,
    width: f64,
    height: f64,
}

impl<'a> SvgBuilder<'a> {
    fn new(config: &'a ExportConfig) -> Self {
        Self {
            config,
            elements: Vec::new(),
            top_comments: Vec::new(),
            width: config.width as f64,
            height: config.height as f64,
        }
    }

    fn add_comment(&mut self, text: &str) {
        // "--" is not allowed inside XML comments
        self.top_comments.push(text.replace("--", "- -"));
    }

    fn add_background(&mut self) {
        self.elements.push(format!(
            r#"<rect width="{}" height="{}" fill="{}"/>"#,
            self.width, self.height, self.config.background_color
        ));
    }

    fn add_title(&mut self, title: &str) {
        let title_y = self.config.font_size as f64 + 10.0;
        self.elements.push(format!(
            r#"<text x="{}" y="{}" font-family="{}" font-size="{}px" text-anchor="middle" font-weight="bold">{}</text>"#,
            self.width / 2.0,
            title_y,
            self.config.font_family,
            self.config.font_size + 4,
            escape_text(title)
        ));
    }

    fn add_axes(&mut self, viewport: &Viewport) {
        let (left, right, top, bottom) = (viewport.left, viewport.right, viewport.top, viewport.bottom);
        let label_size = self.config.font_size.saturating_sub(2).max(1);

        self.elements.push(format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="black" stroke-width="1"/>"#,
            left, bottom, right, bottom
        ));
        self.elements.push(format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="black" stroke-width="1"/>"#,
            left, top, left, bottom
        ));

        for w in nice_ticks(viewport.x_range, 6) {
            let (x, _) = viewport.world_to_pixel(w, viewport.y_range.min);
            self.elements.push(format!(
                r#"<line x1="{:.2}" y1="{}" x2="{:.2}" y2="{}" stroke="black" stroke-width="1"/>"#,
                x,
                bottom,
                x,
                bottom + 5.0
            ));
            if self.config.show_grid {
                self.elements.push(format!(
                    r##"<line x1="{:.2}" y1="{}" x2="{:.2}" y2="{}" stroke="#cccccc" stroke-width="1" opacity="0.5"/>"##,
                    x, top, x, bottom
                ));
            }
            self.elements.push(format!(
                r#"<text x="{:.2}" y="{}" font-family="{}" font-size="{}px" text-anchor="middle">{}</text>"#,
                x,
                bottom + 16.0,
                self.config.font_family,
                label_size,
                format_tick(w)
            ));
        }

        for w in nice_ticks(viewport.y_range, 6) {
            let (_, y) = viewport.world_to_pixel(viewport.x_range.min, w);
            self.elements.push(format!(
                r#"<line x1="{}" y1="{:.2}" x2="{}" y2="{:.2}" stroke="black" stroke-width="1"/>"#,
                left - 5.0,
                y,
                left,
                y
            ));
            if self.config.show_grid {
                self.elements.push(format!(
                    r##"<line x1="{}" y1="{:.2}" x2="{}" y2="{:.2}" stroke="#cccccc" stroke-width="1" opacity="0.5"/>"##,
                    left, y, right, y
                ));
            }
            self.elements.push(format!(
                r#"<text x="{}" y="{:.2}" font-family="{}" font-size="{}px" text-anchor="end" dominant-baseline="middle">{}</text>"#,
                left - 8.0,
                y,
                self.config.font_family,
                label_size,
                format_tick(w)
            ));
        }
    }

    fn add_path(&mut self, canvas: &PlotCanvas, viewport: &Viewport) {
        if canvas.is_empty() {
            return;
        }
        let size = canvas.marker_size() as f64;

        self.elements.push(format!(
            r#"<defs><clipPath id="plot-area"><rect x="{}" y="{}" width="{}" height="{}"/></clipPath></defs>"#,
            viewport.left,
            viewport.top,
            viewport.plot_width(),
            viewport.plot_height()
        ));
        self.elements.push(r#"<g clip-path="url(#plot-area)">"#.to_string());

        let pixels: Vec<(f64, f64)> = canvas
            .points()
            .map(|(x, y)| viewport.world_to_pixel(x as f64, y as f64))
            .collect();

        if canvas.style().mode.draws_lines() && pixels.len() > 1 {
            let mut points = String::new();
            for (i, (x, y)) in pixels.iter().enumerate() {
                if i > 0 {
                    points.push(' ');
                }
                let _ = write!(points, "{:.2},{:.2}", x, y);
            }
            self.elements.push(format!(
                r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="{}" stroke-linejoin="round"/>"#,
                points, self.config.line_color, size
            ));
        }

        if canvas.style().mode.draws_markers() {
            let radius = (size / 2.0).max(0.5);
            for (i, (x, y)) in pixels.iter().enumerate() {
                self.elements.push(format!(
                    r#"<circle cx="{:.2}" cy="{:.2}" r="{}" fill="{}"/>"#,
                    x,
                    y,
                    radius,
                    canvas.point_color(i).to_hex()
                ));
            }
        }

        self.elements.push("</g>".to_string());
    }

    fn add_footer(&mut self, text: &str) {
        self.elements.push(format!(
            r#"<text x="10" y="{}" font-family="{}" font-size="{}px" fill="gray">{}</text>"#,
            self.height - 6.0,
            self.config.font_family,
            self.config.font_size.saturating_sub(2).max(1),
            escape_text(text)
        ));
    }

    fn finish(self) -> String {
        let mut out = String::new();
        out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        out.push_str(&format!(
            "<svg width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
            self.width, self.height, self.width, self.height
        ));
        for comment in &self.top_comments {
            for line in comment.lines() {
                out.push_str(&format!("  <!-- {} -->\n", line));
            }
        }
        for element in &self.elements {
            out.push_str("  ");
            out.push_str(element);
            out.push('\n');
        }
        out.push_str("</svg>\n");
        out
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use seqwalk_core::{AxisRange, CosmeticEdit, PlotMode, PlotStyle, RenderBridge, Rgb};

    fn canvas(mode: PlotMode) -> PlotCanvas {
        let mut canvas = PlotCanvas::new();
        canvas.init_plot(&PlotStyle { mode, point_size: 2 });
        canvas.update_plot(&[0, 1, 1, 0], &[1, 1, 0, 0], 0);
        canvas
    }

    fn quiet() -> ExportConfig {
        ExportConfig {
            width: 400,
            height: 300,
            show_footer: false,
            ..Default::default()
        }
    }

    #[test]
    fn test_lines_mode_draws_polyline_only() {
        let svg = SvgExporter::new(quiet()).render(&canvas(PlotMode::Lines));
        assert!(svg.contains("<polyline"));
        assert!(!svg.contains("<circle"));
        assert!(svg.starts_with("<?xml"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_markers_use_point_colors() {
        let mut canvas = canvas(PlotMode::Markers);
        canvas.set_colors(&[Rgb::new(255, 0, 0), Rgb::BLACK, Rgb::BLACK, Rgb::BLACK]);
        let svg = SvgExporter::new(quiet()).render(&canvas);
        assert!(!svg.contains("<polyline"));
        assert_eq!(svg.matches("<circle").count(), 4);
        assert!(svg.contains(r##"fill="#ff0000""##));
    }

    #[test]
    fn test_title_is_escaped() {
        let cfg = ExportConfig { title: Some("A & <B>".into()), ..quiet() };
        let svg = SvgExporter::new(cfg).render(&canvas(PlotMode::Lines));
        assert!(svg.contains("A &amp; &lt;B&gt;"));
    }

    #[test]
    fn test_footer_reports_revision_and_points() {
        let cfg = ExportConfig { show_footer: true, ..quiet() };
        let svg = SvgExporter::new(cfg).render(&canvas(PlotMode::Lines));
        assert!(svg.contains("revision 0 | 4 points"));
    }

    #[test]
    fn test_extreme_axis_edits_still_render() {
        for x_range in [
            AxisRange::new(-1e308, 1e308),
            AxisRange::new(1e17, 100000000000000016.0),
            AxisRange::new(0.0, 1e-6),
        ] {
            let mut canvas = canvas(PlotMode::LinesMarkers);
            canvas.apply_cosmetic_edit(&CosmeticEdit {
                x_range: Some(x_range),
                ..Default::default()
            });
            let svg = SvgExporter::new(quiet()).render(&canvas);
            assert!(svg.trim_end().ends_with("</svg>"));
            // two axis lines plus a tick and a grid line per tick, at most 25 ticks per axis
            assert!(svg.matches("<line").count() <= 2 + 2 * 2 * 25);
        }
    }

    #[test]
    fn test_empty_canvas_renders_axes_only() {
        let svg = SvgExporter::new(quiet()).render(&PlotCanvas::new());
        assert!(!svg.contains("plot-area"));
        assert!(svg.contains("<line"));
    }
}
