//! PNG export on the CPU.

use anyhow::{Context, Result};
use image::{Rgba, RgbaImage};
use std::path::Path;

use crate::canvas::PlotCanvas;
use crate::vector_export::ExportConfig;
use crate::viewport::{nice_ticks, Viewport};
use seqwalk_core::Rgb;

const AXIS_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);
const GRID_COLOR: Rgba<u8> = Rgba([225, 225, 225, 255]);

/// Rasterizes a canvas into an RGBA image. Text (title, tick labels, footer)
/// is not drawn.
#[derive(Debug, Clone, Default)]
pub struct RasterExporter {
    config: ExportConfig,
}

impl RasterExporter {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    pub fn render(&self, canvas: &PlotCanvas) -> RgbaImage {
        let background = Rgb::from_hex(&self.config.background_color).unwrap_or_else(|_| {
            log::warn!("Invalid background color '{}', using white", self.config.background_color);
            Rgb::WHITE
        });
        let line = Rgb::from_hex(&self.config.line_color).unwrap_or(Rgb::BLACK);

        let width = self.config.width.max(1);
        let height = self.config.height.max(1);
        let mut img = RgbaImage::from_pixel(width, height, rgba(background));
        let viewport = self.config.viewport(canvas);

        if self.config.show_axes {
            self.draw_axes(&mut img, &viewport);
        }

        // Kept in f64 until clipped; zoomed-in views put points far outside i32.
        let pixels: Vec<(f64, f64)> = canvas
            .points()
            .map(|(x, y)| viewport.world_to_pixel(x as f64, y as f64))
            .collect();
        let clip = Clip::from(&viewport);
        let radius = (canvas.marker_size() / 2).min(i32::MAX as u32) as i32;

        if canvas.style().mode.draws_lines() {
            for pair in pixels.windows(2) {
                if let Some(((x0, y0), (x1, y1))) = clip.segment(pair[0], pair[1]) {
                    draw_line(&mut img, &clip, x0, y0, x1, y1, rgba(line));
                }
            }
        }

        if canvas.style().mode.draws_markers() {
            for (i, &(x, y)) in pixels.iter().enumerate() {
                if clip.near(x, y, radius) {
                    let (x, y) = (x.round() as i32, y.round() as i32);
                    fill_disc(&mut img, &clip, x, y, radius, rgba(canvas.point_color(i)));
                }
            }
        }

        img
    }

    /// Export to PNG format
    pub fn export_png<P: AsRef<Path>>(&self, path: P, canvas: &PlotCanvas) -> Result<()> {
        let path = path.as_ref();
        self.render(canvas)
            .save(path)
            .with_context(|| format!("Failed to write PNG to {}", path.display()))?;
        log::info!("Exported {} points to {}", canvas.len(), path.display());
        Ok(())
    }

    fn draw_axes(&self, img: &mut RgbaImage, viewport: &Viewport) {
        let full = Clip::whole(img);
        let (left, top) = (viewport.left.round() as i32, viewport.top.round() as i32);
        let (right, bottom) = (viewport.right.round() as i32, viewport.bottom.round() as i32);

        for w in nice_ticks(viewport.x_range, 6) {
            let x = viewport.world_to_pixel(w, viewport.y_range.min).0.round() as i32;
            if self.config.show_grid {
                draw_line(img, &full, x, top, x, bottom, GRID_COLOR);
            }
            draw_line(img, &full, x, bottom, x, bottom + 5, AXIS_COLOR);
        }
        for w in nice_ticks(viewport.y_range, 6) {
            let y = viewport.world_to_pixel(viewport.x_range.min, w).1.round() as i32;
            if self.config.show_grid {
                draw_line(img, &full, left, y, right, y, GRID_COLOR);
            }
            draw_line(img, &full, left - 5, y, left, y, AXIS_COLOR);
        }

        draw_line(img, &full, left, bottom, right, bottom, AXIS_COLOR);
        draw_line(img, &full, left, top, left, bottom, AXIS_COLOR);
    }
}

fn rgba(color: Rgb) -> Rgba<u8> {
    Rgba([color.r, color.g, color.b, 255])
}

/// Inclusive pixel rectangle that drawing is limited to.
struct Clip {
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
}

impl Clip {
    fn whole(img: &RgbaImage) -> Self {
        Self { x0: 0, y0: 0, x1: img.width() as i32 - 1, y1: img.height() as i32 - 1 }
    }

    fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1
    }

    /// Whether a disc of `radius` around `(x, y)` can touch the rectangle.
    /// False for non-finite positions.
    fn near(&self, x: f64, y: f64, radius: i32) -> bool {
        let r = radius as f64;
        x >= self.x0 as f64 - r && x <= self.x1 as f64 + r && y >= self.y0 as f64 - r && y <= self.y1 as f64 + r
    }

    /// Liang-Barsky clipping of a segment to the rectangle, rounded to pixels.
    /// `None` when the segment misses the rectangle or is not finite.
    fn segment(&self, (x0, y0): (f64, f64), (x1, y1): (f64, f64)) -> Option<((i32, i32), (i32, i32))> {
        let (dx, dy) = (x1 - x0, y1 - y0);
        if ![x0, y0, dx, dy].iter().all(|v| v.is_finite()) {
            return None;
        }

        let (mut t0, mut t1) = (0.0f64, 1.0f64);
        let edges = [
            (-dx, x0 - self.x0 as f64),
            (dx, self.x1 as f64 - x0),
            (-dy, y0 - self.y0 as f64),
            (dy, self.y1 as f64 - y0),
        ];
        for (p, q) in edges {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
            } else {
                let t = q / p;
                if p < 0.0 {
                    t0 = t0.max(t);
                } else {
                    t1 = t1.min(t);
                }
            }
        }
        if t0 > t1 {
            return None;
        }

        let at = |t: f64| ((x0 + t * dx).round() as i32, (y0 + t * dy).round() as i32);
        Some((at(t0), at(t1)))
    }
}

impl From<&Viewport> for Clip {
    fn from(vp: &Viewport) -> Self {
        Self {
            x0: vp.left.floor() as i32,
            y0: vp.top.floor() as i32,
            x1: vp.right.ceil() as i32,
            y1: vp.bottom.ceil() as i32,
        }
    }
}

fn put(img: &mut RgbaImage, clip: &Clip, x: i32, y: i32, color: Rgba<u8>) {
    if clip.contains(x, y) && x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, color);
    }
}

fn draw_line(img: &mut RgbaImage, clip: &Clip, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba<u8>) {
    // Bresenham line drawing
    let (mut x0, mut y0) = (x0, y0);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        put(img, clip, x0, y0, color);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

fn fill_disc(img: &mut RgbaImage, clip: &Clip, cx: i32, cy: i32, radius: i32, color: Rgba<u8>) {
    let (cx, cy, r) = (cx as i64, cy as i64, radius as i64);
    for y in (cy - r).max(clip.y0 as i64)..=(cy + r).min(clip.y1 as i64) {
        for x in (cx - r).max(clip.x0 as i64)..=(cx + r).min(clip.x1 as i64) {
            let (dx, dy) = (x - cx, y - cy);
            if dx * dx + dy * dy <= r * r {
                put(img, clip, x as i32, y as i32, color);
            }
        }
    }
}
