/*!
# SeqWalk Headless Renderer

A [`RenderBridge`](seqwalk_core::RenderBridge) implementation that keeps the
walked path in memory and exports it to files.

## Outputs

- **SVG**: background, title, axes with nice ticks, the path as polyline
  and/or colored markers, provenance footer
- **PNG** (feature `raster`): the same scene rasterized on the CPU, without text
*/

use anyhow::{bail, Result};
use std::path::Path;

pub mod canvas;
#[cfg(feature = "raster")]
pub mod raster;
pub mod vector_export;
pub mod viewport;

pub use canvas::{auto_range, PlotCanvas};
#[cfg(feature = "raster")]
pub use raster::RasterExporter;
pub use vector_export::{ExportConfig, SvgExporter};
pub use viewport::Viewport;

/// File format picked from an output path's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Svg,
    Png,
}

impl ExportFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("svg") => Ok(ExportFormat::Svg),
            Some("png") => Ok(ExportFormat::Png),
            Some(other) => bail!("Unsupported export format '.{}' (expected .svg or .png)", other),
            None => bail!("Cannot infer export format of {} (expected .svg or .png)", path.display()),
        }
    }
}

/// Writes `canvas` to `path` in the format its extension names.
pub fn export<P: AsRef<Path>>(path: P, canvas: &PlotCanvas, config: &ExportConfig) -> Result<()> {
    let path = path.as_ref();
    match ExportFormat::from_path(path)? {
        ExportFormat::Svg => SvgExporter::new(config.clone()).export_svg(path, canvas),
        #[cfg(feature = "raster")]
        ExportFormat::Png => RasterExporter::new(config.clone()).export_png(path, canvas),
        #[cfg(not(feature = "raster"))]
        ExportFormat::Png => bail!("PNG export requires the 'raster' feature"),
    }
}
