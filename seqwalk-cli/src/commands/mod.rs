//! Command implementations for the SeqWalk CLI

pub mod config;
pub mod plot;
pub mod session;

use indicatif::{ProgressBar, ProgressStyle};
use seqwalk_core::{Direction, Progress, RawSettings, RunConfig, Symbol};
use seqwalk_render::ExportConfig;

use crate::config::Config;
use crate::error::{CliError, CliResult};
use crate::PlotOverrides;

/// Applies command line overrides to resolver input.
pub fn apply_overrides(raw: &mut RawSettings, overrides: &PlotOverrides) -> CliResult<()> {
    if let Some(mode) = &overrides.mode {
        raw.mode = mode.clone();
    }
    if let Some(offset) = overrides.offset {
        raw.point_offset = offset;
    }
    if let Some(size) = overrides.size {
        raw.point_size = size;
    }
    if let Some(mb) = overrides.chunk_size_mb {
        raw.chunk_size_mb = mb;
        raw.chunk_size_bytes = None;
    }
    if overrides.no_color {
        raw.color_enabled = false;
    }

    let rules = [
        (Symbol::A, &overrides.rule_a),
        (Symbol::T, &overrides.rule_t),
        (Symbol::G, &overrides.rule_g),
        (Symbol::C, &overrides.rule_c),
        (Symbol::Other, &overrides.rule_x),
    ];
    for (symbol, spec) in rules {
        if let Some(spec) = spec {
            apply_rule_spec(raw, symbol, spec)?;
        }
    }
    Ok(())
}

/// `DIR` or `DIR:#rrggbb`. Directions given on the command line are checked
/// strictly rather than falling back to `none`.
fn apply_rule_spec(raw: &mut RawSettings, symbol: Symbol, spec: &str) -> CliResult<()> {
    let (direction, color) = match spec.split_once(':') {
        Some((direction, color)) => (direction, Some(color)),
        None => (spec, None),
    };
    let field = format!("--{}", symbol.key());
    direction
        .parse::<Direction>()
        .map_err(|_| CliError::invalid_setting(field.clone(), format!("unknown direction '{}'", direction)))?;

    let rule = raw.rules.get_mut(symbol);
    rule.direction = direction.to_string();
    if let Some(color) = color {
        rule.color = color.to_string();
    }
    Ok(())
}

/// Export settings from the configuration file with command line overrides.
pub fn export_config(config: &Config, overrides: &PlotOverrides) -> ExportConfig {
    let mut export = config.export_config();
    if let Some(title) = &overrides.title {
        export.title = Some(title.clone());
    }
    if let Some(width) = overrides.width {
        export.width = width;
    }
    if let Some(height) = overrides.height {
        export.height = height;
    }
    export
}

/// One-line description of a run for export provenance.
pub fn provenance(run: &RunConfig) -> String {
    format!(
        "seqwalk {} | input {} ({} bytes) | mode {} | offset {} | chunk {} bytes | color {}",
        seqwalk_core::VERSION,
        run.input.name,
        run.input.size,
        run.style.mode,
        run.point_offset,
        run.chunk_size_bytes,
        if run.color_enabled { "on" } else { "off" }
    )
}

pub fn progress_bar(quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(0);
    let style = ProgressStyle::with_template("  [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} {msg}")
        .map(|s| s.progress_chars("#>-"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb
}

pub fn report_progress(pb: &ProgressBar, progress: Progress) {
    pb.set_length(progress.total_bytes);
    pb.set_position(progress.bytes_processed);
    pb.set_message(progress.percent_label());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_override_with_color() {
        let mut raw = RawSettings::default();
        let overrides = PlotOverrides {
            rule_g: Some("ne:#123456".into()),
            rule_x: Some("S".into()),
            offset: Some(7),
            no_color: true,
            ..Default::default()
        };
        apply_overrides(&mut raw, &overrides).unwrap();

        assert_eq!(raw.rules.g.direction, "ne");
        assert_eq!(raw.rules.g.color, "#123456");
        assert_eq!(raw.rules.x.direction, "S");
        assert_eq!(raw.rules.x.color, RawSettings::default().rules.x.color);
        assert_eq!(raw.point_offset, 7);
        assert!(!raw.color_enabled);
    }

    #[test]
    fn test_rule_override_rejects_unknown_direction() {
        let mut raw = RawSettings::default();
        let overrides = PlotOverrides {
            rule_a: Some("up".into()),
            ..Default::default()
        };
        let err = apply_overrides(&mut raw, &overrides).unwrap_err();
        assert!(matches!(err, CliError::InvalidSetting { ref field, .. } if field == "--a"));
    }

    #[test]
    fn test_export_overrides() {
        let overrides = PlotOverrides {
            title: Some("walk".into()),
            width: Some(640),
            ..Default::default()
        };
        let export = export_config(&Config::default(), &overrides);
        assert_eq!(export.title.as_deref(), Some("walk"));
        assert_eq!(export.width, 640);
        assert_eq!(export.height, 800);
    }
}
