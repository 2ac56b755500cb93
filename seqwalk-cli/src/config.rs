//! Configuration handling for the SeqWalk CLI
//!
//! Supports loading configuration from seqwalk.toml files with CLI argument overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use seqwalk_core::{RawRule, RawSettings, Symbol};
use seqwalk_render::ExportConfig;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub rules: RulesConfig,
    pub plot: PlotConfig,
    pub export: ExportSection,
}

/// Per-symbol overrides; unset fields keep the built-in rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl RuleConfig {
    fn apply(&self, rule: &mut RawRule) {
        if let Some(direction) = &self.direction {
            rule.direction = direction.clone();
        }
        if let Some(color) = &self.color {
            rule.color = color.clone();
        }
    }
}

impl From<&RawRule> for RuleConfig {
    fn from(rule: &RawRule) -> Self {
        Self {
            direction: Some(rule.direction.clone()),
            color: Some(rule.color.clone()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub a: RuleConfig,
    pub t: RuleConfig,
    pub g: RuleConfig,
    pub c: RuleConfig,
    pub x: RuleConfig,
}

impl RulesConfig {
    pub fn get(&self, symbol: Symbol) -> &RuleConfig {
        match symbol {
            Symbol::A => &self.a,
            Symbol::T => &self.t,
            Symbol::G => &self.g,
            Symbol::C => &self.c,
            Symbol::Other => &self.x,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotConfig {
    /// "lines", "markers" or "lines+markers"
    #[serde(default = "default_mode")]
    pub mode: String,

    /// Marker size and line width
    #[serde(default = "default_point_size")]
    pub point_size: u32,

    /// Record every Nth step
    #[serde(default = "default_point_offset")]
    pub point_offset: u64,

    /// Color markers by symbol
    #[serde(default = "default_true")]
    pub color: bool,

    /// Read size per chunk in MB (1 MB = 1,000,000 bytes)
    #[serde(default = "default_chunk_size_mb")]
    pub chunk_size_mb: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSection {
    #[serde(default = "default_width")]
    pub width: u32,

    #[serde(default = "default_height")]
    pub height: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default = "default_background")]
    pub background: String,

    #[serde(default = "default_line_color")]
    pub line_color: String,

    #[serde(default = "default_true")]
    pub show_axes: bool,

    #[serde(default = "default_true")]
    pub show_grid: bool,

    /// Footer with version and generation timestamp
    #[serde(default = "default_true")]
    pub show_footer: bool,
}

// Default value functions
fn default_mode() -> String { RawSettings::default().mode }
fn default_point_size() -> u32 { RawSettings::default().point_size }
fn default_point_offset() -> u64 { 1 }
fn default_true() -> bool { true }
fn default_chunk_size_mb() -> u64 { RawSettings::default().chunk_size_mb }
fn default_width() -> u32 { ExportConfig::default().width }
fn default_height() -> u32 { ExportConfig::default().height }
fn default_background() -> String { ExportConfig::default().background_color }
fn default_line_color() -> String { ExportConfig::default().line_color }

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            point_size: default_point_size(),
            point_offset: default_point_offset(),
            color: true,
            chunk_size_mb: default_chunk_size_mb(),
        }
    }
}

impl Default for ExportSection {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            title: None,
            background: default_background(),
            line_color: default_line_color(),
            show_axes: true,
            show_grid: true,
            show_footer: true,
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => {
                log::info!("Loading configuration from: {}", path.display());
                Self::load_from_file(path)?
            }
            None => {
                let default_path = PathBuf::from("seqwalk.toml");
                if default_path.exists() {
                    log::info!("Loading configuration from: seqwalk.toml");
                    Self::load_from_file(&default_path)?
                } else {
                    log::debug!("Using default configuration");
                    Self::default()
                }
            }
        };

        Ok(config)
    }

    /// Load configuration from a specific TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse configuration file: {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write configuration file: {}", path.display()))?;

        Ok(())
    }

    /// Example configuration with every built-in value spelled out
    pub fn example_toml() -> Result<String> {
        let defaults = RawSettings::default();
        let config = Self {
            rules: RulesConfig {
                a: (&defaults.rules.a).into(),
                t: (&defaults.rules.t).into(),
                g: (&defaults.rules.g).into(),
                c: (&defaults.rules.c).into(),
                x: (&defaults.rules.x).into(),
            },
            ..Self::default()
        };
        toml::to_string_pretty(&config).context("Failed to serialize default configuration")
    }

    /// Settings for the resolver, before command line overrides.
    pub fn raw_settings(&self) -> RawSettings {
        let mut raw = RawSettings::default();
        for symbol in Symbol::ALL {
            self.rules.get(symbol).apply(raw.rules.get_mut(symbol));
        }
        raw.mode = self.plot.mode.clone();
        raw.point_size = self.plot.point_size;
        raw.point_offset = self.plot.point_offset;
        raw.color_enabled = self.plot.color;
        raw.chunk_size_mb = self.plot.chunk_size_mb;
        raw
    }

    pub fn export_config(&self) -> ExportConfig {
        ExportConfig {
            width: self.export.width,
            height: self.export.height,
            title: self.export.title.clone(),
            background_color: self.export.background.clone(),
            line_color: self.export.line_color.clone(),
            show_axes: self.export.show_axes,
            show_grid: self.export.show_grid,
            show_footer: self.export.show_footer,
            ..ExportConfig::default()
        }
    }
}
