//! Settings resolution
//!
//! User-facing inputs arrive as [`RawSettings`] (strings and numbers, as typed
//! in a config file or an interactive session). [`resolve`] validates them into
//! an immutable [`RunConfig`] for one run, and [`unchanged`] compares two runs
//! to decide whether a repeat needs confirmation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{WalkError, WalkResult};
use crate::rules::{RuleTable, SymbolRule};
use crate::types::{Direction, Rgb, Symbol};

/// 1 MB as used for the chunk size setting.
pub const BYTES_PER_MB: u64 = 1_000_000;

/// How the path is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlotMode {
    #[default]
    Lines,
    Markers,
    LinesMarkers,
}

impl PlotMode {
    pub fn draws_lines(self) -> bool {
        matches!(self, PlotMode::Lines | PlotMode::LinesMarkers)
    }

    pub fn draws_markers(self) -> bool {
        matches!(self, PlotMode::Markers | PlotMode::LinesMarkers)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PlotMode::Lines => "lines",
            PlotMode::Markers => "markers",
            PlotMode::LinesMarkers => "lines+markers",
        }
    }
}

impl FromStr for PlotMode {
    type Err = WalkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lines" | "line" => Ok(PlotMode::Lines),
            "markers" | "points" => Ok(PlotMode::Markers),
            "lines+markers" | "both" => Ok(PlotMode::LinesMarkers),
            other => Err(WalkError::invalid_setting(
                "mode",
                format!("unknown plot mode '{}' (expected lines, markers or lines+markers)", other),
            )),
        }
    }
}

impl fmt::Display for PlotMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlotStyle {
    pub mode: PlotMode,
    /// Marker size and line width.
    pub point_size: u32,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            mode: PlotMode::default(),
            point_size: 2,
        }
    }
}

/// Identity of the input being walked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSource {
    pub name: String,
    pub path: PathBuf,
    pub size: u64,
}

impl InputSource {
    pub fn new<N: Into<String>, P: Into<PathBuf>>(name: N, path: P, size: u64) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            size,
        }
    }

    /// Reads name and size from the file system. Nothing is read from the file.
    pub fn from_path(path: &Path) -> WalkResult<Self> {
        let size = std::fs::metadata(path)?.len();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, path, size))
    }
}

/// Immutable configuration for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    pub rules: RuleTable,
    pub style: PlotStyle,
    /// Record every Nth step; always at least 1.
    pub point_offset: u64,
    pub color_enabled: bool,
    /// Always greater than zero.
    pub chunk_size_bytes: u64,
    pub input: InputSource,
}

/// Same settings and same input name as the previous run.
pub fn unchanged(previous: &RunConfig, current: &RunConfig) -> bool {
    previous == current && previous.input.name == current.input.name
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRule {
    pub direction: String,
    pub color: String,
}

impl RawRule {
    fn resolve(&self, symbol: Symbol) -> WalkResult<SymbolRule> {
        let color = Rgb::from_hex(&self.color).map_err(|_| {
            WalkError::invalid_setting(
                format!("{}.color", symbol.key()),
                format!("'{}' is not a #rrggbb color", self.color),
            )
        })?;
        Ok(SymbolRule::new(Direction::parse_lenient(&self.direction), color))
    }
}

impl From<&SymbolRule> for RawRule {
    fn from(rule: &SymbolRule) -> Self {
        Self {
            direction: rule.direction.to_string(),
            color: rule.color.to_hex(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRules {
    pub a: RawRule,
    pub t: RawRule,
    pub g: RawRule,
    pub c: RawRule,
    pub x: RawRule,
}

impl Default for RawRules {
    fn default() -> Self {
        let table = RuleTable::default();
        Self {
            a: (&table.a).into(),
            t: (&table.t).into(),
            g: (&table.g).into(),
            c: (&table.c).into(),
            x: (&table.x).into(),
        }
    }
}

impl RawRules {
    pub fn get_mut(&mut self, symbol: Symbol) -> &mut RawRule {
        match symbol {
            Symbol::A => &mut self.a,
            Symbol::T => &mut self.t,
            Symbol::G => &mut self.g,
            Symbol::C => &mut self.c,
            Symbol::Other => &mut self.x,
        }
    }

    fn resolve(&self) -> WalkResult<RuleTable> {
        Ok(RuleTable {
            a: self.a.resolve(Symbol::A)?,
            t: self.t.resolve(Symbol::T)?,
            g: self.g.resolve(Symbol::G)?,
            c: self.c.resolve(Symbol::C)?,
            x: self.x.resolve(Symbol::Other)?,
        })
    }
}

/// Settings as the user entered them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawSettings {
    pub rules: RawRules,
    pub mode: String,
    pub point_offset: u64,
    pub point_size: u32,
    pub color_enabled: bool,
    /// Chunk size in megabytes (1 MB = 1,000,000 bytes).
    pub chunk_size_mb: u64,
    /// Exact chunk size in bytes; takes precedence over `chunk_size_mb`.
    pub chunk_size_bytes: Option<u64>,
    pub input: Option<PathBuf>,
}

impl Default for RawSettings {
    fn default() -> Self {
        Self {
            rules: RawRules::default(),
            mode: PlotMode::default().to_string(),
            point_offset: 1,
            point_size: PlotStyle::default().point_size,
            color_enabled: true,
            chunk_size_mb: 10,
            chunk_size_bytes: None,
            input: None,
        }
    }
}

impl RawSettings {
    /// Sets one setting by key, as typed in an interactive session.
    ///
    /// Keys: `a.dir`, `a.color` (likewise `t`, `g`, `c`, `x`), `mode`, `offset`,
    /// `size`, `color`, `chunk` (MB), `chunk-bytes`, `input`.
    pub fn set(&mut self, key: &str, value: &str) -> WalkResult<()> {
        let value = value.trim();
        let key = key.trim().to_ascii_lowercase();

        if let Some((symbol, field)) = key.split_once('.') {
            let symbol: Symbol = symbol.parse()?;
            let rule = self.rules.get_mut(symbol);
            match field {
                "dir" | "direction" => rule.direction = value.to_string(),
                "col" | "color" => rule.color = value.to_string(),
                other => {
                    return Err(WalkError::invalid_setting(key.clone(), format!("unknown rule field '{}'", other)))
                }
            }
            return Ok(());
        }

        match key.as_str() {
            "mode" => self.mode = value.to_string(),
            "offset" | "point_offset" => self.point_offset = parse_number(&key, value)?,
            "size" | "point_size" => self.point_size = parse_number(&key, value)?,
            "color" | "color_enabled" => self.color_enabled = parse_flag(&key, value)?,
            "chunk" | "chunk_size_mb" => {
                self.chunk_size_mb = parse_number(&key, value)?;
                self.chunk_size_bytes = None;
            }
            "chunk-bytes" | "chunk_size_bytes" => self.chunk_size_bytes = Some(parse_number(&key, value)?),
            "input" | "file" => self.input = Some(PathBuf::from(value)),
            other => return Err(WalkError::invalid_setting(other, "unknown setting")),
        }
        Ok(())
    }
}

fn parse_number<T: FromStr>(key: &str, value: &str) -> WalkResult<T> {
    value
        .parse()
        .map_err(|_| WalkError::invalid_setting(key, format!("'{}' is not a valid number", value)))
}

fn parse_flag(key: &str, value: &str) -> WalkResult<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        _ => Err(WalkError::invalid_setting(key, format!("'{}' is not on/off", value))),
    }
}

/// Resolves user settings into a run configuration.
///
/// Fails with [`WalkError::MissingInput`] before touching the file system if no
/// input was chosen.
pub fn resolve(raw: &RawSettings) -> WalkResult<RunConfig> {
    let path = raw.input.as_deref().ok_or(WalkError::MissingInput)?;
    let input = InputSource::from_path(path)?;
    resolve_with_input(raw, input)
}

/// Like [`resolve`], for inputs that are not files on disk (e.g. stdin).
pub fn resolve_with_input(raw: &RawSettings, input: InputSource) -> WalkResult<RunConfig> {
    let rules = raw.rules.resolve()?;
    let mode: PlotMode = raw.mode.parse()?;

    if raw.point_offset == 0 {
        return Err(WalkError::invalid_setting("point_offset", "must be at least 1"));
    }

    let chunk_size_bytes = match raw.chunk_size_bytes {
        Some(0) => return Err(WalkError::invalid_setting("chunk_size_bytes", "must be greater than zero")),
        Some(bytes) => bytes,
        None if raw.chunk_size_mb == 0 => {
            return Err(WalkError::invalid_setting("chunk_size_mb", "must be greater than zero"))
        }
        None => raw
            .chunk_size_mb
            .checked_mul(BYTES_PER_MB)
            .ok_or_else(|| WalkError::invalid_setting("chunk_size_mb", "value too large"))?,
    };

    Ok(RunConfig {
        rules,
        style: PlotStyle {
            mode,
            point_size: raw.point_size,
        },
        point_offset: raw.point_offset,
        color_enabled: raw.color_enabled,
        chunk_size_bytes,
        input,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn memory_input() -> InputSource {
        InputSource::new("genome.fa", "genome.fa", 100)
    }

    #[test]
    fn test_missing_input() {
        let raw = RawSettings::default();
        assert!(matches!(resolve(&raw), Err(WalkError::MissingInput)));
    }

    #[test]
    fn test_resolve_defaults() {
        let config = resolve_with_input(&RawSettings::default(), memory_input()).unwrap();
        assert_eq!(config.rules, RuleTable::default());
        assert_eq!(config.point_offset, 1);
        assert_eq!(config.chunk_size_bytes, 10 * BYTES_PER_MB);
        assert_eq!(config.style.mode, PlotMode::Lines);
    }

    #[test]
    fn test_resolve_reads_file_size() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, ">x\nACGT\n").unwrap();
        file.as_file().sync_all().unwrap();

        let raw = RawSettings {
            input: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        let config = resolve(&raw).unwrap();
        assert_eq!(config.input.size, 8);
        assert_eq!(config.input.path, file.path());
    }

    #[test]
    fn test_invalid_numbers_rejected() {
        let raw = RawSettings { point_offset: 0, ..Default::default() };
        assert!(matches!(
            resolve_with_input(&raw, memory_input()),
            Err(WalkError::InvalidSetting { ref field, .. }) if field == "point_offset"
        ));

        let raw = RawSettings { chunk_size_mb: 0, ..Default::default() };
        assert!(resolve_with_input(&raw, memory_input()).is_err());

        let raw = RawSettings { chunk_size_bytes: Some(0), ..Default::default() };
        assert!(resolve_with_input(&raw, memory_input()).is_err());
    }

    #[test]
    fn test_chunk_bytes_override() {
        let raw = RawSettings { chunk_size_bytes: Some(64), ..Default::default() };
        assert_eq!(resolve_with_input(&raw, memory_input()).unwrap().chunk_size_bytes, 64);
    }

    #[test]
    fn test_bad_color_names_field() {
        let mut raw = RawSettings::default();
        raw.set("g.color", "#12345").unwrap();
        match resolve_with_input(&raw, memory_input()) {
            Err(WalkError::InvalidSetting { field, .. }) => assert_eq!(field, "g.color"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_unknown_direction_does_not_move() {
        let mut raw = RawSettings::default();
        raw.set("a.dir", "sideways").unwrap();
        let config = resolve_with_input(&raw, memory_input()).unwrap();
        assert_eq!(config.rules.a.direction, Direction::None);
    }

    #[test]
    fn test_set_keys() {
        let mut raw = RawSettings::default();
        raw.set("C.DIR", "ne").unwrap();
        raw.set("mode", "markers").unwrap();
        raw.set("offset", "10").unwrap();
        raw.set("color", "off").unwrap();
        raw.set("chunk", "2").unwrap();
        raw.set("input", "reads.fa").unwrap();

        assert_eq!(raw.rules.c.direction, "ne");
        assert_eq!(raw.mode, "markers");
        assert_eq!(raw.point_offset, 10);
        assert!(!raw.color_enabled);
        assert_eq!(raw.chunk_size_mb, 2);
        assert_eq!(raw.input, Some(PathBuf::from("reads.fa")));

        assert!(raw.set("offset", "ten").is_err());
        assert!(raw.set("z.dir", "N").is_err());
        assert!(raw.set("volume", "11").is_err());
    }

    #[test]
    fn test_unchanged_detection() {
        let raw = RawSettings::default();
        let first = resolve_with_input(&raw, memory_input()).unwrap();
        let second = resolve_with_input(&raw, memory_input()).unwrap();
        assert!(unchanged(&first, &second));

        let mut other_file = memory_input();
        other_file.name = "other.fa".to_string();
        let third = resolve_with_input(&raw, other_file).unwrap();
        assert!(!unchanged(&first, &third));

        let mut tweaked = raw.clone();
        tweaked.set("size", "5").unwrap();
        let fourth = resolve_with_input(&tweaked, memory_input()).unwrap();
        assert!(!unchanged(&first, &fourth));
    }
}
