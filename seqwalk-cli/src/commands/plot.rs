//! Plot command implementation - walk one input and export the result

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use seqwalk_core::{
    encode_run, resolve, resolve_with_input, AppliedEdit, ChunkSource, FileSource, InputSource, PathBuffers,
    RenderBridge, RunConfig, RunSummary,
};
use seqwalk_render::PlotCanvas;

use super::{apply_overrides, export_config, progress_bar, provenance, report_progress};
use crate::config::Config;
use crate::error::CliError;
use crate::PlotOverrides;

/// Run summary, printed after a run and written with `--json`.
#[derive(Debug, Serialize)]
pub struct PlotReport {
    pub input: String,
    pub bytes: u64,
    pub symbols: u64,
    pub points: usize,
    pub chunks: usize,
    pub comment_lines: u64,
    pub end: (i64, i64),
    pub elapsed_ms: u128,
    pub layout: AppliedEdit,
    pub output: Option<PathBuf>,
}

/// `--json` file contents: the summary plus the sampled path.
#[derive(Debug, Serialize)]
struct PathDump<'a> {
    #[serde(flatten)]
    report: &'a PlotReport,
    path: &'a PathBuffers,
}

impl PlotReport {
    fn new(run: &RunConfig, summary: &RunSummary, layout: AppliedEdit, output: Option<PathBuf>) -> Self {
        Self {
            input: run.input.name.clone(),
            bytes: run.input.size,
            symbols: summary.symbols(),
            points: summary.points(),
            chunks: summary.chunks,
            comment_lines: summary.comment_lines,
            end: (summary.state.cursor.x, summary.state.cursor.y),
            elapsed_ms: summary.elapsed.as_millis(),
            layout,
            output,
        }
    }
}

pub fn execute(
    config: &Config,
    input: PathBuf,
    output: Option<PathBuf>,
    json: Option<PathBuf>,
    overrides: &PlotOverrides,
    quiet: bool,
) -> Result<()> {
    let mut raw = config.raw_settings();
    apply_overrides(&mut raw, overrides)?;

    let mut canvas = PlotCanvas::new();
    let (run, summary) = if input == Path::new("-") {
        let source = spool("stdin", std::io::stdin().lock())
            .map_err(|e| CliError::io(format!("Failed to read standard input: {}", e)))?;
        let run = resolve_with_input(&raw, InputSource::new("stdin", "-", source.total_size()))
            .map_err(CliError::from)?;
        let summary = walk(&run, source, &mut canvas, quiet)?;
        (run, summary)
    } else {
        if !input.exists() {
            return Err(CliError::file_not_found(input).into());
        }
        raw.input = Some(input);
        let run = resolve(&raw).map_err(CliError::from)?;
        let source = FileSource::open(&run.input.path).map_err(CliError::from)?;
        let summary = walk(&run, source, &mut canvas, quiet)?;
        (run, summary)
    };

    if let Some(path) = &output {
        let mut export = export_config(config, overrides);
        export.provenance_comment = Some(provenance(&run));
        seqwalk_render::export(path, &canvas, &export).map_err(|e| CliError::export(format!("{:#}", e)))?;
    }

    let report = PlotReport::new(&run, &summary, canvas.layout(), output);
    if let Some(path) = &json {
        let dump = PathDump {
            report: &report,
            path: &summary.buffers,
        };
        let content = serde_json::to_string(&dump)?;
        std::fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        log::info!("Wrote path dump to {}", path.display());
    }
    if !quiet {
        print_report(&report);
    }
    Ok(())
}

/// Copies piped input into an anonymous temporary file so it can be read in
/// chunks like any other file.
fn spool<R: Read>(name: &str, mut reader: R) -> std::io::Result<FileSource> {
    let mut file = tempfile::tempfile()?;
    let copied = std::io::copy(&mut reader, &mut file)?;
    file.seek(SeekFrom::Start(0))?;
    log::debug!("Spooled {} bytes from {}", copied, name);
    FileSource::from_file(name, file)
}

fn walk<S: ChunkSource>(run: &RunConfig, source: S, canvas: &mut PlotCanvas, quiet: bool) -> Result<RunSummary> {
    let pb = progress_bar(quiet);
    let summary = encode_run(run, source, canvas, |p| report_progress(&pb, p));
    pb.finish_and_clear();
    Ok(summary.map_err(CliError::from)?)
}

fn print_report(report: &PlotReport) {
    println!("Input:    {} ({} bytes)", report.input, report.bytes);
    println!("Symbols:  {}", report.symbols);
    println!("Points:   {} in {} chunk/s", report.points, report.chunks);
    if report.comment_lines > 0 {
        println!("Comments: {} line/s skipped", report.comment_lines);
    }
    println!("End:      ({}, {})", report.end.0, report.end.1);
    println!(
        "Extent:   x [{:.1}, {:.1}]  y [{:.1}, {:.1}]",
        report.layout.x_range.min, report.layout.x_range.max, report.layout.y_range.min, report.layout.y_range.max
    );
    if let Some(path) = &report.output {
        println!("Output:   {}", path.display());
    }
    println!("Time:     {} ms", report.elapsed_ms);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plot_writes_svg() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let input = dir.path().join("walk.fa");
        std::fs::write(&input, ">seq\nATGC\nAAAA\n")?;
        let output = dir.path().join("walk.svg");

        let overrides = PlotOverrides {
            mode: Some("markers".into()),
            ..Default::default()
        };
        let json = dir.path().join("walk.json");
        execute(&Config::default(), input, Some(output.clone()), Some(json.clone()), &overrides, true)?;

        let svg = std::fs::read_to_string(&output)?;
        assert_eq!(svg.matches("<circle").count(), 8);
        assert!(svg.contains("input walk.fa (15 bytes) | mode markers"));

        let dump: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&json)?)?;
        assert_eq!(dump["symbols"], 8);
        assert_eq!(dump["path"]["y"], serde_json::json!([1, 0, 0, 0, 1, 2, 3, 4]));
        assert_eq!(dump["path"]["colors"].as_array().map(|c| c.len()), Some(8));
        Ok(())
    }

    #[test]
    fn test_spooled_input_reads_like_a_file() -> Result<()> {
        let data = b">piped\nACGT\nTTTT\n".repeat(1000);
        let mut source = spool("stdin", std::io::Cursor::new(data.clone()))?;
        assert_eq!(source.name(), "stdin");
        assert_eq!(source.total_size(), data.len() as u64);

        let mut buf = [0u8; 4];
        source.read_at(data.len() as u64 - 5, &mut buf)?;
        assert_eq!(&buf, b"TTTT");
        Ok(())
    }

    #[test]
    fn test_missing_file_reports_not_found() {
        let err = execute(
            &Config::default(),
            PathBuf::from("/definitely/not/here.fa"),
            None,
            None,
            &PlotOverrides::default(),
            true,
        )
        .unwrap_err();
        assert!(matches!(err.downcast_ref::<CliError>(), Some(CliError::FileNotFound { .. })));
    }

    #[test]
    fn test_invalid_offset_is_rejected() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let input = dir.path().join("walk.fa");
        std::fs::write(&input, "ATGC\n")?;
        let overrides = PlotOverrides {
            offset: Some(0),
            ..Default::default()
        };
        let err = execute(&Config::default(), input, None, None, &overrides, true).unwrap_err();
        assert!(matches!(err.downcast_ref::<CliError>(), Some(CliError::InvalidSetting { .. })));
        Ok(())
    }
}
