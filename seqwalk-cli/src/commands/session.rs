//! Session command implementation
//!
//! Reads one command per line, keeps the settings and the last plot between
//! commands, and asks before repeating a run whose settings did not change.

use anyhow::Result;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use seqwalk_core::{AppliedEdit, AxisRange, CosmeticEdit, PlotSession, RenderBridge, RunConfig, RunOutcome};
use seqwalk_render::PlotCanvas;

use super::{progress_bar, provenance, report_progress};
use crate::config::Config;
use crate::error::{format_error_with_suggestions, CliError, CliResult};

const HELP: &str = "\
Commands:
  set KEY VALUE      change a setting (a.dir, a.color, ... x.color, mode, offset,
                     size, color, chunk, chunk-bytes, input)
  show               print the current settings
  run                walk the input and redraw the plot
  edit size N        change the marker size of the current plot
  edit x MIN MAX     set the x axis range
  edit y MIN MAX     set the y axis range
  layout             print marker size and axis ranges
  export PATH        write the current plot (.svg or .png)
  help               show this text
  quit               leave the session";

#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    Set { key: String, value: String },
    Show,
    Run,
    Edit(CosmeticEdit),
    Layout,
    Export(PathBuf),
    Help,
    Quit,
}

fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim();
    match s.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (s, ""),
    }
}

fn parse_range(axis: &str, args: &str) -> CliResult<AxisRange> {
    let values: Vec<&str> = args.split_whitespace().collect();
    let [min, max] = values.as_slice() else {
        return Err(CliError::command(format!("edit {} needs MIN and MAX", axis)));
    };
    let parse = |v: &str| {
        v.parse::<f64>()
            .map_err(|_| CliError::command(format!("'{}' is not a number", v)))
    };
    Ok(AxisRange::new(parse(min)?, parse(max)?))
}

/// Parses one input line. Blank lines and `#` comments yield `None`.
pub fn parse_command(line: &str) -> CliResult<Option<SessionCommand>> {
    let (word, rest) = split_word(line);
    if word.is_empty() || word.starts_with('#') {
        return Ok(None);
    }

    let command = match word.to_ascii_lowercase().as_str() {
        "set" => {
            let (key, value) = split_word(rest);
            if key.is_empty() || value.is_empty() {
                return Err(CliError::command("usage: set KEY VALUE"));
            }
            SessionCommand::Set {
                key: key.to_string(),
                value: value.to_string(),
            }
        }
        "show" => SessionCommand::Show,
        "run" | "draw" => SessionCommand::Run,
        "edit" => {
            let (what, args) = split_word(rest);
            let edit = match what {
                "size" => {
                    let size = args
                        .parse::<u32>()
                        .map_err(|_| CliError::command(format!("'{}' is not a marker size", args)))?;
                    CosmeticEdit {
                        marker_size: Some(size),
                        ..Default::default()
                    }
                }
                "x" => CosmeticEdit {
                    x_range: Some(parse_range("x", args)?),
                    ..Default::default()
                },
                "y" => CosmeticEdit {
                    y_range: Some(parse_range("y", args)?),
                    ..Default::default()
                },
                _ => return Err(CliError::command("usage: edit size N | edit x MIN MAX | edit y MIN MAX")),
            };
            SessionCommand::Edit(edit)
        }
        "layout" => SessionCommand::Layout,
        "export" => {
            if rest.is_empty() {
                return Err(CliError::command("usage: export PATH"));
            }
            SessionCommand::Export(PathBuf::from(rest))
        }
        "help" | "?" => SessionCommand::Help,
        "quit" | "exit" => SessionCommand::Quit,
        other => return Err(CliError::command(format!("unknown command '{}', try 'help'", other))),
    };
    Ok(Some(command))
}

fn describe(layout: &AppliedEdit) -> String {
    format!(
        "marker size {}, x [{}, {}], y [{}, {}]",
        layout.marker_size, layout.x_range.min, layout.x_range.max, layout.y_range.min, layout.y_range.max
    )
}

fn confirm<I, W>(lines: &mut I, out: &mut W, run: &RunConfig, assume_yes: bool) -> bool
where
    I: Iterator<Item = std::io::Result<String>>,
    W: Write,
{
    if assume_yes {
        return true;
    }
    let _ = write!(
        out,
        "Settings have not changed since the last plot of {}. Draw again? [y/N] ",
        run.input.name
    );
    let _ = out.flush();
    match lines.next() {
        Some(Ok(answer)) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
        _ => false,
    }
}

pub fn execute<R: BufRead, W: Write>(config: &Config, input: R, out: &mut W, assume_yes: bool, quiet: bool) -> Result<()> {
    let mut raw = config.raw_settings();
    let export_config = config.export_config();
    let mut session = PlotSession::new();
    let mut canvas = PlotCanvas::new();
    let mut lines = input.lines();

    writeln!(out, "seqwalk {} session, type 'help' for commands", seqwalk_core::VERSION)?;

    while let Some(line) = lines.next() {
        let line = line?;
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(out, "{}", e)?;
                continue;
            }
        };
        log::debug!("Session command: {:?}", command);

        match command {
            SessionCommand::Quit => break,
            SessionCommand::Help => writeln!(out, "{}", HELP)?,
            SessionCommand::Show => writeln!(out, "{}", serde_json::to_string_pretty(&raw)?)?,
            SessionCommand::Set { key, value } => match raw.set(&key, &value) {
                Ok(()) => writeln!(out, "{} = {}", key, value)?,
                Err(e) => writeln!(out, "Error: {}", format_error_with_suggestions(&e.into()))?,
            },
            SessionCommand::Run => {
                let pb = progress_bar(quiet);
                let result = session.run(
                    &raw,
                    &mut canvas,
                    |run| confirm(&mut lines, &mut *out, run, assume_yes),
                    |p| report_progress(&pb, p),
                );
                pb.finish_and_clear();

                match result {
                    Ok(RunOutcome::Completed(summary)) => writeln!(
                        out,
                        "Drew {} points from {} symbols in {} chunk/s ({} ms)",
                        summary.points(),
                        summary.symbols(),
                        summary.chunks,
                        summary.elapsed.as_millis()
                    )?,
                    Ok(RunOutcome::Declined) => writeln!(out, "Skipped, plot left as it was")?,
                    Err(e) => writeln!(out, "Error: {}", format_error_with_suggestions(&e.into()))?,
                }
            }
            SessionCommand::Edit(edit) => {
                if canvas.revision().is_none() {
                    writeln!(out, "Nothing plotted yet, use 'run' first")?;
                    continue;
                }
                let applied = canvas.apply_cosmetic_edit(&edit);
                writeln!(out, "{}", describe(&applied))?;
            }
            SessionCommand::Layout => writeln!(out, "{}", describe(&canvas.layout()))?,
            SessionCommand::Export(path) => {
                let Some(run) = session.previous() else {
                    writeln!(out, "Nothing plotted yet, use 'run' first")?;
                    continue;
                };
                let mut export = export_config.clone();
                export.provenance_comment = Some(provenance(run));
                match seqwalk_render::export(&path, &canvas, &export) {
                    Ok(()) => writeln!(out, "Wrote {}", path.display())?,
                    Err(e) => {
                        let err = CliError::export(format!("{:#}", e));
                        writeln!(out, "Error: {}", format_error_with_suggestions(&err))?
                    }
                }
            }
        }
    }

    Ok(())
}
