//! Sequence-to-path encoding
//!
//! Every symbol moves the cursor according to its rule; every `point_offset`th
//! step records the cursor position (and the rule's color) into the output
//! buffers. The walk is strictly sequential, so the cursor and step counter are
//! threaded explicitly through each chunk as a [`WalkState`].

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::bridge::RenderBridge;
use crate::cursor::Cursor;
use crate::error::WalkResult;
use crate::io::{Chunk, ChunkSource, ChunkedReader, LineKind};
use crate::rules::RuleTable;
use crate::settings::RunConfig;
use crate::types::Rgb;

/// Walk accumulator carried from one chunk to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WalkState {
    pub cursor: Cursor,
    /// Symbols walked so far.
    pub steps: u64,
}

/// Sampled path. `x` and `y` always have the same length; `colors`, when
/// present, has one entry per sampled point.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PathBuffers {
    pub x: Vec<i64>,
    pub y: Vec<i64>,
    pub colors: Option<Vec<Rgb>>,
}

impl PathBuffers {
    pub fn new(color_enabled: bool) -> Self {
        Self {
            x: Vec::new(),
            y: Vec::new(),
            colors: color_enabled.then(Vec::new),
        }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    fn push(&mut self, cursor: Cursor, color: Rgb) {
        self.x.push(cursor.x);
        self.y.push(cursor.y);
        if let Some(colors) = self.colors.as_mut() {
            colors.push(color);
        }
    }
}

/// Bytes read so far out of the input size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub bytes_processed: u64,
    pub total_bytes: u64,
}

impl Progress {
    pub fn fraction(&self) -> f64 {
        if self.total_bytes == 0 {
            1.0
        } else {
            self.bytes_processed as f64 / self.total_bytes as f64
        }
    }

    /// Percentage with one decimal, e.g. `"42.0%"`.
    pub fn percent_label(&self) -> String {
        format!("{:.1}%", self.fraction() * 100.0)
    }
}

/// Drives the cursor over symbols and samples points.
#[derive(Debug, Clone, Copy)]
pub struct PathEncoder<'a> {
    rules: &'a RuleTable,
    point_offset: u64,
}

impl<'a> PathEncoder<'a> {
    /// `point_offset` of 0 is treated as 1.
    pub fn new(rules: &'a RuleTable, point_offset: u64) -> Self {
        Self {
            rules,
            point_offset: point_offset.max(1),
        }
    }

    /// Walks one symbol.
    pub fn step(&self, mut state: WalkState, symbol: char, buffers: &mut PathBuffers) -> WalkState {
        let rule = self.rules.rule_for(symbol);
        state.cursor.apply(rule.direction);

        if state.steps % self.point_offset == 0 {
            buffers.push(state.cursor, rule.color);
        }

        state.steps += 1;
        state
    }

    /// Walks every sequence symbol of a line (or line fragment).
    pub fn walk_line(&self, state: WalkState, line: &str, buffers: &mut PathBuffers) -> WalkState {
        line.chars().fold(state, |state, symbol| self.step(state, symbol, buffers))
    }

    /// Walks all sequence fragments of a chunk; comment fragments are skipped.
    pub fn process_chunk(&self, mut state: WalkState, chunk: &Chunk, buffers: &mut PathBuffers) -> WalkState {
        for fragment in &chunk.fragments {
            match fragment.kind {
                LineKind::Comment => {
                    if !fragment.continued {
                        log::debug!("Ignored comment line in chunk {}: \"{}\"", chunk.index + 1, fragment.text);
                    }
                }
                LineKind::Sequence => {
                    state = self.walk_line(state, &fragment.text, buffers);
                }
            }
        }
        state
    }
}

/// Result of a completed run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub buffers: PathBuffers,
    pub state: WalkState,
    pub chunks: usize,
    pub comment_lines: u64,
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn points(&self) -> usize {
        self.buffers.len()
    }

    pub fn symbols(&self) -> u64 {
        self.state.steps
    }
}

/// Runs the full chunked pipeline against a renderer.
///
/// Each chunk is walked, then the full buffers are pushed to `bridge` with the
/// chunk index as revision, then `on_progress` is called. Colors are sent once,
/// after the last chunk. On a read failure the run stops; updates already sent
/// stay with the renderer.
pub fn encode_run<S, B, F>(config: &RunConfig, source: S, bridge: &mut B, mut on_progress: F) -> WalkResult<RunSummary>
where
    S: ChunkSource,
    B: RenderBridge + ?Sized,
    F: FnMut(Progress),
{
    let start = Instant::now();
    let reader = ChunkedReader::new(source, config.chunk_size_bytes)?;
    let total_chunks = reader.chunk_count();
    let total_bytes = reader.total_size();

    log::info!("Start plotting {} ({} bytes)", reader.source().name(), total_bytes);
    log::info!("There will be {} chunk/s", total_chunks);

    let encoder = PathEncoder::new(&config.rules, config.point_offset);
    let mut buffers = PathBuffers::new(config.color_enabled);
    let mut state = WalkState::default();
    let mut comment_lines = 0u64;

    bridge.init_plot(&config.style);

    for chunk in reader {
        let chunk = chunk?;
        log::debug!("Drawing chunk {}/{}", chunk.index + 1, total_chunks);

        comment_lines += chunk
            .fragments
            .iter()
            .filter(|f| f.kind == LineKind::Comment && !f.continued)
            .count() as u64;
        state = encoder.process_chunk(state, &chunk, &mut buffers);

        bridge.update_plot(&buffers.x, &buffers.y, chunk.index as u64);
        on_progress(Progress {
            bytes_processed: chunk.bytes_consumed,
            total_bytes: chunk.total_bytes,
        });
    }

    if let Some(colors) = buffers.colors.as_deref() {
        bridge.set_colors(colors);
    }

    let elapsed = start.elapsed();
    log::info!(
        "Finished plotting: {} symbols, {} points, {} comment line/s",
        state.steps,
        buffers.len(),
        comment_lines
    );
    log::info!("== Total: {} ms", elapsed.as_millis());

    Ok(RunSummary {
        buffers,
        state,
        chunks: total_chunks,
        comment_lines,
        elapsed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;

    fn compass_rules() -> RuleTable {
        RuleTable::with_directions(Direction::N, Direction::E, Direction::S, Direction::W, Direction::None)
    }

    fn walk(rules: &RuleTable, offset: u64, text: &str, color: bool) -> (WalkState, PathBuffers) {
        let encoder = PathEncoder::new(rules, offset);
        let mut buffers = PathBuffers::new(color);
        let state = encoder.walk_line(WalkState::default(), text, &mut buffers);
        (state, buffers)
    }

    #[test]
    fn test_atgc_square() {
        let (state, buffers) = walk(&compass_rules(), 1, "ATGC", false);
        assert_eq!(buffers.points().collect::<Vec<_>>(), vec![(0, 1), (1, 1), (1, 0), (0, 0)]);
        assert_eq!(state.cursor, Cursor::ORIGIN);
        assert_eq!(state.steps, 4);
        assert!(buffers.colors.is_none());
    }

    #[test]
    fn test_sampling_keeps_first_of_each_window() {
        let (_, buffers) = walk(&compass_rules(), 2, "AAAAA", false);
        // steps 0, 2, 4 are sampled; positions are after the move
        assert_eq!(buffers.y, vec![1, 3, 5]);
        assert_eq!(buffers.x, vec![0, 0, 0]);
    }

    #[test]
    fn test_colors_follow_sampled_points() {
        let rules = compass_rules();
        let (_, buffers) = walk(&rules, 2, "ATGC", true);
        let colors = buffers.colors.unwrap();
        assert_eq!(colors, vec![rules.a.color, rules.g.color]);
        assert_eq!(colors.len(), buffers.x.len());
    }

    #[test]
    fn test_fallback_symbols_use_x_rule() {
        let mut rules = compass_rules();
        rules.x.direction = Direction::NE;
        let (state, _) = walk(&rules, 1, "n 7-", false);
        assert_eq!(state.cursor, Cursor::new(4, 4));
    }

    #[test]
    fn test_zero_offset_treated_as_one() {
        let (_, buffers) = walk(&compass_rules(), 0, "AT", false);
        assert_eq!(buffers.len(), 2);
    }

    #[test]
    fn test_progress_label() {
        let p = Progress { bytes_processed: 1, total_bytes: 3 };
        assert_eq!(p.percent_label(), "33.3%");
        let empty = Progress { bytes_processed: 0, total_bytes: 0 };
        assert_eq!(empty.percent_label(), "100.0%");
    }
}
