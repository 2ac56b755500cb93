//! Fixed-size chunked reading with line stitching
//!
//! The source is read in chunks of `chunk_size` bytes and each chunk is split
//! on `\n`. A line that straddles a chunk boundary is not split into two
//! independent lines: the reader remembers whether the line left open at the
//! end of a chunk is a comment or a sequence line, and the first fragment of
//! the next chunk is marked as its continuation. Incomplete UTF-8 sequences at
//! the end of a chunk are carried into the next one. The walk produced from
//! the fragments is therefore independent of the chunk size.

use std::iter::FusedIterator;

use super::ChunkSource;
use crate::error::{WalkError, WalkResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Symbols to walk.
    Sequence,
    /// Header/comment line starting with `>`; skipped by the walk.
    Comment,
}

impl LineKind {
    fn of(line_start: &str) -> Self {
        if line_start.starts_with('>') {
            LineKind::Comment
        } else {
            LineKind::Sequence
        }
    }
}

/// Part of a line contained in one chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineFragment {
    pub text: String,
    pub kind: LineKind,
    /// True if this fragment continues a line begun in an earlier chunk.
    pub continued: bool,
}

#[derive(Debug, Clone)]
pub struct Chunk {
    pub index: usize,
    /// Cumulative bytes read from the source after this chunk.
    pub bytes_consumed: u64,
    pub total_bytes: u64,
    pub fragments: Vec<LineFragment>,
}

pub struct ChunkedReader<S> {
    source: S,
    chunk_size: u64,
    chunk_count: usize,
    next_index: usize,
    offset: u64,
    open_line: Option<LineKind>,
    pending: Vec<u8>,
    failed: bool,
}

impl<S: ChunkSource> ChunkedReader<S> {
    pub fn new(source: S, chunk_size: u64) -> WalkResult<Self> {
        if chunk_size == 0 {
            return Err(WalkError::invalid_setting("chunk_size", "must be greater than zero"));
        }

        let total = source.total_size();
        let chunk_count = usize::try_from(total.div_ceil(chunk_size))
            .map_err(|_| WalkError::invalid_setting("chunk_size", "too many chunks for this platform"))?;

        Ok(Self {
            source,
            chunk_size,
            chunk_count,
            next_index: 0,
            offset: 0,
            open_line: None,
            pending: Vec::new(),
            failed: false,
        })
    }

    pub fn chunk_count(&self) -> usize {
        self.chunk_count
    }

    pub fn total_size(&self) -> u64 {
        self.source.total_size()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    fn read_chunk(&mut self) -> WalkResult<Chunk> {
        let index = self.next_index;
        let total = self.source.total_size();
        let len = self.chunk_size.min(total - self.offset) as usize;

        let mut bytes = std::mem::take(&mut self.pending);
        let start = bytes.len();
        bytes.resize(start + len, 0);
        self.source
            .read_at(self.offset, &mut bytes[start..])
            .map_err(|e| WalkError::read_failure(index, e))?;

        self.offset += len as u64;
        self.next_index += 1;

        let is_last = self.next_index == self.chunk_count;
        let text = self.decode(bytes, is_last);
        let fragments = self.split_lines(&text);

        Ok(Chunk {
            index,
            bytes_consumed: self.offset,
            total_bytes: total,
            fragments,
        })
    }

    /// Decode as UTF-8, holding back an incomplete trailing sequence unless this
    /// is the final chunk. Invalid bytes become U+FFFD.
    fn decode(&mut self, mut bytes: Vec<u8>, is_last: bool) -> String {
        if !is_last {
            let cut = incomplete_utf8_tail(&bytes);
            self.pending = bytes.split_off(cut);
        }

        match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        }
    }

    fn split_lines(&mut self, text: &str) -> Vec<LineFragment> {
        let mut fragments = Vec::new();
        let mut pieces = text.split('\n').peekable();
        let mut first = true;

        while let Some(piece) = pieces.next() {
            let is_last_piece = pieces.peek().is_none();
            let carried = if first { self.open_line } else { None };
            first = false;

            let continued = carried.is_some();
            let kind = carried.unwrap_or_else(|| LineKind::of(piece));

            // A line stays open across the boundary only once we have seen part of it
            self.open_line = if is_last_piece && (continued || !piece.is_empty()) {
                Some(kind)
            } else {
                None
            };

            if !piece.is_empty() {
                fragments.push(LineFragment {
                    text: piece.to_string(),
                    kind,
                    continued,
                });
            }
        }

        fragments
    }
}

impl<S: ChunkSource> Iterator for ChunkedReader<S> {
    type Item = WalkResult<Chunk>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.next_index >= self.chunk_count {
            return None;
        }

        let result = self.read_chunk();
        if result.is_err() {
            self.failed = true;
        }
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.failed { 0 } else { self.chunk_count - self.next_index };
        (0, Some(remaining))
    }
}

impl<S: ChunkSource> FusedIterator for ChunkedReader<S> {}

/// Index where a trailing incomplete UTF-8 sequence starts, or `bytes.len()`.
fn incomplete_utf8_tail(bytes: &[u8]) -> usize {
    let len = bytes.len();
    for back in 1..=len.min(3) {
        let b = bytes[len - back];
        if b & 0xC0 == 0x80 {
            continue;
        }
        let needed = match b {
            b if b & 0xE0 == 0xC0 => 2,
            b if b & 0xF0 == 0xE0 => 3,
            b if b & 0xF8 == 0xF0 => 4,
            _ => 1,
        };
        return if needed > back { len - back } else { len };
    }
    len
}
