//! SeqWalk Core Library
//!
//! Streaming conversion of FASTA-like sequence files into 2D random-walk
//! paths: symbol rules, the cursor walker, the chunked reader, the path
//! encoder, settings resolution and the renderer interface.

pub mod types;
pub mod error;
pub mod rules;
pub mod cursor;
pub mod io;
pub mod encode;
pub mod settings;
pub mod bridge;
pub mod session;

// Re-export commonly used types and functions
pub use types::{Direction, Rgb, Symbol};
pub use error::{WalkError, WalkResult};
pub use rules::{RuleTable, SymbolRule};
pub use cursor::Cursor;
pub use io::{ChunkSource, ChunkedReader, FileSource, MemorySource};
pub use encode::{encode_run, PathBuffers, PathEncoder, Progress, RunSummary, WalkState};
pub use settings::{
    resolve, resolve_with_input, unchanged, InputSource, PlotMode, PlotStyle, RawRule, RawRules, RawSettings, RunConfig,
};
pub use bridge::{AppliedEdit, AxisRange, CosmeticEdit, RenderBridge};
pub use session::{PlotSession, RunOutcome};

/// Version information for the SeqWalk core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
