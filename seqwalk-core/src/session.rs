//! Repeated runs against one renderer
//!
//! A [`PlotSession`] remembers the configuration of the previous run so that
//! repeating an identical run can be confirmed or skipped.

use crate::bridge::RenderBridge;
use crate::encode::{encode_run, Progress, RunSummary};
use crate::error::WalkResult;
use crate::io::FileSource;
use crate::settings::{resolve, unchanged, RawSettings, RunConfig};

#[derive(Debug)]
pub enum RunOutcome {
    Completed(RunSummary),
    /// Settings were unchanged and the repeat was not confirmed. Nothing ran.
    Declined,
}

#[derive(Debug, Default)]
pub struct PlotSession {
    previous: Option<RunConfig>,
}

impl PlotSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn previous(&self) -> Option<&RunConfig> {
        self.previous.as_ref()
    }

    /// Resolves `raw` and runs it against `bridge`.
    ///
    /// If the resolved configuration is unchanged from the previous run,
    /// `confirm` decides whether to run again.
    pub fn run<B, C, F>(&mut self, raw: &RawSettings, bridge: &mut B, confirm: C, on_progress: F) -> WalkResult<RunOutcome>
    where
        B: RenderBridge + ?Sized,
        C: FnOnce(&RunConfig) -> bool,
        F: FnMut(Progress),
    {
        let config = resolve(raw)?;
        log::debug!("Settings: {:?}", config);

        if let Some(previous) = &self.previous {
            if unchanged(previous, &config) && !confirm(&config) {
                log::info!("Settings have not changed since last plot, skipping");
                return Ok(RunOutcome::Declined);
            }
        }

        let source = FileSource::open(&config.input.path)?;
        self.previous = Some(config.clone());

        let summary = encode_run(&config, source, bridge, on_progress)?;
        Ok(RunOutcome::Completed(summary))
    }
}
