//! Config command implementation

use anyhow::Result;
use std::path::PathBuf;

use crate::config::Config;

pub fn execute(config: &Config, example: bool, output: Option<PathBuf>) -> Result<()> {
    let content = if example {
        Config::example_toml()?
    } else {
        // the configuration in effect, after seqwalk.toml was applied
        toml::to_string_pretty(config)?
    };

    match output {
        Some(path) => {
            std::fs::write(&path, content)?;
            log::info!("Wrote configuration to {}", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}
