use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use simplelog::{Config, LevelFilter, WriteLogger};

/// Send log output to a file; the terminal belongs to the game screen
pub fn init_file_logger(path: &Path, level: LevelFilter) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    WriteLogger::init(level, Config::default(), file).context("Failed to initialize logger")
}
