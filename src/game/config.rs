use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

/// Configuration for the game
///
/// All distances are in board units. The snake moves one `cell_size` per
/// tick, so the board extent should be a whole number of cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the board
    pub board_width: i32,
    /// Height of the board
    pub board_height: i32,
    /// Edge length of the head and every body segment
    pub cell_size: i32,
    /// Edge length of the fruit
    pub fruit_size: i32,
    /// Hard ceiling on the number of body segments
    pub max_segments: usize,
    /// Milliseconds between game ticks
    pub tick_ms: u64,
    /// Ring the terminal bell on every move
    pub sound: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_width: 640,
            board_height: 480,
            cell_size: 20,
            fruit_size: 15,
            max_segments: 100,
            tick_ms: 150,
            sound: false,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom board size
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            board_width: width,
            board_height: height,
            ..Default::default()
        }
    }

    /// Create a small board for testing
    pub fn small() -> Self {
        Self::new(200, 200)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Board size in cells (columns, rows)
    pub fn grid_size(&self) -> (u16, u16) {
        let columns = self.board_width / self.cell_size;
        let rows = self.board_height / self.cell_size;
        (columns as u16, rows as u16)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.cell_size > 0, "cell_size must be positive, got {}", self.cell_size);
        ensure!(self.fruit_size > 0, "fruit_size must be positive, got {}", self.fruit_size);
        ensure!(
            self.board_width >= self.cell_size && self.board_height >= self.cell_size,
            "board {}x{} is smaller than one cell of {}",
            self.board_width,
            self.board_height,
            self.cell_size
        );
        ensure!(
            self.board_width % self.cell_size == 0 && self.board_height % self.cell_size == 0,
            "board {}x{} is not a whole number of {}-unit cells",
            self.board_width,
            self.board_height,
            self.cell_size
        );
        ensure!(
            self.board_width / self.cell_size <= u16::MAX as i32
                && self.board_height / self.cell_size <= u16::MAX as i32,
            "board has too many cells to draw"
        );
        ensure!(self.max_segments > 0, "max_segments must be at least 1");
        ensure!(self.tick_ms > 0, "tick_ms must be positive");
        Ok(())
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml_ng::from_str(content).context("Failed to parse game config")
    }

    /// Load a YAML config file, falling back to defaults when it does not exist
    pub fn load(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_yaml_str(&content)
                .with_context(|| format!("Invalid config file {}", path.display())),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::info!("Config file {} not found, using defaults", path.display());
                Ok(Self::default())
            }
            Err(err) => {
                Err(err).with_context(|| format!("Failed to read config file {}", path.display()))
            }
        }
    }
}
