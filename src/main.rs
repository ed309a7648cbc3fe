use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use color_snake::game::{GameConfig, GameEngine};
use color_snake::logging::init_file_logger;
use color_snake::modes::HumanMode;
use simplelog::LevelFilter;

#[derive(Parser)]
#[command(name = "color_snake")]
#[command(version, about = "Snake arcade game for the terminal")]
struct Cli {
    /// YAML config file; missing file means defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board width in units (multiple of the cell size)
    #[arg(long)]
    width: Option<i32>,

    /// Board height in units (multiple of the cell size)
    #[arg(long)]
    height: Option<i32>,

    /// Milliseconds between ticks
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Ring the terminal bell on every move
    #[arg(long)]
    sound: bool,

    /// Seed for fruit placement
    #[arg(long)]
    seed: Option<u64>,

    /// Where to write the log
    #[arg(long, default_value = "color_snake.log")]
    log_file: PathBuf,

    /// Log debug events (direction changes, fruit respawns)
    #[arg(long)]
    verbose: bool,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.board_width = width;
        }
        if let Some(height) = self.height {
            config.board_height = height;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_ms = tick_ms;
        }
        if self.sound {
            config.sound = true;
        }

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    init_file_logger(&cli.log_file, level)?;

    let config = cli.game_config()?;

    let mut human_mode = match cli.seed {
        Some(seed) => HumanMode::new(GameEngine::with_seed(config, seed)?),
        None => HumanMode::from_config(config)?,
    };
    human_mode.run().await?;

    Ok(())
}
