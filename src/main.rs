use anyhow::{Context, Result, anyhow};
use clap::Parser;
use grid_snake::game::GameConfig;
use grid_snake::modes::{HumanMode, SessionOptions};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Snake on a square grid, in your terminal")]
struct Cli {
    /// Side length of the square board
    #[arg(long, default_value = "20")]
    board_size: usize,

    /// Starting tick interval in milliseconds
    #[arg(long, default_value = "200")]
    speed: u64,

    /// Fastest tick interval in milliseconds
    #[arg(long, default_value = "60")]
    min_speed: u64,

    /// Seed for a reproducible food sequence
    #[arg(long)]
    seed: Option<u64>,

    /// Never ring the terminal bell
    #[arg(long)]
    mute: bool,

    /// Write logs to this file (RUST_LOG controls the level)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// The game owns the terminal, so logs only go to a file when asked
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow!("Failed to set tracing subscriber: {err}"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    // Create game configuration from CLI arguments
    let config = GameConfig {
        board_size: cli.board_size,
        initial_speed_ms: cli.speed,
        min_speed_ms: cli.min_speed,
        ..Default::default()
    };
    info!(?config, seed = ?cli.seed, "starting");

    let options = SessionOptions {
        seed: cli.seed,
        mute: cli.mute,
    };

    let mut human_mode = HumanMode::new(config, options)?;
    human_mode.run().await?;

    Ok(())
}
