use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use othello_console::config::AppConfig;
use othello_console::console::Console;

/// Play two-player Othello in the terminal.
#[derive(Parser)]
#[command(name = "othello", about = "Play two-player Othello in the terminal")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "othello.toml")]
    config: PathBuf,

    /// Start from a saved game instead of the standard opening
    #[arg(long)]
    load: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))
        .with_context(|| format!("invalid log filter '{}'", cli.log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    let mut console = Console::new(config);
    if let Some(path) = &cli.load {
        console
            .load_game(path)
            .with_context(|| format!("loading saved game from {}", path.display()))?;
    }

    let stdin = io::stdin();
    console.run(stdin.lock(), io::stdout().lock())?;
    Ok(())
}
