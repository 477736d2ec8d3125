//! Strictly Noughts - terminal entry point.

use anyhow::Result;
use clap::Parser;
use strictly_noughts::cli::{Cli, Command};
use strictly_noughts::{Board, GameConfig, Mark, Player, render_suggestion, run_console, suggest};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    initialize_tracing();

    match cli.command {
        Command::Play {
            config,
            starting_player,
            delay,
        } => run_play(config, starting_player, delay).await,
        Command::Suggest {
            board,
            mark,
            win_length,
            json,
        } => run_suggest(&board, mark, win_length, json),
    }
}

/// Logs go to stderr so they never interleave with the board on stdout.
fn initialize_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Run an interactive game
#[instrument]
async fn run_play(
    config_path: Option<std::path::PathBuf>,
    starting_player: Option<Player>,
    delay: Option<f64>,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => GameConfig::from_file(path)?,
        None => GameConfig::default(),
    };
    if let Some(player) = starting_player {
        config = config.with_starting_player(player);
    }
    if let Some(secs) = delay {
        config = config.with_thinking_delay_secs(secs);
    }
    config.validate()?;

    info!(?config, "Starting console game");
    run_console(config).await
}

/// Print the heuristic's evaluation of a board
#[instrument]
fn run_suggest(board: &str, mark: Option<Mark>, win_length: Option<usize>, json: bool) -> Result<()> {
    let board: Board = board.parse()?;
    if let Some(k) = win_length {
        anyhow::ensure!(
            (1..=board.size()).contains(&k),
            "win length must be between 1 and {}",
            board.size()
        );
    }

    let suggestion = suggest(&board, mark, win_length);
    if json {
        println!("{}", serde_json::to_string_pretty(&suggestion)?);
    } else {
        println!("{}", render_suggestion(&board, &suggestion));
    }
    Ok(())
}
