//! Command-line interface for strictly_noughts.

use crate::games::tictactoe::{Mark, Player};
use clap::{Parser, Subcommand};

/// Strictly Noughts - tic-tac-toe against a positional heuristic
#[derive(Parser, Debug)]
#[command(name = "strictly_noughts")]
#[command(about = "Play tic-tac-toe against a heuristic opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play an interactive game in the terminal
    Play {
        /// Path to a TOML session config (defaults apply when absent)
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,

        /// Who moves first
        #[arg(long, value_enum)]
        starting_player: Option<Player>,

        /// Computer thinking delay in seconds
        #[arg(long)]
        delay: Option<f64>,
    },

    /// Print the heuristic's pick and cell scores for a board
    Suggest {
        /// Row-major cells, e.g. "O.X.O...." ('.', '_' or '-' for empty)
        board: String,

        /// Mark the computer plays (defaults to the mark due next)
        #[arg(short, long, value_enum)]
        mark: Option<Mark>,

        /// Marks in a row needed to win (defaults to the board side)
        #[arg(long)]
        win_length: Option<usize>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}
