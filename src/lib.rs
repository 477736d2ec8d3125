//! Strictly Noughts - tic-tac-toe against a positional heuristic
//!
//! # Architecture
//!
//! - **Games**: board geometry, rules, the scoring opponent and the
//!   [`GameController`] state machine
//! - **Session**: async actor that owns a controller and paces the
//!   computer's turn
//! - **Config**: TOML-backed session options
//! - **Console**: line-oriented terminal front end
//!
//! # Example
//!
//! ```
//! use strictly_noughts::{GameConfig, GameController, Phase};
//!
//! let mut game = GameController::new(GameConfig::default());
//! game.apply_human_move(4).unwrap();
//! assert_eq!(game.phase(), Phase::ComputerThinking);
//! assert_eq!(game.play_computer_turn(), Ok(0));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod console;
mod games;
mod session;

pub mod cli;

// Crate-level exports - Configuration
pub use config::{ConfigError, GameConfig};

// Crate-level exports - Terminal front end
pub use console::{BoardMirror, ConsoleInput, Suggestion, render_suggestion, run_console, suggest};

// Crate-level exports - Session actor
pub use session::{GameSession, SessionCommand, SessionError, SessionHandle};

// Crate-level exports - Game types (tic-tac-toe)
pub use games::tictactoe::{
    AlternatingTurnInvariant, Board, BoardParseError, CellScore, ControllerInvariants, Coord,
    DEFAULT_SIZE, Direction, GameController, GameError, GameEvent, GameStatus, Grid,
    HistoryConsistentInvariant, Invariant, InvariantSet, InvariantViolation, Line, Mark,
    MarkAssignment, MonotonicBoardInvariant, Move, Observers, Phase, Player, RoundInfo, Square,
    SubscriptionId, score_cells, select_move,
};

/// Win and draw rules.
pub use games::tictactoe::rules;
