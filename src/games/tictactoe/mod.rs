//! Tic-tac-toe against a positional heuristic.
//!
//! Leaf-first: `geometry` does coordinate math, `types` holds the board,
//! `rules` judges it, `heuristic` picks the computer's square and
//! `controller` sequences all of them for one session.

mod action;
mod controller;
mod geometry;
mod heuristic;
mod invariants;
mod observer;
mod phases;
mod types;

pub mod rules;

pub use action::{GameError, Move};
pub use controller::GameController;
pub use geometry::{Coord, Direction, Grid, Line};
pub use heuristic::{CellScore, score_cells, select_move};
pub use invariants::{
    AlternatingTurnInvariant, ControllerInvariants, HistoryConsistentInvariant, Invariant,
    InvariantSet, InvariantViolation, MonotonicBoardInvariant,
};
pub use observer::{GameEvent, Observers, SubscriptionId};
pub use phases::{Phase, RoundInfo};
pub use types::{Board, BoardParseError, DEFAULT_SIZE, GameStatus, Mark, MarkAssignment, Player, Square};
