//! First-class move records and move errors.
//!
//! Moves are domain events, not side effects: the controller keeps a history
//! of them so invariants can replay the game independently of the board.

use super::{Mark, Player};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A mark placed by a player on a given round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The player making the move.
    pub player: Player,
    /// The mark that was placed.
    pub mark: Mark,
    /// Board index of the placement.
    pub index: usize,
    /// Round on which the move was made (0-based).
    pub round: u32,
}

impl Move {
    /// Creates a new move.
    #[instrument]
    pub fn new(player: Player, mark: Mark, index: usize, round: u32) -> Self {
        Self {
            player,
            mark,
            index,
            round,
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "round {}: {} plays {} at {}",
            self.round, self.player, self.mark, self.index
        )
    }
}

/// Error raised by board and controller operations.
///
/// `IndexOutOfRange` is a caller bug and is always propagated. The other
/// variants are ordinary rule violations which the controller swallows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum GameError {
    /// Index or coordinate outside the board.
    #[display("Index {} is out of range", _0)]
    IndexOutOfRange(usize),

    /// The square at the index is already occupied.
    #[display("Square {} is already occupied", _0)]
    SquareOccupied(usize),

    /// It is not the mover's turn.
    #[display("It's not {}'s turn", _0)]
    NotYourTurn(Player),

    /// The game is already over.
    #[display("Game is already over")]
    GameOver,
}

impl GameError {
    /// True for rule violations that are ignored rather than propagated.
    pub fn is_invalid_move(&self) -> bool {
        !matches!(self, GameError::IndexOutOfRange(_))
    }
}

impl std::error::Error for GameError {}
