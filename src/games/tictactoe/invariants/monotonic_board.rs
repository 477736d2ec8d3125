//! Monotonic board invariant: squares never change once set.

use super::super::{Board, GameController};
use super::Invariant;

/// Invariant: the board equals its move history replayed onto an empty board.
///
/// Replaying fails if any move lands on an occupied square, so this also
/// shows that no square was overwritten.
pub struct MonotonicBoardInvariant;

impl Invariant<GameController> for MonotonicBoardInvariant {
    fn holds(game: &GameController) -> bool {
        let mut reconstructed = Board::with_size(game.board().size());

        game.history()
            .iter()
            .all(|mov| reconstructed.place(mov.index, mov.mark).is_ok())
            && reconstructed == *game.board()
    }

    fn description() -> &'static str {
        "Board squares are monotonic (never overwritten)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::games::tictactoe::{Mark, Square};

    #[test]
    fn test_empty_game_holds() {
        let game = GameController::new(GameConfig::default());
        assert!(MonotonicBoardInvariant::holds(&game));
    }

    #[test]
    fn test_moves_hold() {
        let mut game = GameController::new(GameConfig::default());
        game.apply_human_move(0).unwrap();
        game.play_computer_turn().unwrap();
        assert!(MonotonicBoardInvariant::holds(&game));
    }

    #[test]
    fn test_overwritten_square_violates() {
        let mut game = GameController::new(GameConfig::default());
        game.apply_human_move(4).unwrap();
        game.board.reset();
        game.board.place(4, Mark::X).unwrap();

        assert_eq!(game.board().get(4), Ok(Square::Occupied(Mark::X)));
        assert!(!MonotonicBoardInvariant::holds(&game));
    }
}
