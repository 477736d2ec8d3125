//! Draw detection logic for tic-tac-toe.

use super::super::{Board, Grid};
use super::win::check_winner;
use tracing::instrument;

/// Checks if the board is full (all squares occupied).
#[instrument]
pub fn is_full(board: &Board) -> bool {
    board.is_full()
}

/// A full board with no completed line anywhere.
#[instrument]
pub fn is_draw(board: &Board, grid: &Grid) -> bool {
    is_full(board) && check_winner(board, grid).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::Mark;

    #[test]
    fn test_empty_board_not_full() {
        let board = Board::new();
        assert!(!is_full(&board));
    }

    #[test]
    fn test_partial_board_not_full() {
        let mut board = Board::new();
        board.place(4, Mark::X).unwrap();
        assert!(!is_full(&board));
    }

    #[test]
    fn test_draw_detection() {
        // O X O / O X X / X O O
        let board: Board = "OXO OXX XOO".parse().unwrap();
        assert!(is_draw(&board, &Grid::default()));
    }

    #[test]
    fn test_not_draw_if_winner() {
        let board: Board = "XXX OOX OXO".parse().unwrap();
        assert!(is_full(&board));
        assert!(!is_draw(&board, &Grid::default()));
    }
}
