//! Win detection logic for tic-tac-toe.

use super::super::{Board, GameError, GameStatus, Grid, Mark, MarkAssignment, Square};
use tracing::{debug, instrument};

/// Checks whether the mark at `index` sits in `win_length` equal marks in a
/// row along any line through it.
///
/// Returns the mark when it does, `None` for an empty square or no line.
///
/// # Errors
///
/// `IndexOutOfRange` when `index` is not on the board.
#[instrument(skip(board))]
pub fn completes_line(board: &Board, grid: &Grid, index: usize) -> Result<Option<Mark>, GameError> {
    let Some(mark) = board.get(index)?.mark() else {
        return Ok(None);
    };
    let coord = grid.position_of(index)?;
    let target = Square::Occupied(mark);

    let won = grid.lines_through(coord).iter().any(|line| {
        line.cells()
            .windows(grid.win_length())
            .any(|window| window.iter().all(|&i| board.get(i) == Ok(target)))
    });

    Ok(won.then_some(mark))
}

/// Judges the game after a mark was placed at `last_index`.
///
/// A completed line wins for whichever player holds the mark in `marks`;
/// otherwise a full board is a draw.
///
/// # Errors
///
/// `IndexOutOfRange` when `last_index` is not on the board.
#[instrument(skip(board, marks))]
pub fn check_outcome(
    board: &Board,
    grid: &Grid,
    last_index: usize,
    marks: &MarkAssignment,
) -> Result<GameStatus, GameError> {
    if board.get(last_index)? == Square::Empty {
        return Ok(GameStatus::InProgress);
    }

    if let Some(mark) = completes_line(board, grid, last_index)? {
        let winner = marks.owner_of(mark);
        debug!(%mark, %winner, "Line completed");
        return Ok(GameStatus::Win(winner));
    }

    if board.is_full() {
        debug!("Board full without a line");
        Ok(GameStatus::Draw)
    } else {
        Ok(GameStatus::InProgress)
    }
}

/// Scans the whole board for a completed line.
#[instrument(skip(board))]
pub fn check_winner(board: &Board, grid: &Grid) -> Option<Mark> {
    (0..board.len()).find_map(|index| completes_line(board, grid, index).ok().flatten())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::Player;

    fn human_first() -> MarkAssignment {
        MarkAssignment::for_starter(Player::Human)
    }

    #[test]
    fn test_no_winner_empty_board() {
        let board = Board::new();
        assert_eq!(check_winner(&board, &Grid::default()), None);
    }

    #[test]
    fn test_winner_top_row() {
        let board: Board = "OOO ... ...".parse().unwrap();
        let status = check_outcome(&board, &Grid::default(), 2, &human_first()).unwrap();
        assert_eq!(status, GameStatus::Win(Player::Human));
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let board: Board = "..X .X. XOO".parse().unwrap();
        let status = check_outcome(&board, &Grid::default(), 4, &human_first()).unwrap();
        assert_eq!(status, GameStatus::Win(Player::Computer));
    }

    #[test]
    fn test_empty_last_cell_is_in_progress() {
        let board: Board = "OOO ... ...".parse().unwrap();
        let status = check_outcome(&board, &Grid::default(), 8, &human_first()).unwrap();
        assert_eq!(status, GameStatus::InProgress);
    }

    #[test]
    fn test_only_lines_through_last_cell_count() {
        // Row 0 is complete, but the last move at 8 is not on it.
        let board: Board = "OOO ... ..X".parse().unwrap();
        let status = check_outcome(&board, &Grid::default(), 8, &human_first()).unwrap();
        assert_eq!(status, GameStatus::InProgress);
    }

    #[test]
    fn test_out_of_range() {
        let board = Board::new();
        assert_eq!(
            check_outcome(&board, &Grid::default(), 9, &human_first()),
            Err(GameError::IndexOutOfRange(9))
        );
    }

    #[test]
    fn test_window_on_larger_board() {
        let mut board = Board::with_size(4);
        let grid = Grid::new(4, 3);
        for index in [5, 6, 7] {
            board.place(index, Mark::X).unwrap();
        }
        assert_eq!(completes_line(&board, &grid, 7), Ok(Some(Mark::X)));
        assert_eq!(completes_line(&board, &grid, 4), Ok(None));
    }
}
