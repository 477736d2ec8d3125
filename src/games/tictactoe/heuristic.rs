//! Positional scoring opponent.
//!
//! Every empty cell is scored from the lines through it. Own marks on a line
//! add `4^(n+1)` and opposing marks subtract `3^(n+1)`, where `n` counts the
//! earlier marks of the same side on that line; each term is reduced by the
//! Chebyshev distance to the contributing mark. Line scores are summed as
//! absolute values, so strong attacks and strong blocks both attract the AI.
//!
//! This is a one-ply heuristic, not a search. It can walk into a loss.

use super::{Board, Grid, Mark, Square};
use serde::Serialize;
use tracing::{debug, instrument, trace};

/// Heuristic score of one empty cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellScore {
    /// Board index.
    pub index: usize,
    /// Sum of absolute line scores.
    pub score: i64,
}

/// Scores every empty cell for `ai_mark`, in scan order (column by column,
/// top to bottom within a column).
#[instrument(skip(board))]
pub fn score_cells(board: &Board, grid: &Grid, ai_mark: Mark) -> Vec<CellScore> {
    let mut scores = Vec::new();

    for x in 0..grid.size() {
        for y in 0..grid.size() {
            let Ok(coord) = grid.coord(x, y) else {
                continue;
            };
            let index = grid.index_at(coord);
            if !board.is_vacant(index) {
                continue;
            }

            let mut score = 0i64;
            for line in grid.lines_through(coord) {
                let mut line_score = 0i64;
                let mut same_ai = 0u32;
                let mut same_other = 0u32;

                for &cell in line.cells() {
                    let Ok(Square::Occupied(mark)) = board.get(cell) else {
                        continue;
                    };
                    let distance = grid
                        .position_of(cell)
                        .map(|c| c.chebyshev(&coord) as i64)
                        .unwrap_or_default();
                    if mark == ai_mark {
                        line_score += 4i64.pow(same_ai + 1) - distance;
                        same_ai += 1;
                    } else {
                        line_score -= 3i64.pow(same_other + 1) - distance;
                        same_other += 1;
                    }
                }

                trace!(index, direction = ?line.direction(), line_score, "Line scored");
                score += line_score.abs();
            }

            scores.push(CellScore { index, score });
        }
    }

    scores
}

/// Picks the AI's move: the highest-scoring empty cell, ties going to the
/// first cell in scan order.
///
/// Returns `None` only when the board has no empty cell.
#[instrument(skip(board))]
pub fn select_move(board: &Board, grid: &Grid, ai_mark: Mark) -> Option<usize> {
    let mut best: Option<CellScore> = None;
    for candidate in score_cells(board, grid, ai_mark) {
        if best.is_none_or(|b| candidate.score > b.score) {
            best = Some(candidate);
        }
    }

    if let Some(choice) = best {
        debug!(index = choice.index, score = choice.score, "Heuristic choice");
    }
    best.map(|b| b.index)
}
