//! Coordinate math for square boards.
//!
//! A [`Grid`] fixes the board side `size` and the `win_length` needed in a
//! row. Everything here is pure: no board contents are consulted.

use super::action::GameError;
use super::types::DEFAULT_SIZE;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::instrument;

/// Column/row pair on a grid. Only [`Grid`] constructs these, so a `Coord`
/// is always in bounds for the grid that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    x: usize,
    y: usize,
}

impl Coord {
    /// Column, counted from the left.
    pub fn x(&self) -> usize {
        self.x
    }

    /// Row, counted from the top.
    pub fn y(&self) -> usize {
        self.y
    }

    /// `max(|dx|, |dy|)`.
    pub fn chebyshev(&self, other: &Coord) -> usize {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }
}

/// One of the four line families through a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter)]
pub enum Direction {
    /// Step `(1, 0)`.
    Horizontal,
    /// Step `(0, 1)`.
    Vertical,
    /// Step `(1, 1)`.
    Diagonal,
    /// Step `(1, -1)`.
    AntiDiagonal,
}

impl Direction {
    /// Unit step `(dx, dy)`.
    pub fn step(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (1, 0),
            Direction::Vertical => (0, 1),
            Direction::Diagonal => (1, 1),
            Direction::AntiDiagonal => (1, -1),
        }
    }
}

/// Cells along one direction through a reference cell, ordered by
/// increasing step from `-(win_length - 1)` to `win_length - 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    direction: Direction,
    cells: Vec<usize>,
}

impl Line {
    /// Direction of the line.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Board indices in walk order.
    pub fn cells(&self) -> &[usize] {
        &self.cells
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false for lines produced by [`Grid::lines_through`].
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Board geometry: side length and win length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid {
    size: usize,
    win_length: usize,
}

impl Grid {
    /// Creates a grid. `win_length` is clamped to `1..=size`.
    pub fn new(size: usize, win_length: usize) -> Self {
        Self {
            size,
            win_length: win_length.clamp(1, size.max(1)),
        }
    }

    /// Side length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Marks needed in a row to win.
    pub fn win_length(&self) -> usize {
        self.win_length
    }

    /// Number of cells.
    pub fn cell_count(&self) -> usize {
        self.size * self.size
    }

    /// True if `(x, y)` lies on the grid.
    pub fn contains(&self, x: isize, y: isize) -> bool {
        let size = self.size as isize;
        (0..size).contains(&x) && (0..size).contains(&y)
    }

    /// Coordinate of a linear index.
    #[instrument]
    pub fn position_of(&self, index: usize) -> Result<Coord, GameError> {
        if index >= self.cell_count() {
            return Err(GameError::IndexOutOfRange(index));
        }
        Ok(Coord {
            x: index % self.size,
            y: index / self.size,
        })
    }

    /// Linear index of `(x, y)`.
    ///
    /// The error carries the would-be row-major index.
    #[instrument]
    pub fn index_of(&self, x: usize, y: usize) -> Result<usize, GameError> {
        if x >= self.size || y >= self.size {
            let index = y.saturating_mul(self.size).saturating_add(x);
            return Err(GameError::IndexOutOfRange(index));
        }
        Ok(y * self.size + x)
    }

    /// Linear index of a coordinate produced by this grid.
    pub fn index_at(&self, coord: Coord) -> usize {
        coord.y * self.size + coord.x
    }

    /// Coordinate of `(x, y)`.
    pub fn coord(&self, x: usize, y: usize) -> Result<Coord, GameError> {
        self.index_of(x, y).map(|_| Coord { x, y })
    }

    /// Chebyshev distance between two indices.
    #[instrument]
    pub fn chebyshev_distance(&self, a: usize, b: usize) -> Result<usize, GameError> {
        Ok(self.position_of(a)?.chebyshev(&self.position_of(b)?))
    }

    /// Lines through `coord`, one per direction, in the order horizontal,
    /// vertical, diagonal, anti-diagonal. Directions that fit fewer than
    /// `win_length` cells on the board are left out.
    pub fn lines_through(&self, coord: Coord) -> Vec<Line> {
        let reach = self.win_length as isize - 1;
        let (x, y) = (coord.x as isize, coord.y as isize);

        Direction::iter()
            .filter_map(|direction| {
                let (dx, dy) = direction.step();
                let cells: Vec<usize> = (-reach..=reach)
                    .map(|i| (x + i * dx, y + i * dy))
                    .filter(|&(nx, ny)| self.contains(nx, ny))
                    .map(|(nx, ny)| ny as usize * self.size + nx as usize)
                    .collect();
                (cells.len() >= self.win_length).then_some(Line { direction, cells })
            })
            .collect()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(DEFAULT_SIZE, DEFAULT_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        let grid = Grid::default();
        let coord = grid.position_of(5).unwrap();
        assert_eq!((coord.x(), coord.y()), (2, 1));
        assert_eq!(grid.index_of(2, 1), Ok(5));
    }

    #[test]
    fn test_out_of_bounds() {
        let grid = Grid::default();
        assert_eq!(grid.position_of(9), Err(GameError::IndexOutOfRange(9)));
        assert!(grid.index_of(3, 0).is_err());
        assert!(grid.index_of(0, 3).is_err());
        assert!(grid.chebyshev_distance(0, 12).is_err());
    }

    #[test]
    fn test_far_coordinates_error_without_overflow() {
        let grid = Grid::default();
        assert_eq!(
            grid.index_of(0, usize::MAX),
            Err(GameError::IndexOutOfRange(usize::MAX))
        );
        assert_eq!(
            grid.index_of(usize::MAX, 1),
            Err(GameError::IndexOutOfRange(usize::MAX))
        );
        assert!(grid.coord(usize::MAX, usize::MAX).is_err());
    }

    #[test]
    fn test_center_has_four_lines() {
        let grid = Grid::default();
        let center = grid.position_of(4).unwrap();
        let lines: Vec<Vec<usize>> = grid
            .lines_through(center)
            .iter()
            .map(|l| l.cells().to_vec())
            .collect();
        assert_eq!(
            lines,
            vec![vec![3, 4, 5], vec![1, 4, 7], vec![0, 4, 8], vec![6, 4, 2]]
        );
    }

    #[test]
    fn test_edge_has_only_row_and_column() {
        let grid = Grid::default();
        let lines = grid.lines_through(grid.position_of(1).unwrap());
        let directions: Vec<Direction> = lines.iter().map(Line::direction).collect();
        assert_eq!(directions, vec![Direction::Horizontal, Direction::Vertical]);
        assert_eq!(lines[1].cells(), &[1, 4, 7]);
    }

    #[test]
    fn test_anti_diagonal_order_follows_step() {
        let grid = Grid::default();
        let lines = grid.lines_through(grid.position_of(2).unwrap());
        let anti = lines
            .iter()
            .find(|l| l.direction() == Direction::AntiDiagonal)
            .unwrap();
        // step -2 lands on (0, 2), step 0 on (2, 0)
        assert_eq!(anti.cells(), &[6, 4, 2]);
    }

    #[test]
    fn test_larger_grid_lines_grow_to_five() {
        let grid = Grid::new(5, 3);
        let lines = grid.lines_through(grid.position_of(12).unwrap());
        assert_eq!(lines.len(), 4);
        assert!(lines.iter().all(|l| l.len() == 5));
    }

    #[test]
    fn test_chebyshev() {
        let grid = Grid::default();
        assert_eq!(grid.chebyshev_distance(0, 8), Ok(2));
        assert_eq!(grid.chebyshev_distance(4, 1), Ok(1));
        assert_eq!(grid.chebyshev_distance(3, 3), Ok(0));
    }
}
