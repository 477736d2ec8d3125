//! Tests for board geometry.

use std::collections::HashSet;
use strictly_noughts::{Direction, GameError, Grid};

fn assert_lines_well_formed(grid: &Grid) {
    for index in 0..grid.cell_count() {
        let coord = grid.position_of(index).expect("index on board");
        for line in grid.lines_through(coord) {
            let cells = line.cells();
            let distinct: HashSet<_> = cells.iter().collect();
            assert_eq!(distinct.len(), cells.len(), "repeated cell in {cells:?}");
            assert!(cells.iter().all(|&c| c < grid.cell_count()));
            assert!((3..=5).contains(&cells.len()), "bad length {cells:?}");
            assert!(cells.contains(&index), "{cells:?} misses {index}");
        }
    }
}

#[test]
fn test_lines_are_distinct_in_range_and_sized() {
    assert_lines_well_formed(&Grid::default());
    assert_lines_well_formed(&Grid::new(5, 3));
    assert_lines_well_formed(&Grid::new(7, 3));
}

#[test]
fn test_every_cell_sees_row_and_column() {
    let grid = Grid::default();
    for index in 0..9 {
        let lines = grid.lines_through(grid.position_of(index).unwrap());
        let directions: Vec<Direction> = lines.iter().map(|l| l.direction()).collect();
        assert_eq!(&directions[..2], &[Direction::Horizontal, Direction::Vertical]);
    }
}

#[test]
fn test_corners_and_center_see_diagonals() {
    let grid = Grid::default();
    let count = |i| grid.lines_through(grid.position_of(i).unwrap()).len();
    assert_eq!(count(4), 4);
    for corner in [0, 2, 6, 8] {
        assert_eq!(count(corner), 3);
    }
    for edge in [1, 3, 5, 7] {
        assert_eq!(count(edge), 2);
    }
}

#[test]
fn test_position_and_index_are_inverse() {
    let grid = Grid::default();
    for index in 0..9 {
        let coord = grid.position_of(index).unwrap();
        assert_eq!(grid.index_of(coord.x(), coord.y()), Ok(index));
    }
    assert_eq!(grid.position_of(9), Err(GameError::IndexOutOfRange(9)));
}
