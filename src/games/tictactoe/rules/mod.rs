//! Game rules for tic-tac-toe.
//!
//! Pure functions over a board and its grid. Rules are kept apart from board
//! storage so the controller, the invariants and the CLI can share them.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{check_outcome, check_winner, completes_line};
