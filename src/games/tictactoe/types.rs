//! Core domain types for tic-tac-toe.

use super::action::GameError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::instrument;

/// Default board dimension.
pub const DEFAULT_SIZE: usize = 3;

/// Mark placed on the board.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, clap::ValueEnum,
)]
pub enum Mark {
    /// Mark X (placed on odd rounds).
    X,
    /// Mark O (placed on even rounds, so always by the starting player).
    O,
}

impl Mark {
    /// Returns the other mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Mark placed on the given round.
    pub fn for_round(round: u32) -> Self {
        if round % 2 == 0 { Mark::O } else { Mark::X }
    }
}

/// Logical participant in a session.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    /// The person at the keyboard.
    #[default]
    Human,
    /// The heuristic opponent.
    Computer,
}

impl Player {
    /// Returns the other player.
    pub fn opponent(self) -> Self {
        match self {
            Player::Human => Player::Computer,
            Player::Computer => Player::Human,
        }
    }
}

/// Which player holds which mark for one session.
///
/// The starting player always holds `O`, since `O` is placed on even rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkAssignment {
    human: Mark,
    computer: Mark,
}

impl MarkAssignment {
    /// Derives the assignment from the starting player.
    pub fn for_starter(starter: Player) -> Self {
        let starter_mark = Mark::for_round(0);
        match starter {
            Player::Human => Self {
                human: starter_mark,
                computer: starter_mark.opponent(),
            },
            Player::Computer => Self {
                human: starter_mark.opponent(),
                computer: starter_mark,
            },
        }
    }

    /// Mark held by `player`.
    pub fn mark_of(&self, player: Player) -> Mark {
        match player {
            Player::Human => self.human,
            Player::Computer => self.computer,
        }
    }

    /// Player holding `mark`.
    pub fn owner_of(&self, mark: Mark) -> Player {
        if mark == self.human {
            Player::Human
        } else {
            Player::Computer
        }
    }
}

/// A square on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    #[default]
    Empty,
    /// Square occupied by a mark.
    Occupied(Mark),
}

impl Square {
    /// Returns the mark on this square, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Square::Empty => None,
            Square::Occupied(mark) => Some(mark),
        }
    }
}

/// Square board stored in row-major order (`index = y * size + x`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    squares: Vec<Square>,
}

impl Board {
    /// Creates an empty 3x3 board.
    pub fn new() -> Self {
        Self::with_size(DEFAULT_SIZE)
    }

    /// Creates an empty `size` x `size` board.
    pub fn with_size(size: usize) -> Self {
        Self {
            size,
            squares: vec![Square::Empty; size * size],
        }
    }

    /// Side length of the board.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of squares.
    pub fn len(&self) -> usize {
        self.squares.len()
    }

    /// True for a zero-sized board.
    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }

    /// Gets the square at `index`.
    pub fn get(&self, index: usize) -> Result<Square, GameError> {
        self.squares
            .get(index)
            .copied()
            .ok_or(GameError::IndexOutOfRange(index))
    }

    /// True if `index` is on the board and empty.
    pub fn is_vacant(&self, index: usize) -> bool {
        matches!(self.squares.get(index), Some(Square::Empty))
    }

    /// Places `mark` at `index`.
    ///
    /// This is the only way a square changes outside of [`Board::reset`].
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` for an index past the board, `SquareOccupied` when
    /// the square already holds a mark. The board is unchanged on error.
    #[instrument(skip(self))]
    pub fn place(&mut self, index: usize, mark: Mark) -> Result<(), GameError> {
        let square = self
            .squares
            .get_mut(index)
            .ok_or(GameError::IndexOutOfRange(index))?;
        if *square != Square::Empty {
            return Err(GameError::SquareOccupied(index));
        }
        *square = Square::Occupied(mark);
        Ok(())
    }

    /// True when no square is empty.
    pub fn is_full(&self) -> bool {
        self.squares.iter().all(|s| *s != Square::Empty)
    }

    /// Clears every square.
    pub fn reset(&mut self) {
        self.squares.fill(Square::Empty);
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square] {
        &self.squares
    }

    /// Indices of the empty squares, ascending.
    pub fn vacant_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter(|(_, s)| **s == Square::Empty)
            .map(|(i, _)| i)
    }

    /// Number of occupied squares.
    pub fn occupied_count(&self) -> usize {
        self.squares.iter().filter(|s| **s != Square::Empty).count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.len().saturating_sub(1).to_string().len();
        for row in 0..self.size {
            if row > 0 {
                let rule = vec!["-".repeat(width); self.size].join("+");
                writeln!(f)?;
                writeln!(f, "{rule}")?;
            }
            for col in 0..self.size {
                let index = row * self.size + col;
                if col > 0 {
                    f.write_str("|")?;
                }
                match self.squares[index] {
                    Square::Empty => write!(f, "{index:>width$}")?,
                    Square::Occupied(mark) => write!(f, "{mark:>width$}")?,
                }
            }
        }
        Ok(())
    }
}

/// Error parsing a board from text.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum BoardParseError {
    /// The cell count is not a perfect square.
    #[display("{} cells do not form a square board", _0)]
    NotSquare(usize),
    /// A character other than `X`, `O`, `.`, `_` or `-`.
    #[display("unexpected character {:?} in board text", _0)]
    BadCell(char),
}

impl std::error::Error for BoardParseError {}

impl FromStr for Board {
    type Err = BoardParseError;

    /// Parses row-major cell text such as `"OX.\n.O.\n..X"`.
    ///
    /// Whitespace and `|` separators are skipped; `.`, `_` and `-` are empty.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let squares = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '|')
            .map(|c| match c.to_ascii_uppercase() {
                'X' => Ok(Square::Occupied(Mark::X)),
                'O' => Ok(Square::Occupied(Mark::O)),
                '.' | '_' | '-' => Ok(Square::Empty),
                other => Err(BoardParseError::BadCell(other)),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let size = (0..=squares.len())
            .find(|n| n * n >= squares.len())
            .unwrap_or_default();
        if size * size != squares.len() || size == 0 {
            return Err(BoardParseError::NotSquare(squares.len()));
        }
        Ok(Self { size, squares })
    }
}

/// Status of a game as judged by the rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// Board filled with no winner.
    Draw,
    /// A player completed a line.
    Win(Player),
}

impl GameStatus {
    /// True for `Draw` and `Win`.
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    /// Returns the winner if there is one.
    pub fn winner(self) -> Option<Player> {
        match self {
            GameStatus::Win(player) => Some(player),
            _ => None,
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::InProgress => write!(f, "In progress"),
            GameStatus::Draw => write!(f, "Draw"),
            GameStatus::Win(Player::Human) => write!(f, "You win"),
            GameStatus::Win(Player::Computer) => write!(f, "Computer wins"),
        }
    }
}
