//! Line-oriented terminal front end.
//!
//! Mirrors the board from [`GameEvent::CellChanged`] notifications and
//! prints it on every status change. Input lines are cell numbers, `r` to
//! restart or `q` to quit.

use crate::config::GameConfig;
use crate::games::tictactoe::{
    Board, CellScore, GameEvent, Grid, Mark, RoundInfo, rules, score_cells, select_move,
};
use crate::session::GameSession;
use anyhow::{Context, Result};
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, instrument};

/// Parsed line of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleInput {
    /// Click on a cell.
    Cell(usize),
    /// Start over.
    Restart,
    /// Leave.
    Quit,
    /// Blank line.
    Nothing,
    /// Anything else.
    Unknown,
}

impl ConsoleInput {
    /// Parses one input line.
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return ConsoleInput::Nothing;
        }
        if let Ok(index) = line.parse::<usize>() {
            return ConsoleInput::Cell(index);
        }
        match line.to_ascii_lowercase().as_str() {
            "r" | "restart" => ConsoleInput::Restart,
            "q" | "quit" | "exit" => ConsoleInput::Quit,
            _ => ConsoleInput::Unknown,
        }
    }
}

/// Board copy kept in sync with controller events.
#[derive(Debug, Clone)]
pub struct BoardMirror {
    board: Board,
}

impl BoardMirror {
    /// Empty mirror for a board of `size`.
    pub fn new(size: usize) -> Self {
        Self {
            board: Board::with_size(size),
        }
    }

    /// Folds one event into the mirror. Returns the status line to print,
    /// if the event carries one.
    pub fn apply(&mut self, event: &GameEvent) -> Option<RoundInfo> {
        match *event {
            GameEvent::CellChanged { index, square } => {
                match square.mark() {
                    // Only a restart empties squares, and it empties all of them.
                    None if !self.board.is_vacant(index) => self.board.reset(),
                    None => {}
                    Some(mark) => {
                        if let Err(err) = self.board.place(index, mark) {
                            debug!(error = %err, "Mirror out of step");
                        }
                    }
                }
                None
            }
            GameEvent::StatusChanged { info, .. } => Some(info),
        }
    }

    /// Current mirrored board.
    pub fn board(&self) -> &Board {
        &self.board
    }
}

/// Runs an interactive game on stdin/stdout until the user quits.
#[instrument(skip(config))]
pub async fn run_console(config: GameConfig) -> Result<()> {
    let cells = config.grid().cell_count();
    let mut mirror = BoardMirror::new(*config.board_size());
    let (session, mut events) = GameSession::spawn(config)?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Strictly Noughts");
    println!("Type a cell number to play, 'r' to restart, 'q' to quit.\n");

    loop {
        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else { break };
                if let Some(info) = mirror.apply(&event) {
                    println!("{}\n", mirror.board());
                    println!("{info}");
                    if info.phase.is_over() {
                        println!("Enter any cell number to play again.");
                    }
                }
            }
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read stdin")? else { break };
                match ConsoleInput::parse(&line) {
                    ConsoleInput::Cell(index) if index < cells => session.click(index)?,
                    ConsoleInput::Cell(index) => {
                        println!("There is no cell {index}; pick 0-{}.", cells - 1);
                    }
                    ConsoleInput::Restart => session.restart()?,
                    ConsoleInput::Quit => break,
                    ConsoleInput::Nothing => {}
                    ConsoleInput::Unknown => println!("Type a cell number, 'r' or 'q'."),
                }
            }
        }
    }

    let controller = session.shutdown().await?;
    debug!(round = controller.round(), "Console closed");
    println!("Bye.");
    Ok(())
}

/// Heuristic evaluation of a board, as printed by `suggest`.
#[derive(Debug, Clone, Serialize)]
pub struct Suggestion {
    /// Mark the heuristic played for.
    pub mark: Mark,
    /// Chosen index, absent for a full board.
    pub choice: Option<usize>,
    /// Every empty cell's score, in scan order.
    pub scores: Vec<CellScore>,
    /// Mark already holding a completed line, if any.
    pub existing_winner: Option<Mark>,
}

/// Evaluates `board` for `mark`, defaulting to the mark due next.
#[instrument]
pub fn suggest(board: &Board, mark: Option<Mark>, win_length: Option<usize>) -> Suggestion {
    let grid = Grid::new(board.size(), win_length.unwrap_or(board.size()));
    let mark = mark.unwrap_or_else(|| Mark::for_round(board.occupied_count() as u32));
    Suggestion {
        mark,
        choice: select_move(board, &grid, mark),
        scores: score_cells(board, &grid, mark),
        existing_winner: rules::check_winner(board, &grid),
    }
}

/// Human-readable rendering of a suggestion.
pub fn render_suggestion(board: &Board, suggestion: &Suggestion) -> String {
    let mut out = format!("{board}\n\nPlaying {}\n", suggestion.mark);
    if let Some(winner) = suggestion.existing_winner {
        out.push_str(&format!("Note: {winner} already has a line\n"));
    }
    for CellScore { index, score } in &suggestion.scores {
        out.push_str(&format!("  cell {index}: {score}\n"));
    }
    match suggestion.choice {
        Some(index) => out.push_str(&format!("Choice: {index}")),
        None => out.push_str("Board is full"),
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::{Phase, Player, Square};

    #[test]
    fn test_parse_input() {
        assert_eq!(ConsoleInput::parse(" 4 "), ConsoleInput::Cell(4));
        assert_eq!(ConsoleInput::parse("R"), ConsoleInput::Restart);
        assert_eq!(ConsoleInput::parse("quit"), ConsoleInput::Quit);
        assert_eq!(ConsoleInput::parse(""), ConsoleInput::Nothing);
        assert_eq!(ConsoleInput::parse("x"), ConsoleInput::Unknown);
    }

    #[test]
    fn test_mirror_follows_events() {
        let mut mirror = BoardMirror::new(3);
        let placed = GameEvent::CellChanged {
            index: 4,
            square: Square::Occupied(Mark::O),
        };
        assert_eq!(mirror.apply(&placed), None);
        assert_eq!(mirror.board().get(4), Ok(Square::Occupied(Mark::O)));

        let cleared = GameEvent::CellChanged {
            index: 4,
            square: Square::Empty,
        };
        mirror.apply(&cleared);
        assert_eq!(mirror.board().occupied_count(), 0);
    }

    #[test]
    fn test_status_event_yields_info() {
        let mut mirror = BoardMirror::new(3);
        let info = RoundInfo {
            round: 0,
            to_move: Player::Human,
            mark: Mark::O,
            phase: Phase::AwaitingHumanMove,
        };
        let event = GameEvent::StatusChanged {
            phase: info.phase,
            info,
        };
        assert_eq!(mirror.apply(&event), Some(info));
    }

    #[test]
    fn test_suggest_defaults_to_mark_due_next() {
        let board: Board = "....O....".parse().unwrap();
        let suggestion = suggest(&board, None, None);
        assert_eq!(suggestion.mark, Mark::X);
        assert_eq!(suggestion.choice, Some(0));
        assert_eq!(suggestion.existing_winner, None);
        assert!(render_suggestion(&board, &suggestion).ends_with("Choice: 0"));
    }
}
