//! Session state machine.
//!
//! [`GameController`] is the only entry point a presentation layer needs. It
//! owns the board, the round counter and the phase, and announces every
//! change through its [`Observers`].
//!
//! The controller is synchronous. It never sleeps: the computer's thinking
//! pause belongs to whoever drives it (see [`crate::session`]), which calls
//! [`GameController::choose_computer_move`], waits, then calls
//! [`GameController::apply_computer_move`].

use super::action::{GameError, Move};
use super::heuristic;
use super::invariants::assert_invariants;
use super::observer::{GameEvent, Observers, SubscriptionId};
use super::phases::{Phase, RoundInfo};
use super::rules;
use super::{Board, GameStatus, Grid, Mark, MarkAssignment, Player, Square};
use crate::config::GameConfig;
use tracing::{debug, info, instrument, warn};

/// Turn-based tic-tac-toe session against the heuristic opponent.
#[derive(Debug)]
pub struct GameController {
    pub(super) config: GameConfig,
    pub(super) grid: Grid,
    pub(super) marks: MarkAssignment,
    pub(super) board: Board,
    pub(super) round: u32,
    pub(super) phase: Phase,
    pub(super) history: Vec<Move>,
    pub(super) observers: Observers,
}

impl GameController {
    /// Creates a controller in the session's initial phase.
    ///
    /// `config` should already be validated; [`GameConfig::validate`] errors
    /// trip a debug assertion here.
    #[instrument(skip(config), fields(starting_player = %config.starting_player()))]
    pub fn new(config: GameConfig) -> Self {
        debug_assert!(config.validate().is_ok(), "invalid config: {config:?}");
        let grid = config.grid();
        let starter = *config.starting_player();
        info!(size = grid.size(), win_length = grid.win_length(), "Creating game controller");
        Self {
            marks: MarkAssignment::for_starter(starter),
            board: Board::with_size(grid.size()),
            round: 0,
            phase: Phase::turn_of(starter),
            history: Vec::new(),
            observers: Observers::new(),
            grid,
            config,
        }
    }

    /// Session configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Board geometry.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Marks placed so far this session.
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Rule status of the session.
    pub fn status(&self) -> GameStatus {
        self.phase.status()
    }

    /// Mark assignment for this session.
    pub fn marks(&self) -> MarkAssignment {
        self.marks
    }

    /// Moves made since the last restart.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Player whose turn round parity gives.
    pub fn to_move(&self) -> Player {
        let starter = *self.config.starting_player();
        if self.round % 2 == 0 {
            starter
        } else {
            starter.opponent()
        }
    }

    /// Mark the next placement uses.
    pub fn current_mark(&self) -> Mark {
        Mark::for_round(self.round)
    }

    /// Round details for display.
    pub fn round_info(&self) -> RoundInfo {
        RoundInfo {
            round: self.round,
            to_move: self.to_move(),
            mark: self.current_mark(),
            phase: self.phase,
        }
    }

    /// Registers a change handler.
    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&GameEvent) + Send + 'static,
    {
        self.observers.subscribe(handler)
    }

    /// Removes a change handler.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Applies the human's mark at `index`.
    ///
    /// Returns `Ok(true)` when the mark was placed. Occupied squares, moves
    /// out of turn and moves after the game ended are ignored with
    /// `Ok(false)` and leave every piece of state untouched.
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` when `index` is not on the board.
    #[instrument(skip(self), fields(round = self.round, phase = ?self.phase))]
    pub fn apply_human_move(&mut self, index: usize) -> Result<bool, GameError> {
        match self.try_move(Player::Human, index) {
            Ok(()) => Ok(true),
            Err(err) if err.is_invalid_move() => {
                debug!(error = %err, "Ignoring human move");
                Ok(false)
            }
            Err(err) => {
                warn!(error = %err, "Rejected human move");
                Err(err)
            }
        }
    }

    /// Presentation click handler: restarts a finished game, otherwise
    /// behaves like [`GameController::apply_human_move`].
    #[instrument(skip(self))]
    pub fn click(&mut self, index: usize) -> Result<bool, GameError> {
        if self.phase.is_over() {
            self.restart();
            return Ok(false);
        }
        self.apply_human_move(index)
    }

    /// Picks the computer's square without placing it.
    ///
    /// Returns `None` outside `ComputerThinking`.
    #[instrument(skip(self))]
    pub fn choose_computer_move(&self) -> Option<usize> {
        if self.phase != Phase::ComputerThinking {
            return None;
        }
        heuristic::select_move(&self.board, &self.grid, self.marks.mark_of(Player::Computer))
    }

    /// Places the computer's mark at `index`.
    ///
    /// # Errors
    ///
    /// Any [`GameError`]: unlike human input, a bad computer move is a bug in
    /// the driver and is reported rather than ignored.
    #[instrument(skip(self), fields(round = self.round))]
    pub fn apply_computer_move(&mut self, index: usize) -> Result<(), GameError> {
        self.try_move(Player::Computer, index)
    }

    /// Chooses and applies the computer's move with no delay.
    ///
    /// Returns the chosen index.
    ///
    /// # Errors
    ///
    /// `NotYourTurn` outside `ComputerThinking` (or `GameOver` once finished).
    pub fn play_computer_turn(&mut self) -> Result<usize, GameError> {
        self.check_turn(Player::Computer)?;
        // A thinking phase always leaves an empty square: a full board ends the game.
        let index = self
            .choose_computer_move()
            .ok_or(GameError::GameOver)?;
        self.apply_computer_move(index)?;
        Ok(index)
    }

    /// Starts the session over from an empty board. Allowed in any phase.
    #[instrument(skip(self))]
    pub fn restart(&mut self) {
        let starter = *self.config.starting_player();
        info!(%starter, "Restarting game");

        self.marks = MarkAssignment::for_starter(starter);
        self.board.reset();
        self.round = 0;
        self.history.clear();
        self.phase = Phase::turn_of(starter);

        for index in 0..self.board.len() {
            self.observers.notify_all(&GameEvent::CellChanged {
                index,
                square: Square::Empty,
            });
        }
        self.announce_status();
        assert_invariants(self);
    }

    /// Sends the current status to observers, e.g. right after subscribing.
    pub fn announce_status(&mut self) {
        let info = self.round_info();
        self.observers.notify_all(&GameEvent::StatusChanged {
            phase: self.phase,
            info,
        });
    }

    fn check_turn(&self, player: Player) -> Result<(), GameError> {
        match self.phase {
            Phase::GameOver(_) => Err(GameError::GameOver),
            phase if phase != Phase::turn_of(player) => Err(GameError::NotYourTurn(player)),
            _ => Ok(()),
        }
    }

    fn try_move(&mut self, player: Player, index: usize) -> Result<(), GameError> {
        if index >= self.board.len() {
            return Err(GameError::IndexOutOfRange(index));
        }
        self.check_turn(player)?;

        let mark = self.current_mark();
        self.board.place(index, mark)?;
        self.history.push(Move::new(player, mark, index, self.round));
        self.round += 1;
        info!(%player, %mark, index, round = self.round, "Mark placed");
        self.observers.notify_all(&GameEvent::CellChanged {
            index,
            square: Square::Occupied(mark),
        });

        let status = rules::check_outcome(&self.board, &self.grid, index, &self.marks)?;
        self.phase = if status.is_terminal() {
            info!(%status, "Game over");
            Phase::GameOver(status)
        } else {
            Phase::turn_of(self.to_move())
        };

        self.announce_status();
        assert_invariants(self);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_start_awaits_human() {
        let game = GameController::new(GameConfig::default());
        assert_eq!(game.phase(), Phase::AwaitingHumanMove);
        assert_eq!(game.current_mark(), Mark::O);
    }

    #[test]
    fn test_human_move_hands_turn_to_computer() {
        let mut game = GameController::new(GameConfig::default());
        assert_eq!(game.apply_human_move(4), Ok(true));
        assert_eq!(game.phase(), Phase::ComputerThinking);
        assert_eq!(game.round(), 1);
        assert_eq!(game.board().get(4), Ok(Square::Occupied(Mark::O)));
    }

    #[test]
    fn test_human_move_rejected_while_computer_thinks() {
        let mut game = GameController::new(GameConfig::default());
        game.apply_human_move(4).unwrap();
        let board = game.board().clone();
        assert_eq!(game.apply_human_move(0), Ok(false));
        assert_eq!(game.board(), &board);
        assert_eq!(game.round(), 1);
    }

    #[test]
    fn test_out_of_range_is_an_error() {
        let mut game = GameController::new(GameConfig::default());
        assert_eq!(game.apply_human_move(9), Err(GameError::IndexOutOfRange(9)));
        assert_eq!(game.round(), 0);
    }

    #[test]
    fn test_computer_answers_center_with_corner() {
        let mut game = GameController::new(GameConfig::default());
        game.apply_human_move(4).unwrap();
        assert_eq!(game.play_computer_turn(), Ok(0));
        assert_eq!(game.board().get(0), Ok(Square::Occupied(Mark::X)));
        assert_eq!(game.phase(), Phase::AwaitingHumanMove);
    }

    #[test]
    fn test_computer_turn_refused_on_human_turn() {
        let mut game = GameController::new(GameConfig::default());
        assert_eq!(
            game.play_computer_turn(),
            Err(GameError::NotYourTurn(Player::Computer))
        );
        assert_eq!(game.choose_computer_move(), None);
    }

    #[test]
    fn test_click_after_game_over_restarts() {
        let mut game = GameController::new(GameConfig::default());
        game.phase = Phase::GameOver(GameStatus::Draw);
        assert_eq!(game.click(3), Ok(false));
        assert_eq!(game.phase(), Phase::AwaitingHumanMove);
        assert_eq!(game.round(), 0);
    }
}
