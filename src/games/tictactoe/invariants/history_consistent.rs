//! History consistency invariant: round counter, history and phase agree.

use super::super::{GameController, Phase};
use super::Invariant;

/// Invariant: one history entry per round, one mark per entry, and an
/// unfinished game is waiting on whoever round parity says moves next.
pub struct HistoryConsistentInvariant;

impl Invariant<GameController> for HistoryConsistentInvariant {
    fn holds(game: &GameController) -> bool {
        let counts_agree = game.history().len() == game.round() as usize
            && game.board().occupied_count() == game.history().len();
        let phase_agrees = match game.phase() {
            Phase::GameOver(_) => true,
            phase => phase == Phase::turn_of(game.to_move()),
        };
        counts_agree && phase_agrees
    }

    fn description() -> &'static str {
        "Round counter, history and phase are consistent"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    #[test]
    fn test_fresh_game_holds() {
        let game = GameController::new(GameConfig::default());
        assert!(HistoryConsistentInvariant::holds(&game));
    }

    #[test]
    fn test_skipped_round_violates() {
        let mut game = GameController::new(GameConfig::default());
        game.apply_human_move(4).unwrap();
        game.round += 1;
        assert!(!HistoryConsistentInvariant::holds(&game));
    }
}
