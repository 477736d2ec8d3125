//! Alternating turn invariant: marks go O, X, O, X, ... from round 0.

use super::super::{GameController, Mark};
use super::Invariant;

/// Invariant: each recorded move carries the mark and player that round
/// parity dictates, and rounds are numbered consecutively from zero.
pub struct AlternatingTurnInvariant;

impl Invariant<GameController> for AlternatingTurnInvariant {
    fn holds(game: &GameController) -> bool {
        let marks = game.marks();

        game.history().iter().enumerate().all(|(i, mov)| {
            let round = i as u32;
            mov.round == round
                && mov.mark == Mark::for_round(round)
                && mov.player == marks.owner_of(mov.mark)
        })
    }

    fn description() -> &'static str {
        "Players alternate turns (O, X, O, ...)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::games::tictactoe::{Move, Player};

    #[test]
    fn test_computer_start_holds() {
        let config = GameConfig::default().with_starting_player(Player::Computer);
        let mut game = GameController::new(config);
        game.play_computer_turn().unwrap();
        game.apply_human_move(4).unwrap();
        assert!(AlternatingTurnInvariant::holds(&game));
        assert_eq!(game.history()[0].mark, Mark::O);
        assert_eq!(game.history()[0].player, Player::Computer);
    }

    #[test]
    fn test_same_mark_twice_violates() {
        let mut game = GameController::new(GameConfig::default());
        game.apply_human_move(0).unwrap();
        game.history.push(Move::new(Player::Human, Mark::O, 1, 1));
        assert!(!AlternatingTurnInvariant::holds(&game));
    }
}
