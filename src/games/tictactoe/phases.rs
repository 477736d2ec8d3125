//! Controller phases and the per-turn status line.

use super::{GameStatus, Mark, Player};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the controller is in a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the human to place a mark.
    AwaitingHumanMove,
    /// The computer owns the turn; human input is rejected.
    ComputerThinking,
    /// Terminal. The next click restarts.
    GameOver(GameStatus),
}

impl Phase {
    /// Phase in which `player` is to move.
    pub fn turn_of(player: Player) -> Self {
        match player {
            Player::Human => Phase::AwaitingHumanMove,
            Player::Computer => Phase::ComputerThinking,
        }
    }

    /// True once the game has a result.
    pub fn is_over(&self) -> bool {
        matches!(self, Phase::GameOver(_))
    }

    /// Rule status implied by this phase.
    pub fn status(&self) -> GameStatus {
        match self {
            Phase::GameOver(status) => *status,
            _ => GameStatus::InProgress,
        }
    }
}

/// Snapshot describing the current round, sent with every status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundInfo {
    /// Marks placed so far.
    pub round: u32,
    /// Player whose turn it is (the would-be mover once the game is over).
    pub to_move: Player,
    /// Mark that the next placement uses.
    pub mark: Mark,
    /// Controller phase.
    pub phase: Phase,
}

impl fmt::Display for RoundInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Phase::GameOver(status) = self.phase {
            return write!(f, "Round: {} / {}", self.round, status);
        }
        write!(
            f,
            "Round: {} / Turn: {} / Mark: {} / ",
            self.round, self.to_move, self.mark
        )?;
        match self.phase {
            Phase::ComputerThinking => f.write_str("Computer is thinking..."),
            _ => f.write_str("Your move"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_info_text() {
        let info = RoundInfo {
            round: 2,
            to_move: Player::Human,
            mark: Mark::O,
            phase: Phase::AwaitingHumanMove,
        };
        assert_eq!(info.to_string(), "Round: 2 / Turn: Human / Mark: O / Your move");

        let over = RoundInfo {
            phase: Phase::GameOver(GameStatus::Draw),
            ..info
        };
        assert_eq!(over.to_string(), "Round: 2 / Draw");
    }
}
