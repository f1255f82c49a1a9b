//! Turn structure

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the game is within the current level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Waiting for the player to queue attacks, play cards or end the turn
    PlayerTurn,
    /// The attack queue is being drained
    ResolvingAttacks,
    /// Enemies are taking their swings
    EnemyTurn,
    /// Town, inn or story screen; no combat
    Exploring,
    /// Victory or defeat has been decided
    GameOver,
}

impl TurnPhase {
    pub fn is_combat(&self) -> bool {
        matches!(
            self,
            TurnPhase::PlayerTurn | TurnPhase::ResolvingAttacks | TurnPhase::EnemyTurn
        )
    }
}

impl fmt::Display for TurnPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TurnPhase::PlayerTurn => "Player Turn",
            TurnPhase::ResolvingAttacks => "Resolving Attacks",
            TurnPhase::EnemyTurn => "Enemy Turn",
            TurnPhase::Exploring => "Exploring",
            TurnPhase::GameOver => "Game Over",
        };
        write!(f, "{s}")
    }
}

/// How a campaign ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    Victory,
    Defeat,
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOutcome::Victory => write!(f, "Victory"),
            GameOutcome::Defeat => write!(f, "Defeat"),
        }
    }
}
