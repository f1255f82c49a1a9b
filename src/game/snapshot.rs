//! Game snapshot functionality for stop-and-resume gameplay
//!
//! The whole game state, RNG stream and pending attack queue included, is
//! serializable, so a snapshot can be taken between any two loop steps and
//! resumed exactly.

use crate::game::state::GameState;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Bumped whenever the saved layout changes incompatibly
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// Controller state that can be preserved across snapshot/resume
///
/// Zero and interactive controllers carry no state and are simply rebuilt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "controller_type")]
pub enum ControllerState {
    /// Fixed script controller with its position in the script
    Fixed(crate::game::FixedScriptController),

    /// Random controller with its own RNG state
    Random(crate::game::RandomController),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub format_version: u32,

    pub game_state: GameState,

    /// Loop turn counter, so the turn limit carries over
    pub turns_elapsed: u32,

    /// Decisions already taken in the current player turn
    #[serde(default)]
    pub actions_this_turn: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controller_state: Option<ControllerState>,
}

impl GameSnapshot {
    pub fn new(game_state: GameState, turns_elapsed: u32) -> Self {
        GameSnapshot {
            format_version: SNAPSHOT_FORMAT_VERSION,
            game_state,
            turns_elapsed,
            actions_this_turn: 0,
            controller_state: None,
        }
    }

    pub fn with_action_counter(mut self, actions_this_turn: u32) -> Self {
        self.actions_this_turn = actions_this_turn;
        self
    }

    /// Create a snapshot with controller state preserved
    pub fn with_controller_state(
        game_state: GameState,
        turns_elapsed: u32,
        controller_state: Option<ControllerState>,
    ) -> Self {
        GameSnapshot {
            controller_state,
            ..Self::new(game_state, turns_elapsed)
        }
    }

    /// Save this snapshot to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), SnapshotError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| SnapshotError::Serialization(e.to_string()))?;

        std::fs::write(path.as_ref(), json).map_err(|e| SnapshotError::Io(e.to_string()))?;

        Ok(())
    }

    /// Load a snapshot from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, SnapshotError> {
        let json =
            std::fs::read_to_string(path.as_ref()).map_err(|e| SnapshotError::Io(e.to_string()))?;

        let snapshot: GameSnapshot = serde_json::from_str(&json)
            .map_err(|e| SnapshotError::Deserialization(e.to_string()))?;

        if snapshot.format_version != SNAPSHOT_FORMAT_VERSION {
            return Err(SnapshotError::InvalidState(format!(
                "snapshot format {} is not supported (expected {})",
                snapshot.format_version, SNAPSHOT_FORMAT_VERSION
            )));
        }
        if !snapshot.game_state.levels.contains(snapshot.game_state.current_level)
            && snapshot.game_state.current_level != 0
        {
            return Err(SnapshotError::InvalidState(format!(
                "unknown level {}",
                snapshot.game_state.current_level
            )));
        }

        Ok(snapshot)
    }
}

/// Errors that can occur during snapshot operations
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("Failed to serialize snapshot: {0}")]
    Serialization(String),

    #[error("Failed to deserialize snapshot: {0}")]
    Deserialization(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Invalid snapshot state: {0}")]
    InvalidState(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Ruleset;
    use crate::core::PlayerClass;
    use crate::game::{FixedScriptController, RandomController};

    fn game_in_progress() -> GameState {
        let mut game = GameState::new(PlayerClass::Warrior, Ruleset::default(), 17);
        game.start_campaign().unwrap();
        let target = game.enemies[0].id;
        let strike = crate::core::CardKey::new("strike");
        game.player.resource = 4;
        game.add_card_to_hand(&strike).unwrap();
        game.queue_attack(&strike, target).unwrap();
        game
    }

    #[test]
    fn test_round_trip_keeps_pending_queue() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.snapshot");

        let game = game_in_progress();
        let snapshot = GameSnapshot::with_controller_state(
            game.clone(),
            3,
            Some(ControllerState::Fixed(FixedScriptController::new(vec![1, 2]))),
        )
        .with_action_counter(5);
        snapshot.save_to_file(&path).unwrap();

        let loaded = GameSnapshot::load_from_file(&path).unwrap();
        assert_eq!(loaded.turns_elapsed, 3);
        assert_eq!(loaded.actions_this_turn, 5);
        assert_eq!(loaded.game_state.attack_queue, game.attack_queue);
        assert_eq!(loaded.game_state.player.reserved, 2);
        assert_eq!(loaded.game_state.zones.hand.cards, game.zones.hand.cards);
        assert!(matches!(loaded.controller_state, Some(ControllerState::Fixed(_))));
        // static data is rebuilt on load
        assert!(loaded.game_state.catalog.len() > 0);
        assert_eq!(loaded.game_state.levels.max_level(), 19);
    }

    #[test]
    fn test_resumed_game_continues_identically() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.snapshot");

        let mut original = game_in_progress();
        GameSnapshot::new(original.clone(), 0)
            .save_to_file(&path)
            .unwrap();
        let mut resumed = GameSnapshot::load_from_file(&path).unwrap().game_state;

        original.end_turn().unwrap();
        resumed.end_turn().unwrap();
        assert_eq!(original.player, resumed.player);
        assert_eq!(original.enemies, resumed.enemies);
        assert_eq!(original.zones.hand.cards, resumed.zones.hand.cards);
    }

    #[test]
    fn test_random_controller_state_serializes() {
        let state = ControllerState::Random(RandomController::with_seed(5));
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"controller_type\":\"Random\""));
        let _: ControllerState = serde_json::from_str(&json).unwrap();
    }

    #[test]
    fn test_rejects_other_format_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("old.snapshot");

        let mut snapshot = GameSnapshot::new(game_in_progress(), 0);
        snapshot.format_version = 99;
        snapshot.save_to_file(&path).unwrap();

        assert!(matches!(
            GameSnapshot::load_from_file(&path),
            Err(SnapshotError::InvalidState(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            GameSnapshot::load_from_file("/nonexistent/ember.snapshot"),
            Err(SnapshotError::Io(_))
        ));
    }
}
