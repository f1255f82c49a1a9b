//! Game configuration
//!
//! Loaded from a JSON file. Every field has a default so a partial file (or
//! no file at all) still produces a playable configuration.

use crate::{GameError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Rules that change how the game plays
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ruleset {
    /// Cards the hand is refilled to at the start of each turn
    pub hand_size: usize,
    pub max_health: u32,
    pub max_defense: u32,
    /// Mage mana is reset to this value every turn
    pub mage_mana_per_turn: u32,
    /// Warrior rage gained every turn
    pub warrior_rage_per_turn: u32,
    /// Inclusive range of a single enemy hit
    pub enemy_damage_min: u32,
    pub enemy_damage_max: u32,
    /// Enemy spawn positions per level
    pub max_enemy_slots: usize,
    /// Player turns before a campaign is called off
    pub max_turns: u32,
    pub start_level: u32,
}

impl Default for Ruleset {
    fn default() -> Self {
        Ruleset {
            hand_size: 5,
            max_health: 100,
            max_defense: 100,
            mage_mana_per_turn: 11,
            warrior_rage_per_turn: 4,
            enemy_damage_min: 1,
            enemy_damage_max: 5,
            max_enemy_slots: 5,
            max_turns: 500,
            start_level: 1,
        }
    }
}

/// Advisory delays (milliseconds) attached to events for paced playback
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    pub attack_windup_ms: u64,
    pub between_attacks_ms: u64,
    pub enemy_turn_delay_ms: u64,
    pub level_exit_ms: u64,
    pub narration_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        PacingConfig {
            attack_windup_ms: 800,
            between_attacks_ms: 500,
            enemy_turn_delay_ms: 1000,
            level_exit_ms: 3000,
            narration_ms: 2000,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub ruleset: Ruleset,
    pub pacing: PacingConfig,
}

impl GameConfig {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: GameConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let r = &self.ruleset;
        if r.enemy_damage_min > r.enemy_damage_max {
            return Err(GameError::InvalidConfig(format!(
                "enemy_damage_min ({}) exceeds enemy_damage_max ({})",
                r.enemy_damage_min, r.enemy_damage_max
            )));
        }
        if r.hand_size == 0 {
            return Err(GameError::InvalidConfig("hand_size must be at least 1".into()));
        }
        if r.max_enemy_slots == 0 {
            return Err(GameError::InvalidConfig(
                "max_enemy_slots must be at least 1".into(),
            ));
        }
        if r.max_health == 0 {
            return Err(GameError::InvalidConfig("max_health must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.ruleset.hand_size, 5);
        assert_eq!(config.ruleset.mage_mana_per_turn, 11);
        assert_eq!(config.ruleset.max_enemy_slots, 5);
        assert_eq!(config.pacing.attack_windup_ms, 800);
        assert_eq!(config.pacing.between_attacks_ms, 500);
        assert_eq!(config.pacing.enemy_turn_delay_ms, 1000);
    }

    #[test]
    fn test_partial_file() {
        let config = GameConfig::parse(r#"{ "ruleset": { "mage_mana_per_turn": 10 } }"#).unwrap();
        assert_eq!(config.ruleset.mage_mana_per_turn, 10);
        assert_eq!(config.ruleset.hand_size, 5);
        assert_eq!(config.pacing, PacingConfig::default());

        let empty = GameConfig::parse("{}").unwrap();
        assert_eq!(empty, GameConfig::default());
    }

    #[test]
    fn test_invalid_damage_range() {
        let err = GameConfig::parse(
            r#"{ "ruleset": { "enemy_damage_min": 6, "enemy_damage_max": 2 } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, GameError::InvalidConfig(_)));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            GameConfig::parse("{ ruleset"),
            Err(GameError::SerializationError(_))
        ));
    }
}
