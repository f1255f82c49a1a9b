//! Debug menu commands

use crate::core::{CardKey, EnemyId};
use crate::game::event::GameEvent;
use crate::game::phase::GameOutcome;
use crate::game::GameState;
use crate::{GameError, Result};

impl GameState {
    /// Jump to the next level, or win if this is the last one
    pub fn skip_level(&mut self) -> Result<()> {
        let next = self.current_level + 1;
        if self.levels.contains(next) {
            self.jump_to_level(next)
        } else {
            self.declare_outcome(GameOutcome::Victory);
            Ok(())
        }
    }

    /// Level select
    pub fn jump_to_level(&mut self, level: u32) -> Result<()> {
        self.logger.normal(&format!("[debug] jumping to level {}", level));
        self.go_to_level(level)
    }

    /// Kill an enemy outright, then check whether the level is clear
    pub fn kill_enemy(&mut self, id: EnemyId) -> Result<()> {
        let health = self
            .enemy(id)
            .map(|e| e.health)
            .ok_or(GameError::EnemyNotFound(id))?;
        self.damage_enemy(id, health);
        self.check_level_completion();
        Ok(())
    }

    /// Put any catalog card straight into the hand
    pub fn add_card_to_hand(&mut self, card: &CardKey) -> Result<()> {
        self.catalog.get(card)?;
        self.zones.hand.add(card.clone());
        self.emit(GameEvent::CardDrawn { card: card.clone() });
        Ok(())
    }
}
