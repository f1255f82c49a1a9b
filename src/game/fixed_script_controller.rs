//! Fixed script controller for deterministic testing
//!
//! Follows a predetermined sequence of choice indices. Once the script is
//! exhausted it behaves like the zero controller and always picks index 0.

use crate::game::controller::{GameStateView, PlayerController, TurnAction};
use crate::game::shop::ShopOffer;
use crate::game::town::HotZone;
use serde::{Deserialize, Serialize};

/// Serializable, so its position survives a snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedScriptController {
    script: Vec<usize>,
    pub current_index: usize,
}

impl FixedScriptController {
    /// Script indices are consumed by every decision: actions, hot-zones and
    /// purchases alike. For purchases, 0 means "leave the shop" and N buys
    /// offer N-1.
    pub fn new(script: Vec<usize>) -> Self {
        FixedScriptController {
            script,
            current_index: 0,
        }
    }

    fn next_choice(&mut self) -> usize {
        match self.script.get(self.current_index) {
            Some(&choice) => {
                self.current_index += 1;
                choice
            }
            None => 0,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.current_index >= self.script.len()
    }
}

impl PlayerController for FixedScriptController {
    fn name(&self) -> &str {
        "script"
    }

    fn choose_action(&mut self, view: &GameStateView, available: &[TurnAction]) -> TurnAction {
        let choice = self.next_choice();
        let index = if choice < available.len() { choice } else { 0 };
        let action = available.get(index).cloned().unwrap_or(TurnAction::EndTurn);
        view.logger()
            .controller_choice("script", &format!("chose {} of {}: {}", index, available.len(), action));
        action
    }

    fn choose_hot_zone(&mut self, _view: &GameStateView, zones: &[HotZone]) -> usize {
        let choice = self.next_choice();
        if choice < zones.len() {
            choice
        } else {
            0
        }
    }

    fn choose_purchase(&mut self, _view: &GameStateView, offers: &[ShopOffer]) -> Option<usize> {
        match self.next_choice() {
            0 => None,
            n if n <= offers.len() => Some(n - 1),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Ruleset;
    use crate::core::{CardKey, PlayerClass};
    use crate::game::GameState;

    #[test]
    fn test_follows_script_then_defaults() {
        let game = GameState::new(PlayerClass::Warrior, Ruleset::default(), 1);
        let view = GameStateView::new(&game);
        let actions = vec![
            TurnAction::PlayCard {
                card: CardKey::new("shield_block"),
            },
            TurnAction::EndTurn,
        ];
        let mut controller = FixedScriptController::new(vec![1, 7]);

        assert_eq!(controller.choose_action(&view, &actions), TurnAction::EndTurn);
        // out of range falls back to the first option
        assert_eq!(controller.choose_action(&view, &actions), actions[0]);
        assert!(controller.is_exhausted());
        assert_eq!(controller.choose_action(&view, &actions), actions[0]);
    }

    #[test]
    fn test_purchase_numbering() {
        let game = GameState::new(PlayerClass::Warrior, Ruleset::default(), 1);
        let view = GameStateView::new(&game);
        let offers = game.shop.offers().to_vec();
        let mut controller = FixedScriptController::new(vec![2, 0]);

        assert_eq!(controller.choose_purchase(&view, &offers), Some(1));
        assert_eq!(controller.choose_purchase(&view, &offers), None);
    }
}
