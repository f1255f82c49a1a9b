//! Zero controller for testing and automation
//!
//! Always takes the first option offered. `available_actions` lists cards
//! before `EndTurn`, so this plays every affordable card it can and then
//! ends the turn; on town screens it clicks the first hot-zone.

use crate::game::controller::{GameStateView, PlayerController, TurnAction};
use crate::game::town::HotZone;

#[derive(Debug, Clone, Default)]
pub struct ZeroController;

impl ZeroController {
    pub fn new() -> Self {
        ZeroController
    }
}

impl PlayerController for ZeroController {
    fn name(&self) -> &str {
        "zero"
    }

    fn choose_action(&mut self, _view: &GameStateView, available: &[TurnAction]) -> TurnAction {
        available.first().cloned().unwrap_or(TurnAction::EndTurn)
    }

    fn choose_hot_zone(&mut self, _view: &GameStateView, _zones: &[HotZone]) -> usize {
        0
    }
}
