//! Player controller trait and game state view
//!
//! The game loop asks a controller for every decision. Controllers only
//! see a read-only view of the game; the loop applies whatever they pick.

use crate::core::{CardDefinition, CardKey, Enemy, EnemyId, Player};
use crate::game::actions::QueuedAttack;
use crate::game::level::LevelKind;
use crate::game::logger::GameLogger;
use crate::game::quest::QuestManager;
use crate::game::shop::ShopOffer;
use crate::game::town::HotZone;
use crate::game::GameState;
use crate::inventory::Backpack;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A decision during the player's turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnAction {
    QueueAttack { card: CardKey, target: EnemyId },
    Unqueue { card: CardKey },
    PlayCard { card: CardKey },
    PlayCardOn { card: CardKey, target: EnemyId },
    UseItem { slot: usize },
    EndTurn,
}

impl fmt::Display for TurnAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnAction::QueueAttack { card, target } => write!(f, "queue {} at enemy {}", card, target),
            TurnAction::Unqueue { card } => write!(f, "unqueue {}", card),
            TurnAction::PlayCard { card } => write!(f, "play {}", card),
            TurnAction::PlayCardOn { card, target } => write!(f, "play {} on enemy {}", card, target),
            TurnAction::UseItem { slot } => write!(f, "use item in slot {}", slot),
            TurnAction::EndTurn => write!(f, "end turn"),
        }
    }
}

/// Read-only view of game state for controllers
pub struct GameStateView<'a> {
    game: &'a GameState,
}

impl<'a> GameStateView<'a> {
    pub fn new(game: &'a GameState) -> Self {
        GameStateView { game }
    }

    pub fn player(&self) -> &Player {
        &self.game.player
    }

    pub fn hand(&self) -> &[CardKey] {
        &self.game.zones.hand.cards
    }

    pub fn draw_pile_size(&self) -> usize {
        self.game.zones.draw_pile.len()
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.game.enemies
    }

    pub fn attack_queue(&self) -> &[QueuedAttack] {
        &self.game.attack_queue
    }

    pub fn card(&self, key: &CardKey) -> Option<&CardDefinition> {
        self.game.catalog.get(key).ok()
    }

    pub fn current_level(&self) -> u32 {
        self.game.current_level
    }

    pub fn level_kind(&self) -> Option<LevelKind> {
        self.game.current_level_kind()
    }

    pub fn level_title(&self) -> &str {
        self.game
            .levels
            .get(self.game.current_level)
            .map(|def| def.title)
            .unwrap_or("")
    }

    pub fn turn_number(&self) -> u32 {
        self.game.turn_number
    }

    pub fn hot_zones(&self) -> &[HotZone] {
        self.game.hot_zones()
    }

    pub fn backpack(&self) -> &Backpack {
        &self.game.backpack
    }

    pub fn shop_offers(&self) -> &[ShopOffer] {
        self.game.shop.offers()
    }

    pub fn quests(&self) -> &QuestManager {
        &self.game.quests
    }

    /// The game's logger, for controllers to report their choices
    pub fn logger(&self) -> &GameLogger {
        &self.game.logger
    }
}

/// Player controller trait
///
/// Implement this to drive the game from an AI or a UI.
pub trait PlayerController {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Pick one of the available turn actions
    ///
    /// `available` is never empty; its last entry is always `EndTurn`.
    fn choose_action(&mut self, view: &GameStateView, available: &[TurnAction]) -> TurnAction;

    /// Pick a hot-zone to click on a town or story screen
    ///
    /// `zones` is never empty. Out-of-range answers are treated as 0.
    fn choose_hot_zone(&mut self, view: &GameStateView, zones: &[HotZone]) -> usize;

    /// Pick something to buy while the shop is open, or `None` to leave
    fn choose_purchase(&mut self, _view: &GameStateView, _offers: &[ShopOffer]) -> Option<usize> {
        None
    }

    /// Called when the game ends
    fn on_game_end(&mut self, _view: &GameStateView, _won: bool) {}
}
