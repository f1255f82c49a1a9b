//! Random AI controller for testing and baseline gameplay
//!
//! Uses its own seeded Xoshiro256++ stream so its choices never disturb the
//! game's RNG, and so it can be saved in a snapshot mid-game.

use crate::game::controller::{GameStateView, PlayerController, TurnAction};
use crate::game::shop::ShopOffer;
use crate::game::town::HotZone;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomController {
    rng: Xoshiro256PlusPlus,
}

impl RandomController {
    pub fn with_seed(seed: u64) -> Self {
        RandomController {
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
        }
    }
}

impl PlayerController for RandomController {
    fn name(&self) -> &str {
        "random"
    }

    fn choose_action(&mut self, view: &GameStateView, available: &[TurnAction]) -> TurnAction {
        if available.is_empty() {
            return TurnAction::EndTurn;
        }
        let index = self.rng.gen_range(0..available.len());
        let action = available[index].clone();
        view.logger()
            .controller_choice("random", &format!("chose {} of {}: {}", index, available.len(), action));
        action
    }

    fn choose_hot_zone(&mut self, _view: &GameStateView, zones: &[HotZone]) -> usize {
        if zones.is_empty() {
            return 0;
        }
        self.rng.gen_range(0..zones.len())
    }

    fn choose_purchase(&mut self, _view: &GameStateView, offers: &[ShopOffer]) -> Option<usize> {
        let in_stock: Vec<usize> = (0..offers.len()).filter(|&i| offers[i].in_stock()).collect();
        if in_stock.is_empty() || self.rng.gen_bool(0.5) {
            return None;
        }
        Some(in_stock[self.rng.gen_range(0..in_stock.len())])
    }
}
