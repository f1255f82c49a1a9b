//! Game loop implementation
//!
//! Drives a campaign one decision at a time: level transitions, the
//! player's combat turns, the shop and the town hot-zones.

/// Macro for conditional logging that avoids allocation when feature is disabled
///
/// When verbose-logging feature is disabled, this becomes a no-op at compile time,
/// eliminating the format! allocations on the hot path.
macro_rules! log_if_verbose {
    ($self:expr, $($arg:tt)*) => {
        #[cfg(feature = "verbose-logging")]
        {
            $self.log_normal(&format!($($arg)*));
        }
        #[cfg(not(feature = "verbose-logging"))]
        {
            let _ = &$self;
        }
    };
}

use crate::game::controller::{GameStateView, PlayerController, TurnAction};
use crate::game::level::LevelKind;
use crate::game::phase::GameOutcome;
use crate::game::GameState;
use crate::{GameError, Result};

/// Upper bound on decisions within one player turn before the loop ends it
const MAX_ACTIONS_PER_TURN: u32 = 64;

/// Verbosity level for game output
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Default,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum VerbosityLevel {
    /// Silent - no output during game
    Silent = 0,
    /// Minimal - only game outcome
    Minimal = 1,
    /// Normal - turns, levels, and key actions (default)
    #[default]
    Normal = 2,
    /// Verbose - every event and controller choice
    Verbose = 3,
}

/// Result of running a campaign to completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameResult {
    pub end_reason: GameEndReason,
    pub levels_cleared: u32,
    /// Combat turns ended plus town moves made
    pub turns_played: u32,
    pub final_level: u32,
    pub final_health: u32,
}

/// Reason the game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEndReason {
    /// The player walked out of town on the last level
    Victory,
    /// The player's health reached zero
    Defeat,
    /// Game reached maximum turn limit
    TurnLimit,
}

/// Game loop manager
pub struct GameLoop<'a> {
    /// The game state
    pub game: &'a mut GameState,
    max_turns: u32,
    turns_elapsed: u32,
    actions_this_turn: u32,
    /// Verbosity level for output (cached from game.logger)
    pub verbosity: VerbosityLevel,
}

impl<'a> GameLoop<'a> {
    pub fn new(game: &'a mut GameState) -> Self {
        let verbosity = game.logger.verbosity();
        GameLoop {
            game,
            max_turns: 1000,
            turns_elapsed: 0,
            actions_this_turn: 0,
            verbosity,
        }
    }

    /// Set maximum turns before giving up
    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Set verbosity on both the loop and the game's logger
    pub fn with_verbosity(mut self, verbosity: VerbosityLevel) -> Self {
        self.verbosity = verbosity;
        self.game.logger.set_verbosity(verbosity);
        self
    }

    /// Set initial turn counter (for resuming from snapshots)
    pub fn with_turn_counter(mut self, turns_elapsed: u32) -> Self {
        self.turns_elapsed = turns_elapsed;
        self
    }

    /// Set the decisions already taken in the current player turn
    pub fn with_action_counter(mut self, actions_this_turn: u32) -> Self {
        self.actions_this_turn = actions_this_turn;
        self
    }

    pub fn turns_elapsed(&self) -> u32 {
        self.turns_elapsed
    }

    pub fn actions_this_turn(&self) -> u32 {
        self.actions_this_turn
    }

    /// Run the campaign until victory, defeat or the turn limit
    ///
    /// Starts the campaign first if no level has been set up yet. Events are
    /// drained after every step; use [`GameLoop::step`] directly to see them.
    pub fn run_campaign(&mut self, controller: &mut dyn PlayerController) -> Result<GameResult> {
        if self.game.current_level == 0 {
            self.game.start_campaign()?;
        }
        log_if_verbose!(self, "{} plays the {}", controller.name(), self.game.player.class);

        loop {
            let step = self.step(controller);
            self.game.drain_events();
            if let Some(result) = step? {
                self.notify_game_end(controller, &result);
                return Ok(result);
            }
        }
    }

    /// Advance the game by one decision
    ///
    /// Returns the result once the game has ended.
    pub fn step(&mut self, controller: &mut dyn PlayerController) -> Result<Option<GameResult>> {
        if let Some(result) = self.check_end() {
            return Ok(Some(result));
        }

        if self.game.is_level_transitioning {
            self.game.finish_level_transition()?;
            return Ok(self.check_end());
        }

        if self.game.shop.is_open {
            self.shop_step(controller);
            return Ok(None);
        }

        match self.game.current_level_kind() {
            Some(LevelKind::Combat) => self.combat_step(controller)?,
            Some(LevelKind::Narrative | LevelKind::Town) => self.explore_step(controller)?,
            None => return Err(GameError::InvalidLevel(self.game.current_level)),
        }
        Ok(self.check_end())
    }

    fn combat_step(&mut self, controller: &mut dyn PlayerController) -> Result<()> {
        let available = self.game.available_actions();
        if available.is_empty() {
            return Err(GameError::NotPlayerTurn);
        }

        let action = if self.actions_this_turn >= MAX_ACTIONS_PER_TURN {
            TurnAction::EndTurn
        } else {
            let view = GameStateView::new(self.game);
            controller.choose_action(&view, &available)
        };
        self.actions_this_turn += 1;
        log_if_verbose!(self, "{}: {}", controller.name(), action);

        if action == TurnAction::EndTurn {
            self.actions_this_turn = 0;
            self.turns_elapsed += 1;
        }

        // Rule rejections leave the state untouched; the controller just picks again
        if let Err(e) = self.game.apply_action(&action) {
            self.log_normal(&format!("{} rejected: {}", action, e));
        }
        Ok(())
    }

    fn explore_step(&mut self, controller: &mut dyn PlayerController) -> Result<()> {
        let zones = self.game.hot_zones().to_vec();
        if zones.is_empty() {
            return Err(GameError::InvalidLevel(self.game.current_level));
        }

        let choice = {
            let view = GameStateView::new(self.game);
            controller.choose_hot_zone(&view, &zones)
        };
        let index = if choice < zones.len() { choice } else { 0 };
        log_if_verbose!(self, "{} clicks '{}'", controller.name(), zones[index].label);

        self.turns_elapsed += 1;
        self.game.activate_hot_zone(index)?;
        Ok(())
    }

    fn shop_step(&mut self, controller: &mut dyn PlayerController) {
        let offers = self.game.shop.offers().to_vec();
        let choice = {
            let view = GameStateView::new(self.game);
            controller.choose_purchase(&view, &offers)
        };

        match choice {
            Some(index) => {
                if let Err(e) = self.game.buy_item(index) {
                    self.log_normal(&format!("Purchase failed: {}", e));
                    self.game.close_shop();
                }
            }
            None => self.game.close_shop(),
        }
    }

    fn check_end(&self) -> Option<GameResult> {
        let end_reason = match self.game.outcome {
            Some(GameOutcome::Victory) => GameEndReason::Victory,
            Some(GameOutcome::Defeat) => GameEndReason::Defeat,
            None if self.turns_elapsed >= self.max_turns => GameEndReason::TurnLimit,
            None => return None,
        };
        Some(GameResult {
            end_reason,
            levels_cleared: self.game.levels_cleared,
            turns_played: self.turns_elapsed,
            final_level: self.game.current_level,
            final_health: self.game.player.health,
        })
    }

    fn notify_game_end(&mut self, controller: &mut dyn PlayerController, result: &GameResult) {
        self.log_minimal(&format!(
            "=== {:?} on level {} after {} turns ({} levels cleared) ===",
            result.end_reason, result.final_level, result.turns_played, result.levels_cleared
        ));
        let view = GameStateView::new(self.game);
        controller.on_game_end(&view, result.end_reason == GameEndReason::Victory);
    }

    fn log_normal(&self, message: &str) {
        self.game.logger.normal(message);
    }

    fn log_minimal(&self, message: &str) {
        self.game.logger.minimal(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Ruleset;
    use crate::core::PlayerClass;
    use crate::game::{FixedScriptController, RandomController, ZeroController};

    fn silent_game(class: PlayerClass, seed: u64) -> GameState {
        let mut game = GameState::new(class, Ruleset::default(), seed);
        game.logger.set_verbosity(VerbosityLevel::Silent);
        game
    }

    #[test]
    fn test_zero_controller_campaign_terminates() {
        for class in [PlayerClass::Warrior, PlayerClass::Mage] {
            let mut game = silent_game(class, 42);
            let mut controller = ZeroController::new();
            let result = GameLoop::new(&mut game)
                .with_max_turns(500)
                .run_campaign(&mut controller)
                .unwrap();

            match result.end_reason {
                GameEndReason::Victory => {
                    assert_eq!(result.final_level, 19);
                    assert!(result.levels_cleared >= 8);
                }
                GameEndReason::Defeat => assert_eq!(result.final_health, 0),
                GameEndReason::TurnLimit => panic!("zero controller should finish: {:?}", result),
            }
        }
    }

    #[test]
    fn test_restored_action_counter_keeps_the_turn_cap() {
        let mut game = silent_game(PlayerClass::Warrior, 4);
        game.start_campaign().unwrap();
        let turn = game.turn_number;
        let mut controller = ZeroController::new();

        let mut game_loop = GameLoop::new(&mut game).with_action_counter(MAX_ACTIONS_PER_TURN);
        assert_eq!(game_loop.actions_this_turn(), MAX_ACTIONS_PER_TURN);
        game_loop.step(&mut controller).unwrap();

        assert_eq!(game_loop.turns_elapsed(), 1);
        assert_eq!(game_loop.actions_this_turn(), 0);
        assert!(game_loop.game.attack_queue.is_empty());
        assert!(game_loop.game.turn_number > turn || game_loop.game.is_over());
    }

    #[test]
    fn test_turn_limit() {
        let mut game = silent_game(PlayerClass::Warrior, 1);
        let mut controller = ZeroController::new();
        let result = GameLoop::new(&mut game)
            .with_max_turns(1)
            .run_campaign(&mut controller)
            .unwrap();
        assert_eq!(result.end_reason, GameEndReason::TurnLimit);
        assert_eq!(result.turns_played, 1);
        assert_eq!(result.final_level, 1);
    }

    #[test]
    fn test_out_of_range_script_takes_first_action() {
        let mut game = silent_game(PlayerClass::Warrior, 5);
        game.start_campaign().unwrap();
        let first = game.available_actions()[0].clone();
        let hand_before = game.zones.hand.len();

        let mut controller = FixedScriptController::new(vec![usize::MAX]);
        let mut game_loop = GameLoop::new(&mut game);
        assert!(game_loop.step(&mut controller).unwrap().is_none());

        match first {
            TurnAction::QueueAttack { .. } => assert_eq!(game_loop.game.attack_queue.len(), 1),
            TurnAction::PlayCard { .. } => assert!(game_loop.game.zones.hand.len() < hand_before),
            TurnAction::EndTurn => assert_eq!(game_loop.turns_elapsed(), 1),
            _ => {}
        }
    }

    #[test]
    fn test_random_campaigns_are_deterministic() {
        let run = |seed: u64| {
            let mut game = silent_game(PlayerClass::Mage, seed);
            let mut controller = RandomController::with_seed(seed);
            GameLoop::new(&mut game)
                .with_max_turns(300)
                .run_campaign(&mut controller)
                .unwrap()
        };
        assert_eq!(run(9), run(9));
    }

    #[test]
    fn test_transition_is_its_own_step() {
        let mut game = silent_game(PlayerClass::Warrior, 3);
        game.start_campaign().unwrap();
        let id = game.enemies[0].id;
        game.kill_enemy(id).unwrap();

        let mut controller = ZeroController::new();
        let mut game_loop = GameLoop::new(&mut game);
        assert!(game_loop.step(&mut controller).unwrap().is_none());
        assert!(!game_loop.game.is_level_transitioning);
        assert_eq!(game_loop.game.current_level, 2);
        assert_eq!(game_loop.game.enemies.len(), 2);
    }

    #[test]
    fn test_shop_is_left_when_controller_declines() {
        let mut game = silent_game(PlayerClass::Mage, 3);
        game.jump_to_level(17).unwrap();
        game.activate_hot_zone(0).unwrap();
        assert!(game.shop.is_open);

        let mut controller = ZeroController::new();
        let mut game_loop = GameLoop::new(&mut game);
        game_loop.step(&mut controller).unwrap();
        assert!(!game_loop.game.shop.is_open);
    }

    #[test]
    fn test_scripted_purchase() {
        let mut game = silent_game(PlayerClass::Mage, 3);
        game.jump_to_level(17).unwrap();
        game.activate_hot_zone(0).unwrap();

        // buy offer 0, then leave
        let mut controller = FixedScriptController::new(vec![1, 0]);
        let mut game_loop = GameLoop::new(&mut game);
        game_loop.step(&mut controller).unwrap();
        assert!(game_loop.game.shop.is_open);
        assert_eq!(game_loop.game.shop.offers()[0].stock, 1);
        game_loop.step(&mut controller).unwrap();
        assert!(!game_loop.game.shop.is_open);
    }
}
