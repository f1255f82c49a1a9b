//! Interactive terminal controller for human players
//!
//! Reads numbered choices from stdin and prints the game through GameStateView.

use crate::game::controller::{GameStateView, PlayerController, TurnAction};
use crate::game::shop::ShopOffer;
use crate::game::town::HotZone;
use std::io::{self, Write};

/// A controller that prompts a human player for decisions via stdin
#[derive(Debug, Default)]
pub struct InteractiveController;

impl InteractiveController {
    pub fn new() -> Self {
        InteractiveController
    }

    /// Prompt until the user enters a valid index
    ///
    /// `?` shows help, `s` the status panel, `b` the backpack and `q` the
    /// quest log. With `allow_leave`, `x` returns `None`. End of input picks
    /// option 0 so a closed stdin can't hang the game.
    fn get_user_choice(
        &self,
        prompt: &str,
        num_options: usize,
        allow_leave: bool,
        view: &GameStateView,
    ) -> Option<usize> {
        loop {
            print!("{} ", prompt);
            let _ = io::stdout().flush();

            let mut input = String::new();
            match io::stdin().read_line(&mut input) {
                Ok(0) => return if allow_leave { None } else { Some(0) },
                Ok(_) => {}
                Err(_) => {
                    eprintln!("Error reading input");
                    continue;
                }
            }

            match input.trim() {
                "?" => {
                    self.display_help(allow_leave);
                    continue;
                }
                "s" => {
                    self.display_status(view);
                    continue;
                }
                "b" => {
                    self.display_backpack(view);
                    continue;
                }
                "q" => {
                    self.display_quests(view);
                    continue;
                }
                "x" if allow_leave => return None,
                "" => continue,
                trimmed => match trimmed.parse::<usize>() {
                    Ok(choice) if choice < num_options => return Some(choice),
                    _ => eprintln!(
                        "Invalid choice. Enter 0-{}{}.",
                        num_options.saturating_sub(1),
                        if allow_leave { " or 'x' to leave" } else { "" }
                    ),
                },
            }
        }
    }

    fn display_help(&self, allow_leave: bool) {
        println!("\n=== Help ===");
        println!("  <n> - choose option n");
        println!("  s   - status");
        println!("  b   - backpack");
        println!("  q   - quest log");
        if allow_leave {
            println!("  x   - leave");
        }
        println!();
    }

    fn display_status(&self, view: &GameStateView) {
        let player = view.player();
        println!("\n=== Level {}: {} ===", view.current_level(), view.level_title());
        println!(
            "{}  HP {}/{}  DEF {}/{}  {} {}/{} ({} reserved)",
            player.class,
            player.health,
            player.max_health,
            player.defense,
            player.max_defense,
            player.class.resource_name(),
            player.resource,
            player.max_resource,
            player.reserved,
        );
        for enemy in view.enemies() {
            println!(
                "  [{}] {} {}/{} ({}%)",
                enemy.id,
                enemy.kind,
                enemy.health,
                enemy.max_health,
                enemy.health_percent()
            );
        }
        if !view.attack_queue().is_empty() {
            println!("Queued:");
            for attack in view.attack_queue() {
                println!("  {} -> enemy {} ({})", attack.card, attack.target, attack.cost);
            }
        }
        println!("Hand:");
        for key in view.hand() {
            match view.card(key) {
                Some(card) => println!("  {}", card.summary()),
                None => println!("  {}", key),
            }
        }
        println!();
    }

    fn display_backpack(&self, view: &GameStateView) {
        println!("\n=== Backpack ===");
        if view.backpack().is_empty() {
            println!("  (empty)");
        }
        for (slot, item) in view.backpack().items() {
            println!("  {:>2}: {}", slot, item.display_name());
        }
        println!();
    }

    fn display_quests(&self, view: &GameStateView) {
        println!("\n=== Quests ===");
        for quest in view.quests().active() {
            println!("  [ ] {}: {}", quest.title, quest.description);
        }
        for quest in view.quests().completed() {
            println!("  [x] {}", quest.title);
        }
        println!();
    }
}

impl PlayerController for InteractiveController {
    fn name(&self) -> &str {
        "interactive"
    }

    fn choose_action(&mut self, view: &GameStateView, available: &[TurnAction]) -> TurnAction {
        self.display_status(view);
        for (i, action) in available.iter().enumerate() {
            println!("  {}: {}", i, action);
        }
        let choice = self
            .get_user_choice("Action?", available.len(), false, view)
            .unwrap_or(0);
        available.get(choice).cloned().unwrap_or(TurnAction::EndTurn)
    }

    fn choose_hot_zone(&mut self, view: &GameStateView, zones: &[HotZone]) -> usize {
        println!("\n=== Level {}: {} ===", view.current_level(), view.level_title());
        for (i, zone) in zones.iter().enumerate() {
            println!("  {}: {}", i, zone.label);
        }
        self.get_user_choice("Where to?", zones.len(), false, view)
            .unwrap_or(0)
    }

    fn choose_purchase(&mut self, view: &GameStateView, offers: &[ShopOffer]) -> Option<usize> {
        println!("\n=== Scroll Merchant ===");
        for (i, offer) in offers.iter().enumerate() {
            println!("  {}: {} ({} left)", i, offer.label(), offer.stock);
        }
        self.get_user_choice("Buy? ('x' to leave)", offers.len(), true, view)
    }

    fn on_game_end(&mut self, view: &GameStateView, won: bool) {
        if won {
            println!("\nYou set out on the road. Victory!");
        } else {
            println!("\nYou fell on level {}.", view.current_level());
        }
    }
}
