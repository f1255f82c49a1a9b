//! Turn resolution: draining the attack queue and the enemy turn

use crate::core::{CardDefinition, CardType, DamageReport, EnemyId, PlayerClass, TargetArea};
use crate::game::event::{GameEvent, SoundCue};
use crate::game::phase::{GameOutcome, TurnPhase};
use crate::game::GameState;
use crate::{GameError, Result};
use rand::Rng;

impl GameState {
    /// End the player's turn
    ///
    /// Resolves the queue, then (unless the level was cleared or the player
    /// is dead) runs the enemy turn and starts the next player turn.
    pub fn end_turn(&mut self) -> Result<()> {
        if !self.is_player_turn() || self.outcome.is_some() {
            return Err(GameError::NotPlayerTurn);
        }
        self.phase = TurnPhase::ResolvingAttacks;
        self.execute_queued_attacks();

        if self.is_level_transitioning || self.outcome.is_some() {
            return Ok(());
        }

        self.enemy_turn();
        if self.outcome.is_some() {
            return Ok(());
        }
        self.start_player_turn();
        Ok(())
    }

    /// Resolve every queued attack in order
    ///
    /// Each entry pays its cost and leaves the hand even if no enemy is left
    /// to hit; draining stops at the first entry that finds the field empty.
    pub fn execute_queued_attacks(&mut self) {
        let queue = std::mem::take(&mut self.attack_queue);

        for entry in queue {
            let def = match self.catalog.get(&entry.card) {
                Ok(def) => def.clone(),
                Err(_) => {
                    self.logger.verbose(&format!("Skipping unknown queued card {}", entry.card));
                    continue;
                }
            };

            self.zones.discard_from_hand(&entry.card);
            self.player.spend(entry.cost);
            self.player.release(entry.cost);

            if self.enemies.is_empty() {
                break;
            }
            self.resolve_card(&def, Some(entry.target));
        }

        self.attack_queue.clear();
        self.player.reserved = 0;
    }

    /// Apply a card's effect (damage and defense)
    ///
    /// A single-target card whose target has already died hits the first
    /// enemy still standing instead.
    pub(crate) fn resolve_card(&mut self, def: &CardDefinition, target: Option<EnemyId>) {
        if let Some(cue) = SoundCue::for_card(&def.key) {
            self.emit(GameEvent::Sound { cue });
        }

        match def.area {
            TargetArea::AllEnemies if !self.enemies.is_empty() => {
                self.emit(GameEvent::AttackResolved {
                    card: def.key.clone(),
                    target: None,
                });
                let ids: Vec<EnemyId> = self.enemies.iter().map(|e| e.id).collect();
                for id in ids {
                    self.damage_enemy(id, def.attack);
                }
                self.check_level_completion();
            }
            TargetArea::SingleEnemy => {
                let target = target
                    .filter(|id| self.enemy(*id).is_some())
                    .or_else(|| self.enemies.first().map(|e| e.id));
                if let Some(id) = target {
                    self.emit(GameEvent::AttackResolved {
                        card: def.key.clone(),
                        target: Some(id),
                    });
                    if self.damage_enemy(id, def.attack) {
                        self.check_level_completion();
                    }
                }
            }
            _ => {}
        }

        if def.defense > 0 && def.card_type != CardType::Attack {
            self.player.gain_defense(def.defense);
            self.emit(GameEvent::DefenseGained {
                amount: def.defense,
                total: self.player.defense,
            });
        }
    }

    /// Damage one enemy, removing it from the field if it dies
    ///
    /// Returns true if the enemy died.
    pub(crate) fn damage_enemy(&mut self, id: EnemyId, amount: u32) -> bool {
        let Some(pos) = self.enemies.iter().position(|e| e.id == id) else {
            return false;
        };
        let dead = self.enemies[pos].take_damage(amount);
        self.emit(GameEvent::EnemyDamaged {
            enemy: id,
            amount,
            remaining: self.enemies[pos].health,
        });

        if dead {
            let enemy = self.enemies.remove(pos);
            if let Some(cue) = SoundCue::death_of(enemy.kind) {
                self.emit(GameEvent::Sound { cue });
            }
            self.emit(GameEvent::EnemyDefeated {
                enemy: enemy.id,
                kind: enemy.kind,
            });
        }
        dead
    }

    /// Every enemy, in order, hits the player once
    pub fn enemy_turn(&mut self) {
        self.phase = TurnPhase::EnemyTurn;
        self.emit(GameEvent::EnemyTurnStarted);

        let attackers: Vec<_> = self.enemies.iter().map(|e| (e.id, e.kind)).collect();
        let (min, max) = (self.ruleset.enemy_damage_min, self.ruleset.enemy_damage_max);

        for (enemy, kind) in attackers {
            if self.outcome.is_some() {
                break;
            }
            let damage = self.rng.gen_range(min..=max);
            self.emit(GameEvent::EnemyAttackFrame {
                enemy,
                kind,
                damage,
            });
            self.apply_enemy_damage(damage);
        }
    }

    /// Take a hit: defense absorbs first, the rest comes off health
    ///
    /// Warriors turn unabsorbed damage into rage. Health reaching zero ends
    /// the game.
    pub fn apply_enemy_damage(&mut self, damage: u32) -> DamageReport {
        let had_defense = self.player.defense > 0;
        let report = self.player.take_damage(damage);

        if had_defense {
            self.emit(GameEvent::Sound {
                cue: SoundCue::ShieldHit,
            });
        }
        if report.taken > 0 && self.player.class == PlayerClass::Mage {
            let cue = self.next_hurt_cue();
            self.emit(GameEvent::Sound { cue });
        }
        self.emit(GameEvent::PlayerDamaged {
            absorbed: report.absorbed,
            taken: report.taken,
            health: self.player.health,
        });

        if self.player.class == PlayerClass::Warrior && report.taken > 0 {
            self.player.gain_resource(report.taken);
            self.emit(GameEvent::ResourceGained {
                amount: report.taken,
                total: self.player.resource,
            });
        }

        if self.player.is_dead() {
            self.declare_outcome(GameOutcome::Defeat);
        }
        report
    }

    /// Begin a player turn: class resource tick and a fresh hand
    pub fn start_player_turn(&mut self) {
        match self.player.class {
            PlayerClass::Mage => {
                self.player.resource = self.ruleset.mage_mana_per_turn;
            }
            PlayerClass::Warrior => {
                self.player.gain_resource(self.ruleset.warrior_rage_per_turn);
            }
        }
        self.player.reserved = 0;
        self.turn_number += 1;
        self.phase = TurnPhase::PlayerTurn;
        self.emit(GameEvent::TurnStarted {
            turn: self.turn_number,
            resource: self.player.resource,
        });
        self.refill_hand();
    }
}
