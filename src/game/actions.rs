//! Player actions: queueing attacks, playing cards, using items

use crate::core::{CardDefinition, CardKey, EnemyId, TargetArea};
use crate::game::controller::TurnAction;
use crate::game::event::GameEvent;
use crate::game::level::LevelKind;
use crate::game::GameState;
use crate::inventory::{BackpackError, Item, PotionKind, ScrollEffect, BACKPACK_SLOTS};
use crate::{GameError, Result};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// An attack committed during the player's turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueuedAttack {
    pub card: CardKey,
    pub target: EnemyId,
    /// Cost at queue time; held in `Player::reserved` until resolution
    pub cost: u32,
}

impl GameState {
    fn require_player_turn(&self) -> Result<()> {
        if self.is_player_turn() && self.outcome.is_none() {
            Ok(())
        } else {
            Err(GameError::NotPlayerTurn)
        }
    }

    /// Copies of a card already waiting in the attack queue
    pub fn queued_copies(&self, card: &CardKey) -> usize {
        self.attack_queue.iter().filter(|q| &q.card == card).count()
    }

    /// Copies of a card in hand that are not spoken for by the queue
    pub fn free_copies(&self, card: &CardKey) -> usize {
        self.zones
            .hand
            .count(card)
            .saturating_sub(self.queued_copies(card))
    }

    /// Look up a card the player could commit right now
    fn playable(&self, card: &CardKey) -> Result<CardDefinition> {
        let def = self.catalog.get(card)?.clone();
        if self.free_copies(card) == 0 {
            return Err(GameError::CardNotInHand(card.clone()));
        }
        Ok(def)
    }

    /// Fail with a shortage notification if `cost` exceeds what is left
    ///
    /// Nothing but the notification event is recorded on failure.
    fn ensure_affordable(&mut self, cost: u32) -> Result<()> {
        let available = self.player.available_resource();
        if cost <= available {
            return Ok(());
        }
        let resource = self.player.class.resource_name();
        self.emit(GameEvent::ResourceShortage {
            resource,
            required: cost,
            available,
        });
        Err(GameError::InsufficientResource {
            resource,
            required: cost,
            available,
        })
    }

    fn require_living_enemy(&self, target: EnemyId) -> Result<()> {
        match self.enemy(target) {
            Some(_) => Ok(()),
            None => Err(GameError::EnemyNotFound(target)),
        }
    }

    /// Commit an attack card against a target; it resolves on end turn
    pub fn queue_attack(&mut self, card: &CardKey, target: EnemyId) -> Result<()> {
        self.require_player_turn()?;
        let def = self.playable(card)?;
        if !def.is_targeted() {
            return Err(GameError::InvalidAction(format!(
                "{} does not attack an enemy",
                def.name
            )));
        }
        self.require_living_enemy(target)?;
        self.ensure_affordable(def.cost)?;

        self.attack_queue.push(QueuedAttack {
            card: card.clone(),
            target,
            cost: def.cost,
        });
        self.player.reserve(def.cost);
        self.emit(GameEvent::CardQueued {
            card: card.clone(),
            target,
            cost: def.cost,
        });
        Ok(())
    }

    /// Take the first queued copy of a card back
    pub fn unqueue(&mut self, card: &CardKey) -> Result<QueuedAttack> {
        self.require_player_turn()?;
        let pos = self
            .attack_queue
            .iter()
            .position(|q| &q.card == card)
            .ok_or_else(|| GameError::InvalidAction(format!("{} is not queued", card)))?;
        let entry = self.attack_queue.remove(pos);
        self.player.release(entry.cost);
        self.emit(GameEvent::CardUnqueued {
            card: entry.card.clone(),
            cost: entry.cost,
        });
        Ok(entry)
    }

    /// Play a card immediately (defense cards, or attacks that hit everything)
    pub fn play_card(&mut self, card: &CardKey) -> Result<()> {
        self.require_player_turn()?;
        let def = self.playable(card)?;
        if def.area == TargetArea::SingleEnemy {
            return Err(GameError::InvalidAction(format!("{} needs a target", def.name)));
        }
        self.ensure_affordable(def.cost)?;
        self.play_now(def, None);
        Ok(())
    }

    /// Play an attack card immediately against a target
    pub fn play_card_on(&mut self, card: &CardKey, target: EnemyId) -> Result<()> {
        self.require_player_turn()?;
        let def = self.playable(card)?;
        if !def.is_targeted() {
            return Err(GameError::InvalidAction(format!(
                "{} does not attack an enemy",
                def.name
            )));
        }
        self.require_living_enemy(target)?;
        self.ensure_affordable(def.cost)?;
        self.play_now(def, Some(target));
        Ok(())
    }

    fn play_now(&mut self, def: CardDefinition, target: Option<EnemyId>) {
        self.zones.discard_from_hand(&def.key);
        self.player.spend(def.cost);
        self.emit(GameEvent::CardPlayed {
            card: def.key.clone(),
        });
        self.resolve_card(&def, target);
    }

    /// Use a potion or scroll from the backpack; the item is consumed
    pub fn use_item(&mut self, slot: usize) -> Result<Item> {
        if self.outcome.is_some() {
            return Err(GameError::InvalidAction("the game is over".into()));
        }
        match self.backpack.get(slot) {
            None if slot >= BACKPACK_SLOTS => return Err(BackpackError::InvalidSlot(slot).into()),
            None => return Err(BackpackError::EmptySlot(slot).into()),
            Some(Item::Marker(name)) => {
                return Err(GameError::InvalidAction(format!("{} cannot be used", name)))
            }
            Some(Item::Scroll(scroll)) => {
                if matches!(scroll.effect, ScrollEffect::DamageAllEnemies(_))
                    && !self.has_targets()
                {
                    return Err(GameError::InvalidAction(format!(
                        "{} has nothing to hit here",
                        scroll.display_name()
                    )));
                }
            }
            Some(_) => {}
        }

        let item = self.backpack.take_item(slot)?;
        match &item {
            Item::Potion(potion) => match potion.kind {
                PotionKind::Health => self.player.heal(potion.amount),
                PotionKind::Mana => self.player.gain_resource(potion.amount),
            },
            Item::Scroll(scroll) => match scroll.effect {
                ScrollEffect::Nothing => {}
                ScrollEffect::DamageAllEnemies(amount) => {
                    let ids: Vec<EnemyId> = self.enemies.iter().map(|e| e.id).collect();
                    for id in ids {
                        self.damage_enemy(id, amount);
                    }
                    self.check_level_completion();
                }
                ScrollEffect::Ward(amount) => {
                    self.player.gain_defense(amount);
                    self.emit(GameEvent::DefenseGained {
                        amount,
                        total: self.player.defense,
                    });
                }
            },
            Item::Marker(_) => {}
        }
        self.emit(GameEvent::ItemUsed {
            item: item.display_name(),
            slot,
        });
        Ok(item)
    }

    /// Would using this item do anything right now?
    pub fn item_is_useful(&self, item: &Item) -> bool {
        let p = &self.player;
        match item {
            Item::Potion(potion) => match potion.kind {
                PotionKind::Health => p.health + potion.amount <= p.max_health,
                PotionKind::Mana => p.resource + potion.amount <= p.max_resource,
            },
            Item::Scroll(scroll) => match scroll.effect {
                ScrollEffect::Nothing => false,
                ScrollEffect::DamageAllEnemies(_) => self.has_targets(),
                ScrollEffect::Ward(_) => p.defense < p.max_defense,
            },
            Item::Marker(_) => false,
        }
    }

    /// Enemies on the field of a combat level
    fn has_targets(&self) -> bool {
        self.current_level_kind() == Some(LevelKind::Combat) && !self.enemies.is_empty()
    }

    /// Buy from the open shop
    pub fn buy_item(&mut self, offer: usize) -> Result<usize> {
        if !self.shop.is_open {
            return Err(GameError::InvalidAction("the shop is closed".into()));
        }
        let slot = self.shop.buy(offer, &mut self.backpack)?;
        let item = self
            .backpack
            .get(slot)
            .map(|i| i.display_name())
            .unwrap_or_default();
        self.emit(GameEvent::ItemPurchased { item, slot });
        Ok(slot)
    }

    pub fn close_shop(&mut self) {
        if self.shop.is_open {
            self.shop.is_open = false;
            self.emit(GameEvent::ShopClosed);
        }
    }

    /// Every action the player could take right now, ending with `EndTurn`
    ///
    /// Empty outside the player's turn. Cards are listed in hand order, one
    /// entry per distinct card and target.
    pub fn available_actions(&self) -> Vec<TurnAction> {
        let mut actions = Vec::new();
        if self.require_player_turn().is_err() {
            return actions;
        }

        let available = self.player.available_resource();
        let mut seen: SmallVec<[&CardKey; 8]> = SmallVec::new();
        for card in &self.zones.hand.cards {
            if seen.contains(&card) {
                continue;
            }
            seen.push(card);

            let Ok(def) = self.catalog.get(card) else {
                continue;
            };
            if def.cost > available || self.free_copies(card) == 0 {
                continue;
            }
            match def.area {
                TargetArea::SingleEnemy => {
                    for enemy in &self.enemies {
                        actions.push(TurnAction::QueueAttack {
                            card: card.clone(),
                            target: enemy.id,
                        });
                    }
                }
                TargetArea::AllEnemies => {
                    if let Some(first) = self.enemies.first() {
                        actions.push(TurnAction::QueueAttack {
                            card: card.clone(),
                            target: first.id,
                        });
                    }
                }
                TargetArea::Player => actions.push(TurnAction::PlayCard { card: card.clone() }),
            }
        }

        for (slot, item) in self.backpack.items() {
            if self.item_is_useful(item) {
                actions.push(TurnAction::UseItem { slot });
            }
        }

        actions.push(TurnAction::EndTurn);
        actions
    }

    pub fn apply_action(&mut self, action: &TurnAction) -> Result<()> {
        match action {
            TurnAction::QueueAttack { card, target } => self.queue_attack(card, *target),
            TurnAction::Unqueue { card } => self.unqueue(card).map(|_| ()),
            TurnAction::PlayCard { card } => self.play_card(card),
            TurnAction::PlayCardOn { card, target } => self.play_card_on(card, *target),
            TurnAction::UseItem { slot } => self.use_item(*slot).map(|_| ()),
            TurnAction::EndTurn => self.end_turn(),
        }
    }
}
