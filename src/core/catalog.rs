//! Card catalog
//!
//! Static lookup table from card key to definition, plus the starter deck
//! for each class.

use crate::core::{CardDefinition, CardKey, CardName, CardType, PlayerClass};
use crate::loader::{DeckEntry, DeckList};
use crate::{GameError, Result};
use rustc_hash::FxHashMap;

/// Lookup table of every known card
#[derive(Debug, Clone, Default)]
pub struct CardCatalog {
    cards: FxHashMap<CardKey, CardDefinition>,
}

impl CardCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in card set
    pub fn standard() -> Self {
        use CardType::*;
        let mut catalog = CardCatalog::new();

        // Warrior
        catalog.insert(CardDefinition::new("strike", "Strike", Attack, 10, 0, 2));
        catalog.insert(CardDefinition::new("heavy_blow", "Heavy Blow", Attack, 25, 0, 3));
        catalog.insert(CardDefinition::new("rage_slash", "Rage Slash", Attack, 18, 0, 2));
        catalog.insert(CardDefinition::new("shield_block", "Shield Block", Defense, 0, 10, 1));
        catalog.insert(CardDefinition::new("iron_wall", "Iron Wall", Defense, 0, 20, 3));

        // Mage
        catalog.insert(CardDefinition::new("fireball", "Fireball", Magic, 25, 0, 3));
        catalog.insert(CardDefinition::new("blaze_bolt", "Blaze Bolt", Magic, 15, 0, 2));
        catalog.insert(CardDefinition::new("molten_strike", "Molten Strike", Magic, 30, 0, 4));
        catalog.insert(CardDefinition::new("flame_burst", "Flame Burst", Magic, 20, 5, 3));
        catalog.insert(CardDefinition::new("heat_wave", "Heat Wave", Magic, 10, 0, 3).hitting_all());
        catalog.insert(CardDefinition::new("pyroclasm", "Pyroclasm", Magic, 15, 0, 4).hitting_all());
        catalog.insert(
            CardDefinition::new("meteor_strike", "Meteor Strike", Magic, 35, 0, 6).hitting_all(),
        );
        catalog.insert(CardDefinition::new("inferno", "Inferno", Magic, 25, 0, 5).hitting_all());
        catalog.insert(CardDefinition::new("arcane_shield", "Arcane Shield", Defense, 0, 15, 2));

        catalog
    }

    pub fn insert(&mut self, card: CardDefinition) {
        self.cards.insert(card.key.clone(), card);
    }

    /// Get a card by key
    pub fn get(&self, key: &CardKey) -> Result<&CardDefinition> {
        self.cards
            .get(key)
            .ok_or_else(|| GameError::UnknownCard(key.to_string()))
    }

    pub fn contains(&self, key: &CardKey) -> bool {
        self.cards.contains_key(key)
    }

    /// Look a card up by its display name ("Meteor Strike")
    pub fn find_by_name(&self, name: &str) -> Option<&CardDefinition> {
        self.cards.get(&CardName::new(name).to_key())
    }

    /// All cards, sorted by key for stable listings
    pub fn sorted(&self) -> Vec<&CardDefinition> {
        let mut cards: Vec<_> = self.cards.values().collect();
        cards.sort_by(|a, b| a.key.cmp(&b.key));
        cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Default deck list for a class
    pub fn starter_deck(&self, class: PlayerClass) -> DeckList {
        let entries: &[(&str, u8)] = match class {
            PlayerClass::Warrior => &[
                ("Strike", 6),
                ("Heavy Blow", 3),
                ("Rage Slash", 3),
                ("Shield Block", 4),
                ("Iron Wall", 2),
            ],
            PlayerClass::Mage => &[
                ("Fireball", 3),
                ("Blaze Bolt", 4),
                ("Molten Strike", 2),
                ("Flame Burst", 2),
                ("Heat Wave", 2),
                ("Pyroclasm", 1),
                ("Meteor Strike", 1),
                ("Inferno", 1),
                ("Arcane Shield", 2),
            ],
        };

        DeckList {
            main_deck: entries
                .iter()
                .map(|(name, count)| DeckEntry {
                    card_name: CardName::new(*name),
                    count: *count,
                })
                .collect(),
        }
    }
}
