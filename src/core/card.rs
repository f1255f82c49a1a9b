//! Card definitions

use crate::core::{CardKey, CardName};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Card categories
///
/// Attack cards are the Warrior's weapons, Magic cards the Mage's spells.
/// Both are aimed at enemies and go through the attack queue. Defense cards
/// resolve immediately and only touch the player's defense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    Attack,
    Magic,
    Defense,
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CardType::Attack => "Attack",
            CardType::Magic => "Magic",
            CardType::Defense => "Defense",
        };
        write!(f, "{s}")
    }
}

/// What an offensive card hits when it resolves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetArea {
    /// The chosen enemy, or the first surviving enemy if that one died first
    SingleEnemy,
    /// Every enemy on the field at once
    AllEnemies,
    /// No enemy target (defense cards)
    Player,
}

/// Static definition of a card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    pub key: CardKey,
    pub name: CardName,
    pub attack: u32,
    pub defense: u32,
    pub cost: u32,
    pub card_type: CardType,
    pub area: TargetArea,
}

impl CardDefinition {
    pub fn new(
        key: &str,
        name: &str,
        card_type: CardType,
        attack: u32,
        defense: u32,
        cost: u32,
    ) -> Self {
        let area = match card_type {
            CardType::Defense => TargetArea::Player,
            CardType::Attack | CardType::Magic => TargetArea::SingleEnemy,
        };
        CardDefinition {
            key: CardKey::new(key),
            name: CardName::new(name),
            attack,
            defense,
            cost,
            card_type,
            area,
        }
    }

    /// Builder: make this card hit every enemy
    pub fn hitting_all(mut self) -> Self {
        self.area = TargetArea::AllEnemies;
        self
    }

    /// Does this card need an enemy target when played?
    pub fn is_targeted(&self) -> bool {
        matches!(self.card_type, CardType::Attack | CardType::Magic)
    }

    pub fn hits_all_enemies(&self) -> bool {
        self.area == TargetArea::AllEnemies
    }

    /// Short one-line summary for listings
    pub fn summary(&self) -> String {
        let mut s = format!("{} [{}] cost {}", self.name, self.card_type, self.cost);
        if self.attack > 0 {
            s.push_str(&format!(", {} dmg", self.attack));
            if self.hits_all_enemies() {
                s.push_str(" to all");
            }
        }
        if self.defense > 0 {
            s.push_str(&format!(", +{} def", self.defense));
        }
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defense_cards_are_untargeted() {
        let card = CardDefinition::new("shield_block", "Shield Block", CardType::Defense, 0, 10, 1);
        assert!(!card.is_targeted());
        assert_eq!(card.area, TargetArea::Player);
    }

    #[test]
    fn test_hitting_all() {
        let card = CardDefinition::new("inferno", "Inferno", CardType::Magic, 25, 0, 5).hitting_all();
        assert!(card.is_targeted());
        assert!(card.hits_all_enemies());
        assert_eq!(card.summary(), "Inferno [Magic] cost 5, 25 dmg to all");
    }
}
