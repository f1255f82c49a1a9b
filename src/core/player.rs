//! Player character representation

use serde::{Deserialize, Serialize};
use std::fmt;

/// Playable character classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerClass {
    Warrior,
    Mage,
}

impl PlayerClass {
    /// Name of the resource this class spends on cards
    pub fn resource_name(&self) -> &'static str {
        match self {
            PlayerClass::Warrior => "Rage",
            PlayerClass::Mage => "Mana",
        }
    }

    /// Base stats for a fresh character of this class
    pub fn profile(&self) -> ClassProfile {
        match self {
            PlayerClass::Warrior => ClassProfile {
                health: 100,
                defense: 0,
                max_resource: 20,
                starting_resource: 4,
            },
            PlayerClass::Mage => ClassProfile {
                health: 100,
                defense: 0,
                max_resource: 11,
                starting_resource: 11,
            },
        }
    }
}

impl fmt::Display for PlayerClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerClass::Warrior => write!(f, "Warrior"),
            PlayerClass::Mage => write!(f, "Mage"),
        }
    }
}

impl std::str::FromStr for PlayerClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "warrior" => Ok(PlayerClass::Warrior),
            "mage" | "wizard" => Ok(PlayerClass::Mage),
            _ => Err(format!("unknown class '{s}' (expected: warrior, mage)")),
        }
    }
}

/// Starting stats of a class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassProfile {
    pub health: u32,
    pub defense: u32,
    pub max_resource: u32,
    pub starting_resource: u32,
}

/// How an incoming hit was split between defense and health
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DamageReport {
    pub absorbed: u32,
    pub taken: u32,
}

/// The player character's mutable combat stats
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub class: PlayerClass,
    pub health: u32,
    pub max_health: u32,
    pub defense: u32,
    pub max_defense: u32,

    /// Rage or mana currently held
    pub resource: u32,
    pub max_resource: u32,

    /// Portion of `resource` committed to queued attacks
    pub reserved: u32,
}

impl Player {
    pub fn new(class: PlayerClass, max_defense: u32) -> Self {
        let profile = class.profile();
        Player {
            class,
            health: profile.health,
            max_health: profile.health,
            defense: profile.defense,
            max_defense,
            resource: profile.starting_resource,
            max_resource: profile.max_resource,
            reserved: 0,
        }
    }

    /// Resource not yet committed to the attack queue
    pub fn available_resource(&self) -> u32 {
        self.resource.saturating_sub(self.reserved)
    }

    pub fn can_afford(&self, cost: u32) -> bool {
        cost <= self.available_resource()
    }

    pub fn reserve(&mut self, cost: u32) {
        self.reserved += cost;
    }

    pub fn release(&mut self, cost: u32) {
        self.reserved = self.reserved.saturating_sub(cost);
    }

    /// Pay a cost, never dropping below zero
    pub fn spend(&mut self, cost: u32) {
        self.resource = self.resource.saturating_sub(cost);
    }

    pub fn gain_resource(&mut self, amount: u32) {
        self.resource = (self.resource + amount).min(self.max_resource);
    }

    pub fn gain_defense(&mut self, amount: u32) {
        self.defense = (self.defense + amount).min(self.max_defense);
    }

    pub fn heal(&mut self, amount: u32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    /// Apply an incoming hit: defense soaks it up first, the rest hits health
    pub fn take_damage(&mut self, damage: u32) -> DamageReport {
        let absorbed = damage.min(self.defense);
        self.defense -= absorbed;
        let taken = damage - absorbed;
        self.health = self.health.saturating_sub(taken);
        DamageReport { absorbed, taken }
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_creation() {
        let warrior = Player::new(PlayerClass::Warrior, 100);
        assert_eq!(warrior.health, 100);
        assert_eq!(warrior.resource, 4);
        assert_eq!(warrior.reserved, 0);

        let mage = Player::new(PlayerClass::Mage, 100);
        assert_eq!(mage.resource, 11);
        assert_eq!(mage.class.resource_name(), "Mana");
    }

    #[test]
    fn test_defense_absorbs_first() {
        let mut player = Player::new(PlayerClass::Mage, 100);
        player.defense = 3;

        let report = player.take_damage(5);
        assert_eq!(report, DamageReport { absorbed: 3, taken: 2 });
        assert_eq!(player.defense, 0);
        assert_eq!(player.health, 98);

        player.defense = 10;
        let report = player.take_damage(4);
        assert_eq!(report.taken, 0);
        assert_eq!(player.defense, 6);
        assert_eq!(player.health, 98);
    }

    #[test]
    fn test_health_clamped_at_zero() {
        let mut player = Player::new(PlayerClass::Warrior, 100);
        player.health = 2;
        player.take_damage(5);
        assert_eq!(player.health, 0);
        assert!(player.is_dead());
    }

    #[test]
    fn test_reserve_and_spend() {
        let mut player = Player::new(PlayerClass::Warrior, 100);
        player.reserve(3);
        assert_eq!(player.available_resource(), 1);
        assert!(!player.can_afford(2));
        player.release(3);
        assert!(player.can_afford(4));

        player.spend(10);
        assert_eq!(player.resource, 0);
    }

    #[test]
    fn test_caps() {
        let mut player = Player::new(PlayerClass::Warrior, 100);
        player.gain_defense(150);
        assert_eq!(player.defense, 100);
        player.gain_resource(100);
        assert_eq!(player.resource, player.max_resource);
        player.health = 90;
        player.heal(30);
        assert_eq!(player.health, 100);
    }

    #[test]
    fn test_class_parse() {
        assert_eq!("Mage".parse::<PlayerClass>(), Ok(PlayerClass::Mage));
        assert_eq!("warrior".parse::<PlayerClass>(), Ok(PlayerClass::Warrior));
        assert!("rogue".parse::<PlayerClass>().is_err());
    }
}
