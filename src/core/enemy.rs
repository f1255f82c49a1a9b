//! Enemy units

use crate::core::{EnemyId, GameEntity};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Enemy archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Executioner,
    Skeleton,
    FlyingDemon,
    Werewolf,
}

impl EnemyKind {
    pub fn name(&self) -> &'static str {
        match self {
            EnemyKind::Executioner => "Executioner",
            EnemyKind::Skeleton => "Skeleton",
            EnemyKind::FlyingDemon => "Flying Demon",
            EnemyKind::Werewolf => "Werewolf",
        }
    }

    /// Sound cue played when a unit of this kind dies
    pub fn death_cue(&self) -> Option<&'static str> {
        match self {
            EnemyKind::Executioner => Some("exdeath"),
            EnemyKind::Skeleton => Some("skeledead"),
            EnemyKind::Werewolf => Some("wolfdead"),
            EnemyKind::FlyingDemon => None,
        }
    }

    /// Length of the attack animation in milliseconds
    ///
    /// The hit lands partway through; the next enemy waits for the whole
    /// animation to finish.
    pub fn attack_duration_ms(&self) -> u64 {
        match self {
            EnemyKind::FlyingDemon => 1200,
            _ => 2600,
        }
    }
}

impl fmt::Display for EnemyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// An enemy on the field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EnemyId,
    pub kind: EnemyKind,
    pub health: u32,
    pub max_health: u32,
}

impl Enemy {
    pub fn new(id: EnemyId, kind: EnemyKind, max_health: u32) -> Self {
        Enemy {
            id,
            kind,
            health: max_health,
            max_health,
        }
    }

    /// Apply damage, returning true if this hit killed the enemy
    pub fn take_damage(&mut self, amount: u32) -> bool {
        self.health = self.health.saturating_sub(amount);
        self.health == 0
    }

    /// Health as a percentage of maximum, for health bars
    pub fn health_percent(&self) -> u32 {
        if self.max_health == 0 {
            return 0;
        }
        self.health * 100 / self.max_health
    }
}

impl GameEntity for Enemy {
    fn name(&self) -> &str {
        self.kind.name()
    }

    fn health(&self) -> u32 {
        self.health
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_damage() {
        let mut enemy = Enemy::new(EnemyId::new(1), EnemyKind::Skeleton, 80);
        assert!(!enemy.take_damage(30));
        assert_eq!(enemy.health, 50);
        assert_eq!(enemy.health_percent(), 62);
        assert!(enemy.take_damage(60));
        assert_eq!(enemy.health, 0);
        assert!(!enemy.is_alive());
    }

    #[test]
    fn test_kind_metadata() {
        assert_eq!(EnemyKind::FlyingDemon.attack_duration_ms(), 1200);
        assert_eq!(EnemyKind::Werewolf.attack_duration_ms(), 2600);
        assert_eq!(EnemyKind::Skeleton.death_cue(), Some("skeledead"));
        assert_eq!(EnemyKind::FlyingDemon.death_cue(), None);
    }
}
