//! Entity identifiers for combat units

use serde::{Deserialize, Serialize};
use std::fmt;

/// Simple integer ID for enemies on the field
///
/// IDs are handed out by the game state in spawn order and are never reused
/// within a campaign, so a queued attack can safely refer to a target that
/// has since died.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EnemyId(u32);

impl EnemyId {
    pub fn new(id: u32) -> Self {
        EnemyId(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for EnemyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Base trait for things that take part in combat
pub trait GameEntity {
    fn name(&self) -> &str;
    fn health(&self) -> u32;

    fn is_alive(&self) -> bool {
        self.health() > 0
    }
}
