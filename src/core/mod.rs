//! Core game types and entities

pub mod card;
pub mod catalog;
pub mod enemy;
pub mod entity;
pub mod player;
pub mod types;

pub use card::{CardDefinition, CardType, TargetArea};
pub use catalog::CardCatalog;
pub use enemy::{Enemy, EnemyKind};
pub use entity::{EnemyId, GameEntity};
pub use player::{ClassProfile, DamageReport, Player, PlayerClass};
pub use types::{CardKey, CardName};
