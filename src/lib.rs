//! Ember Crawl - turn-based card combat engine
//!
//! A warrior or mage fights through the graveyard and forest, then explores
//! the town. Cards are queued against enemies and resolved on end turn.

pub mod config;
pub mod core;
pub mod error;
pub mod game;
pub mod inventory;
pub mod loader;
pub mod zones;

pub use error::{GameError, Result};
