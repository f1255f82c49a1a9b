//! Error types for Ember Crawl

use crate::core::{CardKey, EnemyId};
use crate::inventory::BackpackError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Unknown card: {0}")]
    UnknownCard(String),

    #[error("Card not in hand: {0}")]
    CardNotInHand(CardKey),

    #[error("Not enough {resource}: need {required}, have {available}")]
    InsufficientResource {
        resource: &'static str,
        required: u32,
        available: u32,
    },

    #[error("Action not allowed outside the player's turn")]
    NotPlayerTurn,

    #[error("Enemy not found: {0}")]
    EnemyNotFound(EnemyId),

    #[error("Invalid level: {0}")]
    InvalidLevel(u32),

    #[error("Invalid deck format: {0}")]
    InvalidDeckFormat(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid game action: {0}")]
    InvalidAction(String),

    #[error("Backpack error: {0}")]
    Backpack(#[from] BackpackError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        GameError::SerializationError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
