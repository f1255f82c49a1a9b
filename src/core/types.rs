//! Strongly-typed wrappers for game concepts
//!
//! Cards are identified by short string keys ("fireball", "shield_block")
//! throughout the deck piles and the attack queue. Wrapping them keeps a key
//! from being confused with a display name.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Catalog key of a card (e.g. "fireball")
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardKey(String);

impl CardKey {
    pub fn new(s: impl Into<String>) -> Self {
        CardKey(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for CardKey {
    fn from(s: String) -> Self {
        CardKey(s)
    }
}

impl From<&str> for CardKey {
    fn from(s: &str) -> Self {
        CardKey(s.to_string())
    }
}

/// Card name (distinct from other string types)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardName(String);

impl CardName {
    pub fn new(s: impl Into<String>) -> Self {
        CardName(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Derive the catalog key this name would be registered under
    ///
    /// "Meteor Strike" becomes "meteor_strike". Non-ASCII letters are folded
    /// to their closest ASCII form first so deck files typed with accents
    /// still resolve.
    pub fn to_key(&self) -> CardKey {
        let ascii = deunicode::deunicode(&self.0);
        let mut key = String::with_capacity(ascii.len());
        let mut pending_sep = false;
        for ch in ascii.chars() {
            if ch.is_ascii_alphanumeric() {
                if pending_sep && !key.is_empty() {
                    key.push('_');
                }
                pending_sep = false;
                key.push(ch.to_ascii_lowercase());
            } else {
                pending_sep = true;
            }
        }
        CardKey(key)
    }
}

impl fmt::Display for CardName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for CardName {
    fn from(s: String) -> Self {
        CardName(s)
    }
}

impl From<&str> for CardName {
    fn from(s: &str) -> Self {
        CardName(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_key() {
        let key = CardKey::new("fireball");
        assert_eq!(key.as_str(), "fireball");
        assert_eq!(key.to_string(), "fireball");
    }

    #[test]
    fn test_card_name_to_key() {
        assert_eq!(CardName::new("Meteor Strike").to_key().as_str(), "meteor_strike");
        assert_eq!(CardName::new("  Heat-Wave ").to_key().as_str(), "heat_wave");
        assert_eq!(CardName::new("Pyroclasm").to_key().as_str(), "pyroclasm");
    }

    #[test]
    fn test_card_name_unicode_folding() {
        assert_eq!(CardName::new("Flamé Burst").to_key().as_str(), "flame_burst");
    }
}
