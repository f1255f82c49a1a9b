//! Deck file loader (.dck format)

use crate::core::{CardCatalog, CardKey, CardName};
use crate::{GameError, Result};
use std::fs;
use std::path::Path;

/// Deck loader for .dck files
pub struct DeckLoader;

impl DeckLoader {
    /// Load a deck from a .dck file
    pub fn load_from_file(path: &Path) -> Result<DeckList> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse a deck from its text content
    ///
    /// Format: one `<count> <Card Name>` per line. Blank lines, `#` comments
    /// and `[section]` headers are ignored.
    pub fn parse(content: &str) -> Result<DeckList> {
        let mut main_deck = Vec::new();

        for (line_no, line) in content.lines().enumerate() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }

            let (count_str, rest) = line.split_once(' ').ok_or_else(|| {
                GameError::InvalidDeckFormat(format!("line {}: expected '<count> <name>'", line_no + 1))
            })?;
            let count = count_str.parse::<u8>().map_err(|_| {
                GameError::InvalidDeckFormat(format!(
                    "line {}: invalid count '{}'",
                    line_no + 1,
                    count_str
                ))
            })?;
            if count == 0 {
                continue;
            }

            main_deck.push(DeckEntry {
                card_name: CardName::new(rest.trim()),
                count,
            });
        }

        if main_deck.is_empty() {
            return Err(GameError::InvalidDeckFormat("Empty deck".to_string()));
        }

        Ok(DeckList { main_deck })
    }
}

/// Represents a deck entry (card name and count)
#[derive(Debug, Clone)]
pub struct DeckEntry {
    pub card_name: CardName,
    pub count: u8,
}

impl DeckEntry {
    pub fn key(&self) -> CardKey {
        self.card_name.to_key()
    }
}

/// Represents a complete deck list
#[derive(Debug, Clone)]
pub struct DeckList {
    pub main_deck: Vec<DeckEntry>,
}

impl DeckList {
    /// Total cards in main deck
    pub fn total_cards(&self) -> usize {
        self.main_deck.iter().map(|e| e.count as usize).sum()
    }

    /// Check that every entry names a card in the catalog
    pub fn validate(&self, catalog: &CardCatalog) -> Result<()> {
        for entry in &self.main_deck {
            let key = entry.key();
            if !catalog.contains(&key) {
                return Err(GameError::UnknownCard(entry.card_name.to_string()));
            }
        }
        Ok(())
    }

    /// Expand into one key per physical card, in list order
    pub fn expand(&self) -> Vec<CardKey> {
        let mut cards = Vec::with_capacity(self.total_cards());
        for entry in &self.main_deck {
            let key = entry.key();
            for _ in 0..entry.count {
                cards.push(key.clone());
            }
        }
        cards
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_deck() {
        let content = r#"
[metadata]
Name=Fire Deck

# burn everything
3 Fireball
4 Blaze Bolt
1 Meteor Strike
"#;

        let deck = DeckLoader::parse(content).unwrap();
        assert_eq!(deck.main_deck.len(), 3);
        assert_eq!(deck.total_cards(), 8);
        assert_eq!(deck.main_deck[2].key().as_str(), "meteor_strike");

        let expanded = deck.expand();
        assert_eq!(expanded.len(), 8);
        assert_eq!(expanded[0].as_str(), "fireball");
        assert_eq!(expanded[7].as_str(), "meteor_strike");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(DeckLoader::parse("").is_err());
        assert!(DeckLoader::parse("lots Fireball").is_err());
        assert!(DeckLoader::parse("Fireball").is_err());
    }

    #[test]
    fn test_validate_unknown_card() {
        let catalog = CardCatalog::standard();
        let deck = DeckLoader::parse("2 Fireball\n1 Lightning Bolt").unwrap();
        assert!(matches!(deck.validate(&catalog), Err(GameError::UnknownCard(_))));
    }
}
