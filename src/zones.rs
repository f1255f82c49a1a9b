//! Card piles (draw pile, hand, discard pile)

use crate::core::CardKey;
use serde::{Deserialize, Serialize};

/// An ordered pile of cards (top of a pile is the end of the vector)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CardZone {
    pub cards: Vec<CardKey>,
}

impl CardZone {
    pub fn new() -> Self {
        CardZone { cards: Vec::new() }
    }

    pub fn add(&mut self, card: CardKey) {
        self.cards.push(card);
    }

    /// Remove the first copy of a card
    pub fn remove(&mut self, card: &CardKey) -> bool {
        if let Some(pos) = self.cards.iter().position(|c| c == card) {
            // remove() rather than swap_remove() so hand order stays stable
            self.cards.remove(pos);
            true
        } else {
            false
        }
    }

    /// Number of copies of a card in this zone
    pub fn count(&self, card: &CardKey) -> usize {
        self.cards.iter().filter(|c| *c == card).count()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Draw from top
    pub fn draw_top(&mut self) -> Option<CardKey> {
        self.cards.pop()
    }

    pub fn shuffle(&mut self, rng: &mut impl rand::Rng) {
        use rand::seq::SliceRandom;
        self.cards.shuffle(rng);
    }

    /// Take every card out of this zone
    pub fn take_all(&mut self) -> Vec<CardKey> {
        std::mem::take(&mut self.cards)
    }
}

/// The player's three piles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerZones {
    pub draw_pile: CardZone,
    pub hand: CardZone,
    pub discard_pile: CardZone,
}

impl Default for PlayerZones {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerZones {
    pub fn new() -> Self {
        PlayerZones {
            draw_pile: CardZone::new(),
            hand: CardZone::new(),
            discard_pile: CardZone::new(),
        }
    }

    /// Build piles from a full deck, shuffled into the draw pile
    pub fn from_deck(cards: Vec<CardKey>, rng: &mut impl rand::Rng) -> Self {
        let mut zones = PlayerZones::new();
        zones.draw_pile.cards = cards;
        zones.draw_pile.shuffle(rng);
        zones
    }

    /// Draw one card into the hand
    ///
    /// An empty draw pile is refilled from the discard pile (reshuffled)
    /// first. Returns `None` and leaves the hand untouched when both piles
    /// are empty.
    pub fn draw_card(&mut self, rng: &mut impl rand::Rng) -> Option<CardKey> {
        if self.draw_pile.is_empty() {
            self.draw_pile.cards = self.discard_pile.take_all();
            self.draw_pile.shuffle(rng);
        }

        let card = self.draw_pile.draw_top()?;
        self.hand.add(card.clone());
        Some(card)
    }

    /// Move one copy of a card from hand to the discard pile
    pub fn discard_from_hand(&mut self, card: &CardKey) -> bool {
        if self.hand.remove(card) {
            self.discard_pile.add(card.clone());
            true
        } else {
            false
        }
    }

    pub fn total_cards(&self) -> usize {
        self.draw_pile.len() + self.hand.len() + self.discard_pile.len()
    }
}
