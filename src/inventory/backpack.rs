//! 16-slot backpack
//!
//! The grid is 4x4. The top row (slots 0-3) is the scroll rack and only
//! takes scrolls; the remaining twelve slots take anything except scrolls.

use super::item::{Item, ItemSpec};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const BACKPACK_SLOTS: usize = 16;
pub const SCROLL_SLOTS: usize = 4;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackpackError {
    #[error("Invalid slot index: {0}")]
    InvalidSlot(usize),

    #[error("Slot {0} only holds scrolls")]
    ScrollsOnly(usize),

    #[error("Slot {0} cannot hold scrolls")]
    NoScrolls(usize),

    #[error("Slot {0} is empty")]
    EmptySlot(usize),

    #[error("No free slot for {0}")]
    NoFreeSlot(String),
}

/// Does a slot accept an item of this shape?
fn check_fit(slot: usize, is_scroll: bool) -> Result<(), BackpackError> {
    if slot >= BACKPACK_SLOTS {
        return Err(BackpackError::InvalidSlot(slot));
    }
    match (slot < SCROLL_SLOTS, is_scroll) {
        (true, false) => Err(BackpackError::ScrollsOnly(slot)),
        (false, true) => Err(BackpackError::NoScrolls(slot)),
        _ => Ok(()),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Backpack {
    slots: Vec<Option<Item>>,
}

impl Default for Backpack {
    fn default() -> Self {
        Self::new()
    }
}

impl Backpack {
    pub fn new() -> Self {
        Backpack {
            slots: vec![None; BACKPACK_SLOTS],
        }
    }

    /// Put a base scroll in every empty scroll slot
    pub fn initialize(&mut self) {
        for slot in self.slots.iter_mut().take(SCROLL_SLOTS) {
            if slot.is_none() {
                *slot = Some(ItemSpec::BaseScroll.into_item());
            }
        }
    }

    pub fn get(&self, slot: usize) -> Option<&Item> {
        self.slots.get(slot).and_then(|s| s.as_ref())
    }

    /// Place an item in a slot, replacing whatever was there
    pub fn add_item(&mut self, spec: ItemSpec, slot: usize) -> Result<(), BackpackError> {
        check_fit(slot, spec.is_scroll())?;
        self.slots[slot] = Some(spec.into_item());
        Ok(())
    }

    /// Place an item in the first free slot that accepts it
    pub fn add_to_free_slot(&mut self, spec: ItemSpec) -> Result<usize, BackpackError> {
        let range = if spec.is_scroll() {
            0..SCROLL_SLOTS
        } else {
            SCROLL_SLOTS..BACKPACK_SLOTS
        };
        let slot = range
            .into_iter()
            .find(|&i| self.slots[i].is_none())
            .ok_or_else(|| BackpackError::NoFreeSlot(spec.clone().into_item().display_name()))?;
        self.add_item(spec, slot)?;
        Ok(slot)
    }

    /// Empty a slot, returning what was in it
    pub fn remove_item(&mut self, slot: usize) -> Result<Option<Item>, BackpackError> {
        if slot >= BACKPACK_SLOTS {
            return Err(BackpackError::InvalidSlot(slot));
        }
        Ok(self.slots[slot].take())
    }

    /// Remove an item that must be present
    pub fn take_item(&mut self, slot: usize) -> Result<Item, BackpackError> {
        self.remove_item(slot)?
            .ok_or(BackpackError::EmptySlot(slot))
    }

    /// Drag an item onto another slot, swapping the two
    ///
    /// Both items must be legal in their new slots; a scroll can never be
    /// swapped down into the lower rows as a side effect.
    pub fn move_item(&mut self, from: usize, to: usize) -> Result<(), BackpackError> {
        if from >= BACKPACK_SLOTS {
            return Err(BackpackError::InvalidSlot(from));
        }
        if to >= BACKPACK_SLOTS {
            return Err(BackpackError::InvalidSlot(to));
        }
        let dragged = self.slots[from].as_ref().ok_or(BackpackError::EmptySlot(from))?;
        check_fit(to, dragged.is_scroll())?;
        if let Some(displaced) = &self.slots[to] {
            check_fit(from, displaced.is_scroll())?;
        }
        if from != to {
            self.slots.swap(from, to);
        }
        Ok(())
    }

    /// Occupied slots with their items
    pub fn items(&self) -> impl Iterator<Item = (usize, &Item)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|item| (i, item)))
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|s| s.is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::item::{Potion, Scroll};

    #[test]
    fn test_initialize_fills_scroll_row() {
        let mut pack = Backpack::new();
        pack.add_item(ItemSpec::Scroll(Scroll::fire(10)), 2).unwrap();
        pack.initialize();

        for i in 0..SCROLL_SLOTS {
            assert!(pack.get(i).is_some_and(|item| item.is_scroll()));
        }
        assert_eq!(pack.get(2), Some(&Item::Scroll(Scroll::fire(10))));
        assert!(pack.get(4).is_none());
    }

    #[test]
    fn test_scroll_outside_top_row_rejected() {
        let mut pack = Backpack::new();
        assert_eq!(
            pack.add_item(ItemSpec::BaseScroll, 4),
            Err(BackpackError::NoScrolls(4))
        );
        assert_eq!(
            pack.add_item(ItemSpec::Scroll(Scroll::base()), 15),
            Err(BackpackError::NoScrolls(15))
        );
        assert!(pack.is_empty());
    }

    #[test]
    fn test_non_scroll_in_top_row_rejected() {
        let mut pack = Backpack::new();
        assert_eq!(
            pack.add_item(ItemSpec::HealthPotion, 0),
            Err(BackpackError::ScrollsOnly(0))
        );
        assert_eq!(
            pack.add_item(ItemSpec::Marker("bone".into()), 3),
            Err(BackpackError::ScrollsOnly(3))
        );
        assert!(pack.is_empty());
    }

    #[test]
    fn test_out_of_range_slot() {
        let mut pack = Backpack::new();
        assert_eq!(
            pack.add_item(ItemSpec::HealthPotion, 16),
            Err(BackpackError::InvalidSlot(16))
        );
    }

    #[test]
    fn test_add_and_remove() {
        let mut pack = Backpack::new();
        pack.add_item(ItemSpec::ManaPotion, 5).unwrap();
        assert_eq!(pack.get(5), Some(&Item::Potion(Potion::mana(5))));

        let removed = pack.remove_item(5).unwrap();
        assert!(removed.is_some());
        assert_eq!(pack.take_item(5), Err(BackpackError::EmptySlot(5)));
    }

    #[test]
    fn test_move_item_swaps_within_rules() {
        let mut pack = Backpack::new();
        pack.add_item(ItemSpec::HealthPotion, 4).unwrap();
        pack.add_item(ItemSpec::ManaPotion, 9).unwrap();

        pack.move_item(4, 9).unwrap();
        assert_eq!(pack.get(4), Some(&Item::Potion(Potion::mana(5))));
        assert_eq!(pack.get(9), Some(&Item::Potion(Potion::health(30))));

        pack.move_item(9, 12).unwrap();
        assert!(pack.get(9).is_none());

        assert_eq!(pack.move_item(12, 1), Err(BackpackError::ScrollsOnly(1)));
    }

    #[test]
    fn test_move_rejects_displacing_scroll_downward() {
        let mut pack = Backpack::new();
        pack.initialize();
        pack.add_item(ItemSpec::HealthPotion, 6).unwrap();
        // the potion cannot go up, and the scroll it would displace cannot come down
        assert!(pack.move_item(6, 0).is_err());
        assert!(pack.move_item(0, 6).is_err());
        // scrolls shuffle freely inside the rack
        pack.move_item(0, 3).unwrap();
    }

    #[test]
    fn test_add_to_free_slot() {
        let mut pack = Backpack::new();
        pack.initialize();
        assert!(matches!(
            pack.add_to_free_slot(ItemSpec::BaseScroll),
            Err(BackpackError::NoFreeSlot(_))
        ));
        assert_eq!(pack.add_to_free_slot(ItemSpec::HealthPotion), Ok(4));
        assert_eq!(pack.add_to_free_slot(ItemSpec::HealthPotion), Ok(5));
    }
}
