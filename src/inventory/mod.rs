//! Backpack inventory

pub mod backpack;
pub mod item;

pub use backpack::{Backpack, BackpackError, BACKPACK_SLOTS, SCROLL_SLOTS};
pub use item::{Item, ItemSpec, Potion, PotionKind, Scroll, ScrollEffect};
